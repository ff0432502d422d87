use crate::base::{Order, Settings, StressError};

/// Holds the viscoplastic flow rate and (optionally) its partial derivatives
#[derive(Clone, Copy, Debug)]
pub struct FlowRate {
    /// Flow rate p
    pub p: f64,

    /// ∂p/∂f
    pub dpdf: Option<f64>,

    /// ∂p/∂q
    pub dpdq: Option<f64>,

    /// ∂p/∂A
    pub dpda: Option<f64>,
}

/// Implements the Perzyna viscoplastic flow rate
///
/// ```text
///        ⎧ A (f/q)ⁿ   if f > 0
/// p(f) = ⎨
///        ⎩ 0          otherwise
/// ```
///
/// where f is the yield function value and q a positive normalizing (drag) stress.
///
/// **Note:** The kink at f = 0 is physical: stress states inside or on the yield surface do not flow.
/// Therefore, p and all of its derivatives are exactly zero for f ≤ `settings.flow_tolerance`.
#[derive(Clone, Copy, Debug)]
pub struct Perzyna {
    /// Scaling (fluidity) coefficient A
    pub a: f64,

    /// Rate sensitivity exponent n
    pub n: f64,

    /// Tolerances of the designed discontinuities
    settings: Settings,
}

impl Perzyna {
    /// Allocates a new instance
    pub fn new(a: f64, n: f64) -> Self {
        Perzyna {
            a,
            n,
            settings: Settings::new(),
        }
    }

    /// Allocates a new instance from the parameter vector [A, n]
    pub fn from_params(params: &[f64]) -> Result<Self, StressError> {
        if params.len() != 2 {
            return Err(StressError::dimension(format!(
                "the Perzyna model requires 2 parameters [A, n] but {} were given",
                params.len()
            )));
        }
        Ok(Perzyna::new(params[0], params[1]))
    }

    /// Replaces the settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.settings = *settings;
        self
    }

    /// Calculates the flow rate and (optionally) its partial derivatives
    pub fn calc(&self, f: f64, q: f64, order: Order) -> Result<FlowRate, StressError> {
        let zero_or_none = if order.first() { Some(0.0) } else { None };
        if f <= self.settings.flow_tolerance {
            return Ok(FlowRate {
                p: 0.0,
                dpdf: zero_or_none,
                dpdq: zero_or_none,
                dpda: zero_or_none,
            });
        }
        if q <= 0.0 {
            return Err(StressError::domain(format!(
                "the normalizing stress q must be positive when f > 0 (q = {})",
                q
            )));
        }
        let (a, n) = (self.a, self.n);
        let ratio = f / q;
        let base = f64::powf(ratio, n);
        if !order.first() {
            return Ok(FlowRate {
                p: a * base,
                dpdf: None,
                dpdq: None,
                dpda: None,
            });
        }
        let dbase = n * f64::powf(ratio, n - 1.0); // d(f/q)ⁿ/d(f/q)
        Ok(FlowRate {
            p: a * base,
            dpdf: Some(a * dbase / q),
            dpdq: Some(-a * dbase * f / (q * q)),
            dpda: Some(base),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
