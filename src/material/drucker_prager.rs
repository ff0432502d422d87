use crate::base::{flat_identity, tensor_dim, Order, ResultExt, Settings, StressError};
use crate::invariants::{calc_mean_stress, calc_von_mises_stress, von_mises_gradient, von_mises_hessian};
use russell_lab::{mat_mat_mul, vec_add, vec_copy_scaled, vec_norm, vec_outer_update, Matrix, Norm, Vector};

/// Selects the outputs of a Drucker-Prager evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YieldRequest {
    /// Yield function value only
    Value,

    /// Value and ∂f/∂σ
    Jacobian,

    /// Value, ∂f/∂σ and ∂²f/∂σ∂σ
    Hessian,

    /// Value, ∂f/∂σ and the unit normal direction n = ∂f/∂σ / ‖∂f/∂σ‖
    UnitDirection,

    /// Value, ∂f/∂σ, the unit normal direction and ∂n/∂σ
    UnitDirectionJacobian,
}

/// Holds the results of a Drucker-Prager evaluation
#[derive(Clone, Debug)]
pub struct YieldOutput {
    /// Yield function value f
    pub value: f64,

    /// ∂f/∂σ
    pub jacobian: Option<Vector>,

    /// ∂²f/∂σ∂σ
    pub djacobian_dstress: Option<Matrix>,

    /// n = ∂f/∂σ / ‖∂f/∂σ‖
    pub unit_direction: Option<Vector>,

    /// ∂n/∂σ
    pub unit_direction_jacobian: Option<Matrix>,
}

/// Implements the two-parameter Drucker-Prager yield surface
///
/// ```text
/// f = q - A p - B
/// ```
///
/// where q is the von Mises stress and p the mean stress. With A = 0 the surface reduces to von Mises.
#[derive(Clone, Copy, Debug)]
pub struct DruckerPrager {
    /// Pressure sensitivity A
    pub a: f64,

    /// Size of the surface B
    pub b: f64,

    /// Tolerances of the designed discontinuities
    settings: Settings,
}

impl DruckerPrager {
    /// Allocates a new instance
    pub fn new(a: f64, b: f64) -> Self {
        DruckerPrager {
            a,
            b,
            settings: Settings::new(),
        }
    }

    /// Allocates a new instance from the parameter vector [A, B]
    pub fn from_params(params: &[f64]) -> Result<Self, StressError> {
        if params.len() != 2 {
            return Err(StressError::dimension(format!(
                "the Drucker-Prager surface requires 2 parameters [A, B] but {} were given",
                params.len()
            )));
        }
        Ok(DruckerPrager::new(params[0], params[1]))
    }

    /// Replaces the settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.settings = *settings;
        self
    }

    /// Evaluates the yield function given the von Mises and mean stresses
    pub fn yield_value(&self, von_mises: f64, mean_stress: f64) -> f64 {
        von_mises - self.a * mean_stress - self.b
    }

    /// Evaluates the yield function given the stress tensor
    pub fn yield_value_from_stress(&self, stress: &Vector) -> Result<f64, StressError> {
        Ok(self.calc(stress, YieldRequest::Value)?.value)
    }

    /// Calculates ∂f/∂σ = ∂q/∂σ - A ∂p/∂σ
    ///
    /// Here, ∂p/∂σ = I/d with I the flattened identity.
    pub fn yield_jacobian(&self, stress: &Vector) -> Result<Vector, StressError> {
        let d = tensor_dim(stress.dim())?;
        let dq = von_mises_gradient(stress, &self.settings)?;
        let mut df = Vector::new(d * d);
        vec_add(&mut df, 1.0, &dq, -self.a / (d as f64), &flat_identity(d))?;
        Ok(df)
    }

    /// Calculates ∂²f/∂σ∂σ
    ///
    /// The mean stress is linear in σ; thus, the Hessian equals the von Mises Hessian.
    pub fn yield_hessian(&self, stress: &Vector) -> Result<Matrix, StressError> {
        von_mises_hessian(stress, &self.settings)
    }

    /// Evaluates the yield function and the requested derivatives
    pub fn calc(&self, stress: &Vector, request: YieldRequest) -> Result<YieldOutput, StressError> {
        let p = calc_mean_stress(stress, Order::Value).context("cannot compute the mean stress")?;
        let q = calc_von_mises_stress(stress, Order::Value, &self.settings)
            .context("cannot compute the von Mises stress")?;
        let mut out = YieldOutput {
            value: self.yield_value(q.value, p.value),
            jacobian: None,
            djacobian_dstress: None,
            unit_direction: None,
            unit_direction_jacobian: None,
        };
        if request == YieldRequest::Value {
            return Ok(out);
        }
        let jacobian = self.yield_jacobian(stress).context("cannot compute ∂f/∂σ")?;
        match request {
            YieldRequest::Value | YieldRequest::Jacobian => (),
            YieldRequest::Hessian => {
                out.djacobian_dstress = Some(self.yield_hessian(stress).context("cannot compute ∂²f/∂σ∂σ")?);
            }
            YieldRequest::UnitDirection => {
                out.unit_direction = Some(
                    unit_direction(&jacobian, self.settings.normal_tolerance)
                        .context("cannot compute the unit normal direction")?,
                );
            }
            YieldRequest::UnitDirectionJacobian => {
                let hessian = self.yield_hessian(stress).context("cannot compute ∂²f/∂σ∂σ")?;
                let tol = self.settings.normal_tolerance;
                out.unit_direction =
                    Some(unit_direction(&jacobian, tol).context("cannot compute the unit normal direction")?);
                out.unit_direction_jacobian = Some(
                    unit_direction_jacobian(&jacobian, &hessian, tol)
                        .context("cannot compute the Jacobian of the unit normal direction")?,
                );
                out.djacobian_dstress = Some(hessian);
            }
        }
        out.jacobian = Some(jacobian);
        Ok(out)
    }
}

/// Normalizes a gradient: n = g / ‖g‖
///
/// Fails if ‖g‖ ≤ tol (e.g., the apex of a pressure-insensitive surface).
pub fn unit_direction(gradient: &Vector, tol: f64) -> Result<Vector, StressError> {
    let norm = vec_norm(gradient, Norm::Euc);
    if norm <= tol {
        return Err(StressError::singular_normal(format!(
            "the gradient norm ({:e}) is too small to define a direction",
            norm
        )));
    }
    let mut n = Vector::new(gradient.dim());
    vec_copy_scaled(&mut n, 1.0 / norm, gradient)?;
    Ok(n)
}

/// Calculates the derivative of the unit direction n = g / ‖g‖ given the Hessian H = ∂g/∂σ
///
/// ```text
/// ∂n     1
/// ── = ─── (𝕀 - n ⊗ n) · H
/// ∂σ   ‖g‖
/// ```
pub fn unit_direction_jacobian(gradient: &Vector, hessian: &Matrix, tol: f64) -> Result<Matrix, StressError> {
    let n = gradient.dim();
    if hessian.dims() != (n, n) {
        return Err(StressError::dimension(format!(
            "the Hessian must be {}×{} to match the gradient",
            n, n
        )));
    }
    let norm = vec_norm(gradient, Norm::Euc);
    let nn = unit_direction(gradient, tol)?;
    let mut proj = Matrix::identity(n);
    vec_outer_update(&mut proj, -1.0, &nn, &nn)?;
    let mut dn = Matrix::new(n, n);
    mat_mat_mul(&mut dn, 1.0 / norm, &proj, hessian, 0.0)?;
    Ok(dn)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
