use crate::base::StressError;

/// Holds the exact decay factor over one step of effective time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decay {
    /// E = exp(-Δt̃/τ)
    pub factor: f64,

    /// dE/dΔt̃ = -E/τ
    pub dfactor_ddt: f64,
}

/// Holds the per-element sensitivities of an updated Prony state variable
///
/// The state variable update reads ξ¹ = E ξ⁰ + (1 - E) ε̄ with ε̄ = (1 - α) ε⁰ + α ε¹. Because the update
/// acts component-wise, the derivatives w.r.t. tensors are scalar multiples of the identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementSensitivities {
    /// ∂ξ¹/∂ε¹ = (1 - E) α  (times identity)
    pub dxi_dstrain: f64,

    /// ∂ξ¹/∂ε⁰ = (1 - E) (1 - α)  (times identity)
    pub dxi_dprevious_strain: f64,

    /// ∂ξ¹/∂ξ⁰ = E  (times identity)
    pub dxi_dprevious_xi: f64,

    /// ∂E/∂r¹ where r¹ is the current rate modifier; ∂ξ¹/∂r¹ = ∂E/∂r¹ (ξ⁰ - ε̄)
    pub dfactor_drate_modifier: f64,

    /// ∂E/∂r⁰ where r⁰ is the previous rate modifier; ∂ξ¹/∂r⁰ = ∂E/∂r⁰ (ξ⁰ - ε̄)
    pub dfactor_dprevious_rate_modifier: f64,
}

/// Implements a Maxwell (Prony) element: a spring of modulus G in series with a dashpot
///
/// The internal state variable ξ (the dashpot strain) evolves with the effective time t̃ as
///
/// ```text
/// dξ     1
/// ── = ─── (ε - ξ)
/// dt̃    τ
/// ```
///
/// and the element carries the stress G (ε - ξ).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PronyElement {
    /// Relaxation time τ
    pub relaxation_time: f64,

    /// Modulus G
    pub modulus: f64,
}

impl PronyElement {
    /// Computes the exact decay factor over an effective time increment
    ///
    /// A relaxation time at or below `relaxation_tolerance` yields an instantaneous relaxation (E = 0).
    pub fn decay(&self, dt_eff: f64, relaxation_tolerance: f64) -> Decay {
        let tau = self.relaxation_time;
        if tau <= relaxation_tolerance {
            return Decay {
                factor: 0.0,
                dfactor_ddt: 0.0,
            };
        }
        let factor = f64::exp(-dt_eff / tau);
        Decay {
            factor,
            dfactor_ddt: -factor / tau,
        }
    }

    /// Updates one state variable component given the blended strain ε̄
    ///
    /// ```text
    /// ξ¹ = E ξ⁰ + (1 - E) ε̄
    /// ```
    ///
    /// This is the exact solution of the element's ODE for ε̄ held constant over the step.
    /// The result is a convex combination of ξ⁰ and ε̄; thus, it never overshoots.
    pub fn update(decay: &Decay, previous_xi: f64, blended_strain: f64) -> f64 {
        decay.factor * previous_xi + (1.0 - decay.factor) * blended_strain
    }

    /// Computes the sensitivities of the updated state variable
    ///
    /// `ddt_drate_modifier` and `ddt_dprevious_rate_modifier` are the derivatives of Δt̃.
    pub fn sensitivities(
        decay: &Decay,
        alpha: f64,
        ddt_drate_modifier: f64,
        ddt_dprevious_rate_modifier: f64,
    ) -> ElementSensitivities {
        let e = decay.factor;
        ElementSensitivities {
            dxi_dstrain: (1.0 - e) * alpha,
            dxi_dprevious_strain: (1.0 - e) * (1.0 - alpha),
            dxi_dprevious_xi: e,
            dfactor_drate_modifier: decay.dfactor_ddt * ddt_drate_modifier,
            dfactor_dprevious_rate_modifier: decay.dfactor_ddt * ddt_dprevious_rate_modifier,
        }
    }
}

/// Holds the parameters of a linear viscoelastic solid represented by a Prony series
///
/// The positional parameter vector is
///
/// ```text
/// [E∞, τ₁, τ₂, …, τₘ, G₁, G₂, …, Gₘ]
/// ```
///
/// where E∞ is the modulus of the elastic spring in parallel with the m Prony elements.
#[derive(Clone, Debug, PartialEq)]
pub struct PronySeries {
    /// Modulus E∞ of the elastic branch
    pub elastic_modulus: f64,

    /// The Prony elements
    pub elements: Vec<PronyElement>,
}

impl PronySeries {
    /// Allocates a new instance from the positional parameter vector and the expected number of elements
    pub fn from_params(params: &[f64], n_elements: usize) -> Result<Self, StressError> {
        if params.len() != 1 + 2 * n_elements {
            return Err(StressError::dimension(format!(
                "{} Prony elements require {} parameters [E∞, τ…, G…] but {} were given",
                n_elements,
                1 + 2 * n_elements,
                params.len()
            )));
        }
        let taus = &params[1..1 + n_elements];
        let moduli = &params[1 + n_elements..];
        let mut elements = Vec::with_capacity(n_elements);
        for (i, (tau, modulus)) in taus.iter().zip(moduli).enumerate() {
            if *tau < 0.0 {
                return Err(StressError::domain(format!(
                    "the relaxation time of Prony element {} must be non-negative (τ = {})",
                    i, tau
                )));
            }
            elements.push(PronyElement {
                relaxation_time: *tau,
                modulus: *modulus,
            });
        }
        Ok(PronySeries {
            elastic_modulus: params[0],
            elements,
        })
    }

    /// Returns the number of Prony elements
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{PronyElement, PronySeries};
    use crate::base::ErrorKind;
    use russell_lab::{approx_eq, deriv1_central5};

    #[test]
    fn from_params_captures_errors() {
        let err = PronySeries::from_params(&[1.0, 2.0], 1).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Dimension);
        assert_eq!(
            err.to_string(),
            "dimension error: 1 Prony elements require 3 parameters [E∞, τ…, G…] but 2 were given"
        );
        let err = PronySeries::from_params(&[1.0, 2.0, -3.0, 4.0, 5.0], 2).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(
            err.to_string(),
            "domain error: the relaxation time of Prony element 1 must be non-negative (τ = -3)"
        );
    }

    #[test]
    fn from_params_works() {
        let series = PronySeries::from_params(&[100.0, 0.1, 10.0, 50.0, 20.0], 2).unwrap();
        assert_eq!(series.n_elements(), 2);
        assert_eq!(series.elastic_modulus, 100.0);
        assert_eq!(
            series.elements,
            &[
                PronyElement {
                    relaxation_time: 0.1,
                    modulus: 50.0
                },
                PronyElement {
                    relaxation_time: 10.0,
                    modulus: 20.0
                },
            ]
        );

        let elastic = PronySeries::from_params(&[100.0], 0).unwrap();
        assert_eq!(elastic.n_elements(), 0);
    }

    #[test]
    fn decay_works() {
        let element = PronyElement {
            relaxation_time: 2.0,
            modulus: 1.0,
        };
        let decay = element.decay(0.0, 0.0);
        assert_eq!(decay.factor, 1.0);
        let decay = element.decay(2.0, 0.0);
        approx_eq(decay.factor, f64::exp(-1.0), 1e-15);
        let num = deriv1_central5(2.0, &mut (), |dt, _| Ok(element.decay(dt, 0.0).factor)).unwrap();
        approx_eq(decay.dfactor_ddt, num, 1e-11);

        // instantaneous relaxation
        let element = PronyElement {
            relaxation_time: 0.0,
            modulus: 1.0,
        };
        let decay = element.decay(0.0, 0.0);
        assert_eq!(decay.factor, 0.0);
        assert_eq!(decay.dfactor_ddt, 0.0);

        // relaxation tolerance
        let element = PronyElement {
            relaxation_time: 1e-9,
            modulus: 1.0,
        };
        assert_eq!(element.decay(1.0, 1e-8).factor, 0.0);
    }

    #[test]
    fn update_is_bounded_for_extreme_steps() {
        for tau in [1e-6, 1e-3, 1.0, 1e3, 1e6] {
            let element = PronyElement {
                relaxation_time: tau,
                modulus: 1.0,
            };
            for dt in [0.0, 1e-9, 1.0, 1e9, 1e300] {
                let decay = element.decay(dt, 0.0);
                assert!(decay.factor >= 0.0 && decay.factor <= 1.0);
                let xi = PronyElement::update(&decay, -2.0, 3.0);
                assert!(xi >= -2.0 && xi <= 3.0);
            }
        }
    }

    #[test]
    fn sensitivities_work() {
        let element = PronyElement {
            relaxation_time: 0.5,
            modulus: 1.0,
        };
        let decay = element.decay(0.25, 0.0);
        let sens = PronyElement::sensitivities(&decay, 0.25, 2.0, 3.0);
        let e = f64::exp(-0.5);
        approx_eq(sens.dxi_dstrain, (1.0 - e) * 0.25, 1e-15);
        approx_eq(sens.dxi_dprevious_strain, (1.0 - e) * 0.75, 1e-15);
        approx_eq(sens.dxi_dprevious_xi, e, 1e-15);
        approx_eq(sens.dfactor_drate_modifier, -e / 0.5 * 2.0, 1e-15);
        approx_eq(sens.dfactor_dprevious_rate_modifier, -e / 0.5 * 3.0, 1e-15);
    }
}
