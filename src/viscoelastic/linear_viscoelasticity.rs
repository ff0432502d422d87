use super::{ElementSensitivities, PronyElement, PronySeries};
use crate::base::{check_same_dim, ResultExt, Settings, StressError};
use russell_lab::{vec_add, vec_copy_scaled, Matrix, Vector};

/// Selects the outputs of a viscoelastic update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViscoRequest {
    /// Stress, stress increment and updated state variables
    Stress,

    /// Also the sensitivities w.r.t. the current strain and rate modifier (consistent tangent)
    Tangent,

    /// Also the sensitivities w.r.t. the previous-step quantities and of the updated state variables
    History,
}

/// Holds the input data of one viscoelastic time step
#[derive(Clone, Copy, Debug)]
pub struct ViscoelasticStep<'a> {
    /// Current time t¹
    pub current_time: f64,

    /// Current strain ε¹
    pub current_strain: &'a Vector,

    /// Previous time t⁰
    pub previous_time: f64,

    /// Previous strain ε⁰
    pub previous_strain: &'a Vector,

    /// Current rate modifier r¹ (e.g., a temperature shift factor applied to the time rate)
    pub current_rate_modifier: f64,

    /// Previous rate modifier r⁰
    pub previous_rate_modifier: f64,

    /// Previous state variables ξ⁰ (one block with the length of the strain per Prony element)
    pub previous_state_variables: &'a Vector,

    /// Material parameters [E∞, τ₁, …, τₘ, G₁, …, Gₘ]
    pub material_parameters: &'a [f64],

    /// Integration weight α ∈ [0, 1] (0: previous step, 1: current step, ½: midpoint)
    pub alpha: f64,
}

/// Holds the current-step sensitivities (consistent tangent)
#[derive(Clone, Debug)]
pub struct ViscoelasticTangent {
    /// ∂σ/∂ε¹ (n×n)
    pub dstress_dstrain: Matrix,

    /// ∂σ/∂r¹ (n)
    pub dstress_drate_modifier: Vector,
}

/// Holds the sensitivities w.r.t. previous-step quantities and the sensitivities of the state variables
///
/// Here, n is the strain length and m the number of Prony elements.
#[derive(Clone, Debug)]
pub struct HistorySensitivities {
    /// ∂σ/∂ε⁰ (n×n)
    pub dstress_dprevious_strain: Matrix,

    /// ∂σ/∂r⁰ (n)
    pub dstress_dprevious_rate_modifier: Vector,

    /// ∂σ/∂ξ⁰ (n×mn)
    pub dstress_dprevious_state_variables: Matrix,

    /// ∂ξ¹/∂ε¹ (mn×n)
    pub dstate_variables_dstrain: Matrix,

    /// ∂ξ¹/∂r¹ (mn)
    pub dstate_variables_drate_modifier: Vector,

    /// ∂ξ¹/∂ε⁰ (mn×n)
    pub dstate_variables_dprevious_strain: Matrix,

    /// ∂ξ¹/∂r⁰ (mn)
    pub dstate_variables_dprevious_rate_modifier: Vector,

    /// ∂ξ¹/∂ξ⁰ (mn×mn)
    pub dstate_variables_dprevious_state_variables: Matrix,
}

/// Holds the results of one viscoelastic time step
#[derive(Clone, Debug)]
pub struct ViscoelasticResponse {
    /// Stress σ¹
    pub stress: Vector,

    /// Stress increment Δσ = σ¹ - σ⁰, where σ⁰ is evaluated with ε⁰ and ξ⁰
    pub d_stress: Vector,

    /// Updated state variables ξ¹
    pub state_variables: Vector,

    /// Available if the request is [ViscoRequest::Tangent] or [ViscoRequest::History]
    pub tangent: Option<ViscoelasticTangent>,

    /// Available if the request is [ViscoRequest::History]
    pub history: Option<HistorySensitivities>,
}

/// Holds the effective (rate-modified) time increment and its derivatives
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveTime {
    /// Δt̃ = (t¹ - t⁰) ((1 - α) r⁰ + α r¹)
    pub increment: f64,

    /// ∂Δt̃/∂r¹
    pub dincrement_drate_modifier: f64,

    /// ∂Δt̃/∂r⁰
    pub dincrement_dprevious_rate_modifier: f64,
}

impl EffectiveTime {
    /// Computes the effective time increment
    ///
    /// The rate modifier scales the time rate (dt̃ = r dt) and is blended with the integration weight α.
    pub fn new(step: &ViscoelasticStep) -> Result<Self, StressError> {
        let dt = step.current_time - step.previous_time;
        let alpha = step.alpha;
        let rate = (1.0 - alpha) * step.previous_rate_modifier + alpha * step.current_rate_modifier;
        let increment = dt * rate;
        if increment < 0.0 {
            return Err(StressError::domain(format!(
                "the effective time increment must be non-negative (Δt = {}, blended rate modifier = {})",
                dt, rate
            )));
        }
        Ok(EffectiveTime {
            increment,
            dincrement_drate_modifier: dt * alpha,
            dincrement_dprevious_rate_modifier: dt * (1.0 - alpha),
        })
    }
}

/// Integrates a linear viscoelastic (Prony series) stress response over one time step
///
/// ```text
/// σ¹ = E∞ ε¹ + Σᵢ Gᵢ (ε¹ - ξᵢ¹)
///
/// ξᵢ¹ = Eᵢ ξᵢ⁰ + (1 - Eᵢ) ε̄      Eᵢ = exp(-Δt̃/τᵢ)      ε̄ = (1 - α) ε⁰ + α ε¹
/// ```
///
/// Each element update is the exact solution of its ODE for the blended strain ε̄; therefore, the
/// integration is unconditionally stable for any relaxation time and any time increment.
///
/// The number of Prony elements m is inferred from the length of the previous state variables,
/// which must be a multiple of the strain length n. The material parameters must then have 1 + 2m entries.
///
/// No data is stored between calls: the caller owns the state variables and passes the returned
/// vector to the next step.
pub fn calc_linear_viscoelasticity(
    step: &ViscoelasticStep,
    request: ViscoRequest,
    settings: &Settings,
) -> Result<ViscoelasticResponse, StressError> {
    // check input
    let n = step.current_strain.dim();
    if n == 0 {
        return Err(StressError::dimension("the strain must have at least one component"));
    }
    check_same_dim(step.current_strain, step.previous_strain, "the current and previous strains")?;
    let nsv = step.previous_state_variables.dim();
    if nsv % n != 0 {
        return Err(StressError::dimension(format!(
            "the number of state variables ({}) must be a multiple of the strain length ({})",
            nsv, n
        )));
    }
    if step.alpha < 0.0 || step.alpha > 1.0 {
        return Err(StressError::domain(format!(
            "the integration weight must be in [0, 1] (α = {})",
            step.alpha
        )));
    }
    let m = nsv / n;
    let series = PronySeries::from_params(step.material_parameters, m)
        .context("the viscoelastic material parameters are inconsistent with the state variables")?;
    let time = EffectiveTime::new(step).context("cannot compute the effective time increment")?;
    log::trace!("linear viscoelasticity: {} Prony elements, Δt̃ = {:e}", m, time.increment);

    // blended strain
    let (eps1, eps0) = (step.current_strain, step.previous_strain);
    let xi0 = step.previous_state_variables;
    let alpha = step.alpha;
    let mut eps_bar = Vector::new(n);
    vec_add(&mut eps_bar, 1.0 - alpha, eps0, alpha, eps1)?;

    // elastic branch
    let einf = series.elastic_modulus;
    let mut stress = Vector::new(n);
    let mut previous_stress = Vector::new(n);
    vec_copy_scaled(&mut stress, einf, eps1)?;
    vec_copy_scaled(&mut previous_stress, einf, eps0)?;

    // Prony elements
    let mut xi1 = Vector::new(nsv);
    let mut decays = Vec::with_capacity(m);
    for (e, element) in series.elements.iter().enumerate() {
        let decay = element.decay(time.increment, settings.relaxation_tolerance);
        let gg = element.modulus;
        for k in 0..n {
            let idx = e * n + k;
            xi1[idx] = PronyElement::update(&decay, xi0[idx], eps_bar[k]);
            stress[k] += gg * (eps1[k] - xi1[idx]);
            previous_stress[k] += gg * (eps0[k] - xi0[idx]);
        }
        decays.push(decay);
    }
    let mut d_stress = Vector::new(n);
    vec_add(&mut d_stress, 1.0, &stress, -1.0, &previous_stress)?;

    // sensitivities
    let sens: Vec<_> = decays
        .iter()
        .map(|decay| {
            PronyElement::sensitivities(
                decay,
                alpha,
                time.dincrement_drate_modifier,
                time.dincrement_dprevious_rate_modifier,
            )
        })
        .collect();
    let tangent = match request {
        ViscoRequest::Stress => None,
        _ => Some(viscoelastic_tangent(&series, &sens, xi0, &eps_bar)),
    };
    let history = match request {
        ViscoRequest::History => Some(history_sensitivities(&series, &sens, xi0, &eps_bar)),
        _ => None,
    };
    Ok(ViscoelasticResponse {
        stress,
        d_stress,
        state_variables: xi1,
        tangent,
        history,
    })
}

/// Returns ξᵢ⁰ - ε̄ for element e and component k, i.e., the factor multiplying ∂Eᵢ/∂r
fn decay_direction(xi0: &Vector, eps_bar: &Vector, e: usize, k: usize) -> f64 {
    let n = eps_bar.dim();
    xi0[e * n + k] - eps_bar[k]
}

/// Computes the sensitivities w.r.t. the current strain and rate modifier
///
/// ```text
/// ∂σ/∂ε¹ = (E∞ + Σᵢ Gᵢ (1 - (1 - Eᵢ) α)) 𝕀
///
/// ∂σ/∂r¹ = -Σᵢ Gᵢ ∂Eᵢ/∂r¹ (ξᵢ⁰ - ε̄)
/// ```
pub fn viscoelastic_tangent(
    series: &PronySeries,
    sens: &[ElementSensitivities],
    xi0: &Vector,
    eps_bar: &Vector,
) -> ViscoelasticTangent {
    let n = eps_bar.dim();
    let mut diagonal = series.elastic_modulus;
    let mut dstress_drate_modifier = Vector::new(n);
    for (e, (element, s)) in series.elements.iter().zip(sens).enumerate() {
        diagonal += element.modulus * (1.0 - s.dxi_dstrain);
        for k in 0..n {
            dstress_drate_modifier[k] -= element.modulus * s.dfactor_drate_modifier * decay_direction(xi0, eps_bar, e, k);
        }
    }
    let mut dstress_dstrain = Matrix::new(n, n);
    for k in 0..n {
        dstress_dstrain.set(k, k, diagonal);
    }
    ViscoelasticTangent {
        dstress_dstrain,
        dstress_drate_modifier,
    }
}

/// Computes the sensitivities w.r.t. the previous-step quantities and those of the updated state variables
pub fn history_sensitivities(
    series: &PronySeries,
    sens: &[ElementSensitivities],
    xi0: &Vector,
    eps_bar: &Vector,
) -> HistorySensitivities {
    let n = eps_bar.dim();
    let m = series.n_elements();
    let nsv = m * n;
    let mut out = HistorySensitivities {
        dstress_dprevious_strain: Matrix::new(n, n),
        dstress_dprevious_rate_modifier: Vector::new(n),
        dstress_dprevious_state_variables: Matrix::new(n, nsv),
        dstate_variables_dstrain: Matrix::new(nsv, n),
        dstate_variables_drate_modifier: Vector::new(nsv),
        dstate_variables_dprevious_strain: Matrix::new(nsv, n),
        dstate_variables_dprevious_rate_modifier: Vector::new(nsv),
        dstate_variables_dprevious_state_variables: Matrix::new(nsv, nsv),
    };
    let mut diagonal = 0.0;
    for (e, (element, s)) in series.elements.iter().zip(sens).enumerate() {
        let gg = element.modulus;
        diagonal -= gg * s.dxi_dprevious_strain;
        for k in 0..n {
            let idx = e * n + k;
            let dir = decay_direction(xi0, eps_bar, e, k);
            let dxi_dr1 = s.dfactor_drate_modifier * dir;
            let dxi_dr0 = s.dfactor_dprevious_rate_modifier * dir;
            out.dstress_dprevious_rate_modifier[k] -= gg * dxi_dr0;
            out.dstress_dprevious_state_variables.set(k, idx, -gg * s.dxi_dprevious_xi);
            out.dstate_variables_dstrain.set(idx, k, s.dxi_dstrain);
            out.dstate_variables_drate_modifier[idx] = dxi_dr1;
            out.dstate_variables_dprevious_strain.set(idx, k, s.dxi_dprevious_strain);
            out.dstate_variables_dprevious_rate_modifier[idx] = dxi_dr0;
            out.dstate_variables_dprevious_state_variables.set(idx, idx, s.dxi_dprevious_xi);
        }
    }
    for k in 0..n {
        out.dstress_dprevious_strain.set(k, k, diagonal);
    }
    out
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
