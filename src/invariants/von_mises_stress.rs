use super::{deviatoric_projector, deviatoric_stress};
use crate::base::{tensor_dim, Order, Settings, StressError};
use russell_lab::{mat_scale, vec_copy_scaled, vec_inner, vec_outer_update, Matrix, Vector};

/// Holds the von Mises stress and (optionally) its derivative w.r.t. the stress tensor
#[derive(Clone, Debug)]
pub struct VonMisesStress {
    /// Von Mises stress q = √(3/2 s:s)
    pub value: f64,

    /// ∂q/∂σ (flattened as σ)
    pub jacobian: Option<Vector>,
}

/// Returns q given the deviatoric stress
fn von_mises_of_deviator(s: &Vector) -> f64 {
    f64::sqrt(1.5 * vec_inner(s, s))
}

/// Returns ∂q/∂σ = 3 s / (2 q) given the deviatoric stress and q; zero at the apex
fn gradient_of_deviator(s: &Vector, q: f64, settings: &Settings) -> Result<Vector, StressError> {
    let mut g = Vector::new(s.dim());
    if q > settings.apex_tolerance {
        vec_copy_scaled(&mut g, 1.5 / q, s)?;
    } else {
        log::debug!("von Mises derivative set to zero at the apex (q = {:e})", q);
    }
    Ok(g)
}

/// Calculates the von Mises (equivalent) stress
///
/// ```text
/// q = √(3/2 s:s)
///
/// ∂q     3
/// ── = ─── s
/// ∂σ   2 q
/// ```
///
/// **Note:** At the apex (q ≤ `settings.apex_tolerance`, a hydrostatic stress state) the
/// derivative is undefined; it is taken as zero instead. This is a designed discontinuity.
pub fn calc_von_mises_stress(stress: &Vector, order: Order, settings: &Settings) -> Result<VonMisesStress, StressError> {
    let s = deviatoric_stress(stress)?;
    let q = von_mises_of_deviator(&s);
    let jacobian = if order.first() {
        Some(gradient_of_deviator(&s, q, settings)?)
    } else {
        None
    };
    Ok(VonMisesStress { value: q, jacobian })
}

/// Calculates the von Mises stress (value only)
pub fn von_mises_stress(stress: &Vector) -> Result<f64, StressError> {
    Ok(calc_von_mises_stress(stress, Order::Value, &Settings::new())?.value)
}

/// Calculates the derivative of the von Mises stress w.r.t. the stress tensor (zero at the apex)
pub fn von_mises_gradient(stress: &Vector, settings: &Settings) -> Result<Vector, StressError> {
    let s = deviatoric_stress(stress)?;
    gradient_of_deviator(&s, von_mises_of_deviator(&s), settings)
}

/// Calculates the second derivative of the von Mises stress w.r.t. the stress tensor
///
/// ```text
///  ∂²q      3        1
/// ───── = ─── P  -  ─── g ⊗ g     with  g = ∂q/∂σ
/// ∂σ∂σ    2 q        q
/// ```
///
/// where P is the deviatoric projector. The result is zero at the apex (see [calc_von_mises_stress]).
pub fn von_mises_hessian(stress: &Vector, settings: &Settings) -> Result<Matrix, StressError> {
    let d = tensor_dim(stress.dim())?;
    let s = deviatoric_stress(stress)?;
    let q = von_mises_of_deviator(&s);
    if q <= settings.apex_tolerance {
        return Ok(Matrix::new(d * d, d * d));
    }
    let g = gradient_of_deviator(&s, q, settings)?;
    let mut hh = deviatoric_projector(d)?;
    mat_scale(&mut hh, 1.5 / q);
    vec_outer_update(&mut hh, -1.0 / q, &g, &g)?;
    Ok(hh)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
