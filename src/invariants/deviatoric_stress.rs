use super::calc_mean_stress;
use crate::base::{flat_identity, tensor_dim, Order, StressError};
use russell_lab::{vec_outer_update, Matrix, Vector};

/// Holds the deviatoric stress and (optionally) its derivative w.r.t. the stress tensor
#[derive(Clone, Debug)]
pub struct DeviatoricStress {
    /// Deviatoric stress s = σ - p I
    pub value: Vector,

    /// ∂s/∂σ = 𝕀 - (1/d) I ⊗ I
    pub jacobian: Option<Matrix>,
}

/// Returns the deviatoric projector P = 𝕀 - (1/d) I ⊗ I for a flattened d×d layout
///
/// P is symmetric and idempotent.
pub fn deviatoric_projector(d: usize) -> Result<Matrix, StressError> {
    let ii = flat_identity(d);
    let mut pp = Matrix::identity(d * d);
    vec_outer_update(&mut pp, -1.0 / (d as f64), &ii, &ii)?;
    Ok(pp)
}

/// Calculates the deviatoric stress
///
/// ```text
/// s = σ - p I
/// ```
pub fn calc_deviatoric_stress(stress: &Vector, order: Order) -> Result<DeviatoricStress, StressError> {
    let d = tensor_dim(stress.dim())?;
    let p = calc_mean_stress(stress, Order::Value)?.value;
    let mut s = stress.clone();
    for i in 0..d {
        s[i * d + i] -= p;
    }
    let jacobian = if order.first() { Some(deviatoric_projector(d)?) } else { None };
    Ok(DeviatoricStress { value: s, jacobian })
}

/// Calculates the deviatoric stress (value only)
pub fn deviatoric_stress(stress: &Vector) -> Result<Vector, StressError> {
    Ok(calc_deviatoric_stress(stress, Order::Value)?.value)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
