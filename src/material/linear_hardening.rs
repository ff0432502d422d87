use crate::base::{check_same_dim, Order, StressError};
use russell_lab::{vec_inner, Vector};

/// Holds the hardening value and (optionally) its gradient w.r.t. the state variables
#[derive(Clone, Debug)]
pub struct Hardening {
    /// Hardening value h = z · k + h₀
    pub value: f64,

    /// ∂h/∂z = k
    pub jacobian: Option<Vector>,
}

/// Calculates a linear hardening value
///
/// ```text
/// h = z · k + h₀
/// ```
///
/// where z holds the state variables, k the linear moduli, and h₀ is the scalar shift.
pub fn calc_linear_hardening(
    state_variables: &Vector,
    linear_moduli: &Vector,
    scalar_shift: f64,
    order: Order,
) -> Result<Hardening, StressError> {
    check_same_dim(state_variables, linear_moduli, "the state variables and the linear moduli")?;
    Ok(Hardening {
        value: vec_inner(state_variables, linear_moduli) + scalar_shift,
        jacobian: if order.first() { Some(linear_moduli.clone()) } else { None },
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
