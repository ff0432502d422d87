use crate::base::{tensor_dim, Order, StressError};
use russell_lab::{Matrix, Vector};

/// Holds the mean stress and (optionally) its derivative w.r.t. the stress tensor
#[derive(Clone, Debug)]
pub struct MeanStress {
    /// Mean stress p = tr(σ) / d
    pub value: f64,

    /// ∂p/∂σ (flattened as σ)
    pub jacobian: Option<Vector>,
}

/// Calculates the mean stress of a row-major flattened d×d stress tensor
///
/// ```text
/// p = tr(σ) / d
/// ```
///
/// The derivative ∂p/∂σ equals 1/d at the diagonal components and zero elsewhere.
pub fn calc_mean_stress(stress: &Vector, order: Order) -> Result<MeanStress, StressError> {
    let d = tensor_dim(stress.dim())?;
    let mut trace = 0.0;
    for i in 0..d {
        trace += stress[i * d + i];
    }
    let jacobian = if order.first() {
        let mut dp_dsigma = Vector::new(d * d);
        for i in 0..d {
            dp_dsigma[i * d + i] = 1.0 / (d as f64);
        }
        Some(dp_dsigma)
    } else {
        None
    };
    Ok(MeanStress {
        value: trace / (d as f64),
        jacobian,
    })
}

/// Calculates the mean stress (value only)
pub fn mean_stress(stress: &Vector) -> Result<f64, StressError> {
    Ok(calc_mean_stress(stress, Order::Value)?.value)
}

/// Calculates the mean stress of a stress tensor given as a square d×d matrix
pub fn mean_stress_of_matrix(stress: &Matrix) -> Result<f64, StressError> {
    let (nrow, ncol) = stress.dims();
    if nrow != ncol || nrow == 0 {
        return Err(StressError::dimension(format!(
            "the stress matrix must be square and non-empty (it is {}×{})",
            nrow, ncol
        )));
    }
    let mut trace = 0.0;
    for i in 0..nrow {
        trace += stress.get(i, i);
    }
    Ok(trace / (nrow as f64))
}

/// Calculates the mean stress of each row of a matrix, where each row holds a flattened stress tensor
pub fn mean_stress_rows(stresses: &Matrix) -> Result<Vector, StressError> {
    let (nrow, ncol) = stresses.dims();
    let d = tensor_dim(ncol)?;
    let mut result = Vector::new(nrow);
    for r in 0..nrow {
        let mut trace = 0.0;
        for i in 0..d {
            trace += stresses.get(r, i * d + i);
        }
        result[r] = trace / (d as f64);
    }
    Ok(result)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
