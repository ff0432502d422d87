use crate::base::{tensor_dim, Order, ResultExt, StressError};
use russell_lab::Vector;
use russell_tensor::{Mandel, Tensor2};

/// Holds the volumetric response and (optionally) its derivative w.r.t. J
#[derive(Clone, Copy, Debug)]
pub struct VolumetricResponse {
    /// Mean stress p
    pub mean_stress: f64,

    /// dp/dJ
    pub dmean_stress_dj: Option<f64>,
}

/// Implements the volumetric part of a Neo-Hookean hyperelastic model
///
/// ```text
/// p = ½ K (J - 1/J)
///
/// dp/dJ = ½ K (1 + 1/J²)
/// ```
///
/// where J = det(F) is the determinant of the deformation gradient.
#[derive(Clone, Copy, Debug)]
pub struct VolumetricNeoHookean {
    /// Bulk modulus K
    bulk_modulus: f64,
}

impl VolumetricNeoHookean {
    /// Allocates a new instance
    pub fn new(bulk_modulus: f64) -> Result<Self, StressError> {
        if bulk_modulus < 0.0 {
            return Err(StressError::domain("the bulk modulus must be non-negative"));
        }
        Ok(VolumetricNeoHookean { bulk_modulus })
    }

    /// Calculates the mean stress given the determinant J of the deformation gradient
    pub fn calc(&self, jj: f64, order: Order) -> Result<VolumetricResponse, StressError> {
        if jj <= 0.0 {
            return Err(StressError::domain(format!(
                "the Jacobian determinant must be positive (J = {})",
                jj
            )));
        }
        let kk = self.bulk_modulus;
        Ok(VolumetricResponse {
            mean_stress: 0.5 * kk * (jj - 1.0 / jj),
            dmean_stress_dj: if order.first() {
                Some(0.5 * kk * (1.0 + 1.0 / (jj * jj)))
            } else {
                None
            },
        })
    }

    /// Calculates the mean stress given a flattened (row-major) deformation gradient
    pub fn calc_from_deformation_gradient(
        &self,
        deformation_gradient: &Vector,
        order: Order,
    ) -> Result<VolumetricResponse, StressError> {
        let jj = determinant(deformation_gradient).context("cannot compute J from the deformation gradient")?;
        self.calc(jj, order).context("cannot compute the volumetric response")
    }
}

/// Computes the determinant of a flattened (row-major) d×d tensor with d ≤ 3
///
/// Tensors with d < 3 are embedded in a 3×3 tensor with unit diagonal. No singularity check is
/// performed; thus, arbitrarily small positive determinants are returned as they are.
pub fn determinant(tensor: &Vector) -> Result<f64, StressError> {
    let d = tensor_dim(tensor.dim())?;
    if d > 3 {
        return Err(StressError::dimension(format!(
            "the determinant requires a 1×1, 2×2 or 3×3 tensor (d = {})",
            d
        )));
    }
    let mut mat = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            mat[i][j] = if i < d && j < d {
                tensor[i * d + j]
            } else if i == j {
                1.0
            } else {
                0.0
            };
        }
    }
    let tt = Tensor2::from_matrix(&mat, Mandel::General)?;
    Ok(tt.determinant())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
