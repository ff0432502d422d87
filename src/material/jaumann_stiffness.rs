use crate::base::{tensor_dim, StressError};
use russell_lab::{Matrix, Vector};

/// Calculates the Jaumann stiffness tensor from the derivative of the Cauchy stress w.r.t. the deformation gradient
///
/// ```text
///         1  ⎛ ∂σᵢⱼ          ∂σᵢⱼ      ⎞
/// Cᵢⱼₖₗ = ─  ⎜ ──── F_lA  +  ──── F_kA ⎟ + σᵢⱼ δₖₗ
///         2  ⎝ ∂F_kA         ∂F_lA     ⎠
/// ```
///
/// The first term pushes the material derivative forward to the current configuration; the symmetrization
/// in (k,l) removes the contribution of the spin. The last term accounts for the volume change, such that
/// C maps the rate of deformation onto the Jaumann rate of the Kirchhoff stress divided by J.
///
/// # Input
///
/// * `cauchy_stress` -- σ (flattened d×d, row-major)
/// * `deformation_gradient` -- F (flattened d×d, row-major)
/// * `dcauchy_df` -- ∂σ/∂F as a (d²)×(d²) matrix with rows ij and columns kA
///
/// # Output
///
/// Returns C as a (d²)×(d²) matrix with rows ij and columns kl.
pub fn calc_jaumann_stiffness(
    cauchy_stress: &Vector,
    deformation_gradient: &Vector,
    dcauchy_df: &Matrix,
) -> Result<Matrix, StressError> {
    let d = tensor_dim(cauchy_stress.dim())?;
    let n = d * d;
    if deformation_gradient.dim() != n {
        return Err(StressError::dimension(format!(
            "the deformation gradient must have {} components to match the stress",
            n
        )));
    }
    if dcauchy_df.dims() != (n, n) {
        return Err(StressError::dimension(format!(
            "∂σ/∂F must be a {}×{} matrix",
            n, n
        )));
    }
    let ff = deformation_gradient;
    let mut cc = Matrix::new(n, n);
    for i in 0..d {
        for j in 0..d {
            let ij = i * d + j;
            for k in 0..d {
                for l in 0..d {
                    let mut value = 0.0;
                    for a in 0..d {
                        value += 0.5 * dcauchy_df.get(ij, k * d + a) * ff[l * d + a];
                        value += 0.5 * dcauchy_df.get(ij, l * d + a) * ff[k * d + a];
                    }
                    if k == l {
                        value += cauchy_stress[ij];
                    }
                    cc.set(ij, k * d + l, value);
                }
            }
        }
    }
    Ok(cc)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::calc_jaumann_stiffness;
    use crate::base::testing::num_jacobian;
    use crate::base::ErrorKind;
    use crate::material::determinant;
    use russell_lab::{approx_eq, mat_approx_eq, Matrix, Vector};

    #[test]
    fn captures_errors() {
        let sig = Vector::new(9);
        let ff = Vector::new(4);
        let dd = Matrix::new(9, 9);
        assert_eq!(
            calc_jaumann_stiffness(&Vector::new(7), &ff, &dd).unwrap_err().kind(),
            ErrorKind::Dimension
        );
        assert_eq!(
            calc_jaumann_stiffness(&sig, &ff, &dd).unwrap_err().to_string(),
            "dimension error: the deformation gradient must have 9 components to match the stress"
        );
        let ff = Vector::new(9);
        let dd = Matrix::new(9, 6);
        assert_eq!(
            calc_jaumann_stiffness(&sig, &ff, &dd).unwrap_err().to_string(),
            "dimension error: ∂σ/∂F must be a 9×9 matrix"
        );
    }

    /// Small-strain isotropic elasticity evaluated at F = I: σ = λ tr(ε) I + 2μ ε with ε = sym(F) - I
    fn small_strain_stress(ff: &Vector, lambda: f64, mu: f64) -> Vector {
        let mut eps = Vector::new(9);
        for i in 0..3 {
            for j in 0..3 {
                let delta = if i == j { 1.0 } else { 0.0 };
                eps[i * 3 + j] = 0.5 * (ff[i * 3 + j] + ff[j * 3 + i]) - delta;
            }
        }
        let tr = eps[0] + eps[4] + eps[8];
        let mut sig = Vector::new(9);
        for i in 0..3 {
            for j in 0..3 {
                let delta = if i == j { 1.0 } else { 0.0 };
                sig[i * 3 + j] = lambda * tr * delta + 2.0 * mu * eps[i * 3 + j];
            }
        }
        sig
    }

    #[test]
    fn undeformed_state_recovers_isotropic_elasticity() {
        let (lambda, mu) = (300.0, 200.0);
        let ff = Vector::from(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let sig = small_strain_stress(&ff, lambda, mu);
        let dsig_df = num_jacobian(&ff, 9, |f| small_strain_stress(f, lambda, mu));
        let cc = calc_jaumann_stiffness(&sig, &ff, &dsig_df).unwrap();
        let mut correct = Matrix::new(9, 9);
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for l in 0..3 {
                        let dij = if i == j { 1.0 } else { 0.0 };
                        let dkl = if k == l { 1.0 } else { 0.0 };
                        let dik = if i == k { 1.0 } else { 0.0 };
                        let djl = if j == l { 1.0 } else { 0.0 };
                        let dil = if i == l { 1.0 } else { 0.0 };
                        let djk = if j == k { 1.0 } else { 0.0 };
                        let value = lambda * dij * dkl + mu * (dik * djl + dil * djk);
                        correct.set(i * 3 + j, k * 3 + l, value);
                    }
                }
            }
        }
        mat_approx_eq(&cc, &correct, 1e-8);
    }

    /// Pressure depending on J only: σ = p(J) I with p = κ (J - 1)
    fn hydrostatic_stress(ff: &Vector, kappa: f64) -> Vector {
        let jj = determinant(ff).unwrap();
        let p = kappa * (jj - 1.0);
        Vector::from(&[p, 0.0, 0.0, 0.0, p, 0.0, 0.0, 0.0, p])
    }

    #[test]
    fn hydrostatic_state_works() {
        // C = (J dp/dJ + p) I ⊗ I for σ = p(J) I, independently of the rotation in F
        let kappa = 1000.0;
        let ff = Vector::from(&[1.1, 0.2, 0.0, -0.1, 0.95, 0.05, 0.0, 0.1, 1.05]);
        let jj = determinant(&ff).unwrap();
        let sig = hydrostatic_stress(&ff, kappa);
        let dsig_df = num_jacobian(&ff, 9, |f| hydrostatic_stress(f, kappa));
        let cc = calc_jaumann_stiffness(&sig, &ff, &dsig_df).unwrap();
        let p = kappa * (jj - 1.0);
        let coef = jj * kappa + p;
        let mut correct = Matrix::new(9, 9);
        for i in 0..3 {
            for k in 0..3 {
                correct.set(i * 3 + i, k * 3 + k, coef);
            }
        }
        mat_approx_eq(&cc, &correct, 1e-7);
    }

    #[test]
    fn result_has_minor_symmetry_in_kl() {
        let ff = Vector::from(&[1.1, 0.2, 0.0, -0.1, 0.95, 0.05, 0.0, 0.1, 1.05]);
        let sig = Vector::from(&[5.0, 1.0, 0.5, 1.0, -2.0, 0.3, 0.5, 0.3, 1.0]);
        let mut dsig_df = Matrix::new(9, 9);
        for r in 0..9 {
            for c in 0..9 {
                dsig_df.set(r, c, ((r * 9 + c) % 7) as f64 - 3.0);
            }
        }
        let cc = calc_jaumann_stiffness(&sig, &ff, &dsig_df).unwrap();
        for ij in 0..9 {
            for k in 0..3 {
                for l in 0..3 {
                    approx_eq(cc.get(ij, k * 3 + l), cc.get(ij, l * 3 + k), 1e-13);
                }
            }
        }
    }
}
