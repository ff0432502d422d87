use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use russell_lab::{deriv1_central5, Matrix, Vector};

/// Returns a seeded generator so that randomized tests are reproducible
pub(crate) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generates a random symmetric 3×3 stress tensor (flattened) with components in [-scale, scale]
pub(crate) fn random_symmetric_stress(rng: &mut StdRng, scale: f64) -> Vector {
    let mut stress = Vector::new(9);
    for i in 0..3 {
        for j in i..3 {
            let value = rng.random_range(-scale..scale);
            stress[i * 3 + j] = value;
            stress[j * 3 + i] = value;
        }
    }
    stress
}

/// Generates a random vector with components in [lo, hi]
pub(crate) fn random_vector(rng: &mut StdRng, n: usize, lo: f64, hi: f64) -> Vector {
    let mut v = Vector::new(n);
    for i in 0..n {
        v[i] = rng.random_range(lo..hi);
    }
    v
}

/// Computes the gradient of a scalar function of a vector using central differences
pub(crate) fn num_gradient<F>(at: &Vector, f: F) -> Vector
where
    F: FnMut(&Vector) -> f64,
{
    num_gradient_scaled(at, 1.0, f)
}

/// Computes the gradient using perturbations scaled by `scale`
///
/// A small scale resolves functions that vary over short distances (e.g., near the apex).
pub(crate) fn num_gradient_scaled<F>(at: &Vector, scale: f64, mut f: F) -> Vector
where
    F: FnMut(&Vector) -> f64,
{
    let n = at.dim();
    let mut grad = Vector::new(n);
    let mut x = at.clone();
    for k in 0..n {
        let dfdt = deriv1_central5(0.0, &mut x, |t, x| {
            x[k] = at[k] + scale * t;
            let value = f(x);
            x[k] = at[k];
            Ok(value)
        })
        .unwrap();
        grad[k] = dfdt / scale;
    }
    grad
}

/// Computes the Jacobian of a vector function of a vector using central differences
///
/// Returns the m×n matrix where m is the output length and n is the input length.
pub(crate) fn num_jacobian<F>(at: &Vector, m: usize, f: F) -> Matrix
where
    F: FnMut(&Vector) -> Vector,
{
    num_jacobian_scaled(at, m, 1.0, f)
}

/// Computes the Jacobian using perturbations scaled by `scale` (see [num_gradient_scaled])
pub(crate) fn num_jacobian_scaled<F>(at: &Vector, m: usize, scale: f64, mut f: F) -> Matrix
where
    F: FnMut(&Vector) -> Vector,
{
    let n = at.dim();
    let mut jac = Matrix::new(m, n);
    for i in 0..m {
        let row = num_gradient_scaled(at, scale, |x| f(x)[i]);
        for j in 0..n {
            jac.set(i, j, row[j]);
        }
    }
    jac
}
