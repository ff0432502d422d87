use super::StressError;
use russell_lab::Vector;

/// Returns the space dimension d of a row-major flattened d×d tensor with `len` components
///
/// Fails with a dimension error if `len` is not a positive perfect square.
pub fn tensor_dim(len: usize) -> Result<usize, StressError> {
    if len == 0 {
        return Err(StressError::dimension("the tensor must have at least one component"));
    }
    let d = (len as f64).sqrt().round() as usize;
    if d * d != len {
        return Err(StressError::dimension(format!(
            "a tensor with {} components does not correspond to a square layout",
            len
        )));
    }
    Ok(d)
}

/// Returns the flattened d×d second-order identity tensor
pub fn flat_identity(d: usize) -> Vector {
    let mut ii = Vector::new(d * d);
    for i in 0..d {
        ii[i * d + i] = 1.0;
    }
    ii
}

/// Checks that two vectors have the same length
pub fn check_same_dim(a: &Vector, b: &Vector, what: &str) -> Result<(), StressError> {
    if a.dim() != b.dim() {
        return Err(StressError::dimension(format!(
            "{} have incompatible lengths ({} and {})",
            what,
            a.dim(),
            b.dim()
        )));
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{check_same_dim, flat_identity, tensor_dim};
    use crate::base::ErrorKind;
    use russell_lab::{vec_approx_eq, Vector};

    #[test]
    fn tensor_dim_captures_errors() {
        assert_eq!(tensor_dim(0).unwrap_err().kind(), ErrorKind::Dimension);
        assert_eq!(tensor_dim(6).unwrap_err().kind(), ErrorKind::Dimension);
        assert_eq!(
            tensor_dim(8).unwrap_err().to_string(),
            "dimension error: a tensor with 8 components does not correspond to a square layout"
        );
    }

    #[test]
    fn tensor_dim_works() {
        assert_eq!(tensor_dim(1).unwrap(), 1);
        assert_eq!(tensor_dim(4).unwrap(), 2);
        assert_eq!(tensor_dim(9).unwrap(), 3);
        assert_eq!(tensor_dim(16).unwrap(), 4);
    }

    #[test]
    fn flat_identity_works() {
        vec_approx_eq(&flat_identity(2), &[1.0, 0.0, 0.0, 1.0], 1e-15);
        vec_approx_eq(
            &flat_identity(3),
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            1e-15,
        );
    }

    #[test]
    fn check_same_dim_works() {
        let u = Vector::new(2);
        let v = Vector::new(3);
        assert!(check_same_dim(&u, &u, "vectors").is_ok());
        assert_eq!(
            check_same_dim(&u, &v, "vectors").unwrap_err().to_string(),
            "dimension error: vectors have incompatible lengths (2 and 3)"
        );
    }
}
