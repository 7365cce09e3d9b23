//! Reference exponentiation delegated to `ndarray`'s matrix product.

use ndarray::Array2;

use crate::error::MatrixError;
use crate::math::Matrix;
use crate::power::check_exponent;

/// Computes `a^p` with `ndarray`, by repeated squaring over an explicit identity accumulator.
///
/// Boundary handling and errors are the same as [`crate::power::power`]. The product
/// kernel sums in its own order, so results agree with the other strategies only up
/// to rounding.
pub fn power_ndarray(a: &Matrix<f64>, p: i64) -> Result<Matrix<f64>, MatrixError> {
    let mut exp = check_exponent(p)?;
    let n = a.require_square()?;
    if exp == 1 {
        return Ok(a.clone());
    }

    let mut base = Array2::from_shape_vec((n, n), a.as_slice().to_vec())
        .map_err(|_| MatrixError::InvalidMatrix { rows: n, cols: n })?;
    let mut result = Array2::<f64>::eye(n);
    while exp > 0 {
        if exp % 2 == 1 {
            result = result.dot(&base);
        }
        exp /= 2;
        if exp > 0 {
            base = base.dot(&base);
        }
    }

    Matrix::new(n, n, result.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_two_by_two() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let a2 = power_ndarray(&a, 2).unwrap();
        assert_eq!(a2.into_rows(), vec![vec![7.0, 10.0], vec![15.0, 22.0]]);
    }

    #[test]
    fn boundary_exponents() {
        let a = Matrix::from_rows(vec![vec![0.5, -2.0], vec![1.5, 3.0]]).unwrap();
        assert_eq!(power_ndarray(&a, 0).unwrap(), Matrix::identity(2).unwrap());
        assert_eq!(power_ndarray(&a, 1).unwrap(), a);
        assert_eq!(power_ndarray(&a, -3), Err(MatrixError::InvalidExponent(-3)));
    }

    #[test]
    fn agrees_with_hand_rolled_product() {
        let a = Matrix::new(3, 3, vec![0.3, -1.2, 0.7, 2.0, 0.1, -0.4, -0.9, 0.6, 1.1]).unwrap();
        let expected = crate::power::power_naive(a.clone(), 7).unwrap();
        assert!(power_ndarray(&a, 7).unwrap().approx_eq(&expected, 1e-12));
    }
}
