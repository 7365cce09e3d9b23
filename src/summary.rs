use crate::error::MatrixError;
use crate::math::Matrix;

/// Relative tolerance used when comparing `f64` results of different strategies.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Returns the largest entry on the diagonal of a non-empty square matrix.
///
/// Any unordered diagonal entry (a NaN for floats) is returned as the maximum, the
/// way numeric reductions propagate it.
///
/// # Errors
/// [`MatrixError::InvalidMatrix`] when `m` is empty or not square.
///
/// # Example
/// ```
/// use matrix_power::{math::Matrix, summary::max_diagonal};
/// let m = Matrix::from_rows(vec![vec![7.0, 10.0], vec![15.0, 22.0]]).unwrap();
/// assert_eq!(max_diagonal(&m).unwrap(), 22.0);
/// ```
pub fn max_diagonal<T: Clone + PartialOrd>(m: &Matrix<T>) -> Result<T, MatrixError> {
    m.require_square()?;

    let mut diagonal = m.diagonal();
    let mut best = match diagonal.next() {
        Some(first) => first,
        None => {
            return Err(MatrixError::InvalidMatrix {
                rows: m.rows(),
                cols: m.cols(),
            })
        }
    };
    for entry in diagonal {
        if is_unordered(best) {
            break;
        }
        if is_unordered(entry) || entry > best {
            best = entry;
        }
    }
    Ok(best.clone())
}

fn is_unordered<T: PartialOrd>(x: &T) -> bool {
    x.partial_cmp(x).is_none()
}

/// `true` when `a` and `b` differ by at most `rel_tol` times the larger magnitude.
///
/// Exactly equal values always match, so equal infinities compare equal.
pub fn relative_eq(a: f64, b: f64, rel_tol: f64) -> bool {
    a == b || (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}
