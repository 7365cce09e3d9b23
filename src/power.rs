use std::fmt;

use tracing::debug;

use crate::error::MatrixError;
use crate::math::{Matrix, Scalar};
use crate::reference::power_ndarray;

/// Multiplications performed by one exponentiation call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerTrace {
    /// Products `result x factor` folded into the running result.
    pub accumulator_products: usize,
    /// Squarings `base x base` of the working base.
    pub squarings: usize,
}

impl PowerTrace {
    pub fn multiplications(&self) -> usize {
        self.accumulator_products + self.squarings
    }
}

pub(crate) fn check_exponent(p: i64) -> Result<u64, MatrixError> {
    u64::try_from(p).map_err(|_| MatrixError::InvalidExponent(p))
}

/// Computes `a^p` by repeated squaring, in O(log p) multiplications.
///
/// `p == 0` yields the identity of `a`'s dimension and `p == 1` returns `a` itself.
///
/// # Errors
/// [`MatrixError::InvalidExponent`] for `p < 0` (checked first), then
/// [`MatrixError::InvalidMatrix`] when `a` is empty or not square.
///
/// # Example
/// ```
/// use matrix_power::{math::Matrix, power::power};
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let a2 = power(a, 2).unwrap();
/// assert_eq!(a2.into_rows(), vec![vec![7.0, 10.0], vec![15.0, 22.0]]);
/// ```
pub fn power<T: Scalar>(a: Matrix<T>, p: i64) -> Result<Matrix<T>, MatrixError> {
    power_traced(a, p).map(|(result, _)| result)
}

/// [`power`], also reporting how many multiplications were needed.
///
/// The exponent is consumed from its least significant bit upwards. The identity
/// accumulator is kept implicit until the first set bit adopts the current base, and
/// the base is not squared again after the most significant bit, so `p = 2^k` costs
/// exactly `k` squarings.
#[tracing::instrument(level = "debug", skip(a), fields(n = a.rows()))]
pub fn power_traced<T: Scalar>(
    a: Matrix<T>,
    p: i64,
) -> Result<(Matrix<T>, PowerTrace), MatrixError> {
    let mut exp = check_exponent(p)?;
    let n = a.require_square()?;
    let mut trace = PowerTrace::default();

    match exp {
        0 => return Ok((Matrix::identity(n)?, trace)),
        1 => return Ok((a, trace)),
        _ => {}
    }

    // None is the identity; result * base^exp == a^p
    let mut result: Option<Matrix<T>> = None;
    let mut base = a;
    loop {
        let bit_set = exp & 1 == 1;
        exp >>= 1;

        if exp == 0 {
            let result = accumulate(result, base, &mut trace)?;
            debug!(
                squarings = trace.squarings,
                accumulator_products = trace.accumulator_products,
                "repeated squaring finished"
            );
            return Ok((result, trace));
        }

        if bit_set {
            result = Some(accumulate(result, base.clone(), &mut trace)?);
        }
        base = base.multiply(&base)?;
        trace.squarings += 1;
    }
}

fn accumulate<T: Scalar>(
    result: Option<Matrix<T>>,
    factor: Matrix<T>,
    trace: &mut PowerTrace,
) -> Result<Matrix<T>, MatrixError> {
    match result {
        None => Ok(factor),
        Some(result) => {
            trace.accumulator_products += 1;
            result.multiply(&factor)
        }
    }
}

/// Computes `a^p` by `p - 1` successive right-multiplications by `a`.
///
/// Boundary handling and errors are the same as for [`power`]. This is the O(p)
/// baseline the repeated squaring strategy is measured against.
///
/// # Example
/// ```
/// use matrix_power::{math::Matrix, power::power_naive};
/// let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let a3 = power_naive(a, 3).unwrap();
/// assert_eq!(a3.into_rows(), vec![vec![37, 54], vec![81, 118]]);
/// ```
pub fn power_naive<T: Scalar>(a: Matrix<T>, p: i64) -> Result<Matrix<T>, MatrixError> {
    power_naive_traced(a, p).map(|(result, _)| result)
}

/// [`power_naive`], also reporting how many multiplications were needed.
#[tracing::instrument(level = "debug", skip(a), fields(n = a.rows()))]
pub fn power_naive_traced<T: Scalar>(
    a: Matrix<T>,
    p: i64,
) -> Result<(Matrix<T>, PowerTrace), MatrixError> {
    let exp = check_exponent(p)?;
    let n = a.require_square()?;
    let mut trace = PowerTrace::default();

    match exp {
        0 => return Ok((Matrix::identity(n)?, trace)),
        1 => return Ok((a, trace)),
        _ => {}
    }

    let mut result = a.clone();
    for _ in 1..exp {
        result = result.multiply(&a)?;
        trace.accumulator_products += 1;
    }

    debug!(
        accumulator_products = trace.accumulator_products,
        "naive multiplication finished"
    );
    Ok((result, trace))
}

/// Algorithm used to raise a `f64` matrix to a power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// [`power_naive`]
    Naive,
    /// [`power`]
    Squaring,
    /// [`power_ndarray`], the library reference
    Reference,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Naive, Strategy::Squaring, Strategy::Reference];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Squaring => "smart",
            Strategy::Reference => "ndarray",
        }
    }

    pub fn apply(self, a: Matrix<f64>, p: i64) -> Result<Matrix<f64>, MatrixError> {
        match self {
            Strategy::Naive => power_naive(a, p),
            Strategy::Squaring => power(a, p),
            Strategy::Reference => power_ndarray(&a, p),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<i64> {
        Matrix::from_rows(vec![vec![1, 1, 0], vec![2, 0, 1], vec![-1, 3, 1]]).unwrap()
    }

    #[test]
    fn squaring_matches_naive_exactly_over_integers() {
        for p in 0..=20 {
            assert_eq!(
                power(sample(), p).unwrap(),
                power_naive(sample(), p).unwrap(),
                "p = {p}"
            );
        }
    }

    #[test]
    fn squaring_trace_counts_bits() {
        // p = 13 = 0b1101: three squarings, three set bits fold into two products
        let (_, trace) = power_traced(sample(), 13).unwrap();
        assert_eq!(
            trace,
            PowerTrace {
                accumulator_products: 2,
                squarings: 3
            }
        );
    }

    #[test]
    fn powers_of_two_need_only_squarings() {
        for k in 1..=10u32 {
            let p = 1i64 << k;
            let (_, squaring) = power_traced(Matrix::<f64>::identity(2).unwrap(), p).unwrap();
            let (_, naive) = power_naive_traced(Matrix::<f64>::identity(2).unwrap(), p).unwrap();
            assert_eq!(squaring.squarings, k as usize);
            assert_eq!(squaring.accumulator_products, 0);
            assert!(squaring.multiplications() <= 2 * k as usize);
            assert_eq!(naive.multiplications(), (p - 1) as usize);
            if p > 4 {
                assert!(squaring.multiplications() < naive.multiplications());
            }
        }
    }

    #[test]
    fn trivial_exponents_multiply_nothing() {
        for p in [0, 1] {
            let (_, trace) = power_traced(sample(), p).unwrap();
            assert_eq!(trace.multiplications(), 0);
            let (_, trace) = power_naive_traced(sample(), p).unwrap();
            assert_eq!(trace.multiplications(), 0);
        }
    }

    #[test]
    fn negative_exponent_is_checked_before_shape() {
        let wide = Matrix::<f64>::zeros(2, 3).unwrap();
        assert_eq!(power(wide.clone(), -1), Err(MatrixError::InvalidExponent(-1)));
        assert_eq!(power_naive(wide.clone(), -5), Err(MatrixError::InvalidExponent(-5)));
        assert_eq!(
            power(wide, 2),
            Err(MatrixError::InvalidMatrix { rows: 2, cols: 3 })
        );
    }
}
