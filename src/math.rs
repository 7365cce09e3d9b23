use num_traits::{One, Zero};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;
use std::ops::{AddAssign, Index, Mul};

use crate::error::MatrixError;
use crate::summary::relative_eq;

/// Element type a [`Matrix`] can be multiplied and exponentiated over.
///
/// Implemented for every type with the listed arithmetic, so `f64`, the primitive
/// integers and `num_bigint::BigUint` all qualify.
pub trait Scalar: Clone + Zero + One + AddAssign + Mul<Output = Self> + Send + Sync {}

impl<T> Scalar for T where T: Clone + Zero + One + AddAssign + Mul<Output = T> + Send + Sync {}

// Products needing at least this many multiply-adds have their rows split across rayon workers.
const PARALLEL_WORK_THRESHOLD: usize = 1 << 15;

// Dense row-major matrix
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T = f64> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Builds a `rows x cols` matrix from row-major `data`.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        let expected = element_count(rows, cols)?;
        if data.len() != expected {
            return Err(MatrixError::DataLength {
                rows,
                cols,
                expected,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from a list of rows, rejecting rows of differing length.
    ///
    /// An empty list produces the empty `0x0` matrix.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        let row_count = rows.len();
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Dimension `n` of a non-empty square matrix, `None` for any other shape.
    pub fn dim(&self) -> Option<usize> {
        (self.is_square() && self.rows > 0).then_some(self.rows)
    }

    /// Like [`Matrix::dim`], but reports other shapes as [`MatrixError::InvalidMatrix`].
    pub fn require_square(&self) -> Result<usize, MatrixError> {
        self.dim().ok_or(MatrixError::InvalidMatrix {
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Entries `M[i][i]` for `i` in `0..min(rows, cols)`.
    pub fn diagonal(&self) -> impl Iterator<Item = &T> + '_ {
        self.data
            .iter()
            .step_by(self.cols + 1)
            .take(self.rows.min(self.cols))
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return (0..self.rows).map(|_| Vec::new()).collect();
        }
        let cols = self.cols;
        let mut rows = Vec::with_capacity(self.rows);
        let mut values = self.data.into_iter();
        for _ in 0..self.rows {
            rows.push(values.by_ref().take(cols).collect());
        }
        rows
    }
}

impl<T: Scalar> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Ok(Self {
            rows,
            cols,
            data: vec![T::zero(); element_count(rows, cols)?],
        })
    }

    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        let mut identity = Self::zeros(n, n)?;
        for i in 0..n {
            identity.data[i * n + i] = T::one();
        }
        Ok(identity)
    }

    /// Matrix product `self x other`.
    ///
    /// Every output entry is accumulated over the inner index in increasing order,
    /// whether or not the rows are computed in parallel, so the result does not
    /// depend on the number of rayon workers.
    pub fn multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }

        let (m, k, n) = (self.rows, self.cols, other.cols);
        let mut product = Self::zeros(m, n)?;
        if m == 0 || n == 0 {
            return Ok(product);
        }

        if m.saturating_mul(k).saturating_mul(n) >= PARALLEL_WORK_THRESHOLD {
            product
                .data
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, out)| {
                    multiply_row(&self.data[i * k..(i + 1) * k], &other.data, out)
                });
        } else {
            product
                .data
                .chunks_mut(n)
                .enumerate()
                .for_each(|(i, out)| {
                    multiply_row(&self.data[i * k..(i + 1) * k], &other.data, out)
                });
        }

        Ok(product)
    }
}

pub(crate) fn element_count(rows: usize, cols: usize) -> Result<usize, MatrixError> {
    rows.checked_mul(cols).ok_or(MatrixError::TooLarge { rows, cols })
}

// out[j] += sum_p lhs_row[p] * rhs[p][j], in i-k-j order
fn multiply_row<T: Scalar>(lhs_row: &[T], rhs: &[T], out: &mut [T]) {
    let n = out.len();
    for (p, a) in lhs_row.iter().enumerate() {
        for (c, b) in out.iter_mut().zip(&rhs[p * n..(p + 1) * n]) {
            *c += a.clone() * b.clone();
        }
    }
}

impl Matrix<f64> {
    /// Largest absolute entry, `0.0` for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, x| acc.max(x.abs()))
    }

    /// Element-wise comparison relative to the larger of the two matrices' magnitudes.
    ///
    /// Entries `x`, `y` match when they are [`relative_eq`], or when `|x - y|` is within
    /// `rel_tol` of the largest absolute entry of either matrix. Shapes must be equal.
    pub fn approx_eq(&self, other: &Matrix<f64>, rel_tol: f64) -> bool {
        if self.rows != other.rows || self.cols != other.cols {
            return false;
        }
        let scale = self.max_abs().max(other.max_abs());
        self.data
            .iter()
            .zip(&other.data)
            .all(|(&x, &y)| relative_eq(x, y, rel_tol) || (x - y).abs() <= rel_tol * scale)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for a {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}
