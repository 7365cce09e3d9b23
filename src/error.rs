/// Errors raised by matrix construction, multiplication and exponentiation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("invalid exponent {0}: negative powers are not supported")]
    InvalidExponent(i64),
    #[error("invalid matrix: expected a non-empty square matrix, got {rows}x{cols}")]
    InvalidMatrix { rows: usize, cols: usize },
    #[error(
        "dimension mismatch: cannot multiply {left_rows}x{left_cols} by {right_rows}x{right_cols}"
    )]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },
    #[error("a {rows}x{cols} matrix needs {expected} elements, got {found}")]
    DataLength {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
    #[error("a {rows}x{cols} matrix has too many elements to address")]
    TooLarge { rows: usize, cols: usize },
    #[error("row {row} has {found} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}
