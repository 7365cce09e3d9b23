use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::MatrixError;
use crate::math::{element_count, Matrix};

/// Fills an `n x n` matrix with independent standard-normal draws from `rng`.
pub fn random_normal<R: Rng>(n: usize, rng: &mut R) -> Result<Matrix<f64>, MatrixError> {
    if n == 0 {
        return Err(MatrixError::InvalidMatrix { rows: 0, cols: 0 });
    }
    let len = element_count(n, n)?;
    let data: Vec<f64> = (0..len).map(|_| rng.sample(StandardNormal)).collect();
    Matrix::new(n, n, data)
}

/// [`random_normal`] driven by a `StdRng` seeded with `seed`; equal seeds give equal matrices.
pub fn seeded_normal(n: usize, seed: u64) -> Result<Matrix<f64>, MatrixError> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_normal(n, &mut rng)
}
