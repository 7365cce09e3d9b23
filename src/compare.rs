use kanal::{bounded, SendError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use crate::error::MatrixError;
use crate::math::Matrix;
use crate::power::Strategy;
use crate::summary::{max_diagonal, relative_eq};

#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("Send error: {0:?}")]
    Send(#[from] SendError),
    #[error("Std Join error: {0:?}")]
    StdJoin(String),
}

/// Summary of one strategy's run.
#[derive(Clone, Debug)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub max_diagonal: f64,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct ComparisonReport {
    /// One entry per requested strategy, in request order.
    pub outcomes: Vec<StrategyOutcome>,
}

impl ComparisonReport {
    /// Outcomes whose summary differs from the first outcome's by more than `rel_tol`.
    pub fn disagreements(&self, rel_tol: f64) -> Vec<&StrategyOutcome> {
        let Some(first) = self.outcomes.first() else {
            return Vec::new();
        };
        self.outcomes[1..]
            .iter()
            .filter(|outcome| !relative_eq(first.max_diagonal, outcome.max_diagonal, rel_tol))
            .collect()
    }

    pub fn agrees(&self, rel_tol: f64) -> bool {
        self.disagreements(rel_tol).is_empty()
    }
}

/// Runs every strategy in `strategies` on its own thread and its own copy of `a`.
///
/// The threads report back over a kanal channel; the first error from any strategy
/// is returned once all threads have been joined.
pub fn compare_strategies(
    a: &Matrix<f64>,
    p: i64,
    strategies: &[Strategy],
) -> Result<ComparisonReport, ComparisonError> {
    let (sender, receiver) = bounded::<(usize, StrategyOutcome)>(strategies.len());

    let mut handles = Vec::new();

    for (slot, &strategy) in strategies.iter().enumerate() {
        let sender = sender.clone();
        let a = a.clone();
        let handle = thread::spawn(move || -> Result<(), ComparisonError> {
            let start = Instant::now();
            let result = strategy.apply(a, p)?;
            let elapsed = start.elapsed();
            let max_diagonal = max_diagonal(&result)?;

            sender.send((
                slot,
                StrategyOutcome {
                    strategy,
                    max_diagonal,
                    elapsed,
                },
            ))?;

            Ok(())
        });

        handles.push(handle);
    }

    // Drop the sender so the receiver sees the channel close once every thread is done
    drop(sender);

    for handle in handles {
        handle
            .join()
            .map_err(|e| ComparisonError::StdJoin(format!("Thread panicked: {:?}", e)))??;
    }

    let mut results = Vec::with_capacity(strategies.len());
    for (slot, outcome) in receiver {
        info!(
            strategy = %outcome.strategy,
            max_diagonal = outcome.max_diagonal,
            elapsed_us = outcome.elapsed.as_micros() as u64,
            "strategy finished"
        );
        results.push((slot, outcome));
    }
    results.sort_by_key(|(slot, _)| *slot);

    Ok(ComparisonReport {
        outcomes: results.into_iter().map(|(_, outcome)| outcome).collect(),
    })
}
