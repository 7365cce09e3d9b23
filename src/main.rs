use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use matrix_power::compare::compare_strategies;
use matrix_power::init::seeded_normal;
use matrix_power::power::Strategy;
use matrix_power::summary::max_diagonal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "matrix-power",
    version,
    about = "Matrix exponentiation using repeated squaring",
    long_about = None
)]
struct Cli {
    /// Size of the square matrix (n x n)
    #[arg(long)]
    size: usize,
    /// Exponent to which the matrix is raised
    #[arg(long, allow_negative_numbers = true)]
    power: i64,
    /// Method used to compute the matrix power
    #[arg(long, value_enum, default_value_t = Mode::Naive)]
    mode: Mode,
    /// Random seed for reproducible matrix initialization
    #[arg(long, default_value_t = 1234)]
    seed: u64,
    /// Relative tolerance for `--mode compare`
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Repeated multiplication, p - 1 products
    Naive,
    /// Repeated squaring, O(log p) products
    Smart,
    /// ndarray's matrix product as a reference
    Ndarray,
    /// Run every method concurrently and check they agree
    Compare,
}

impl Mode {
    fn strategy(self) -> Option<Strategy> {
        match self {
            Mode::Naive => Some(Strategy::Naive),
            Mode::Smart => Some(Strategy::Squaring),
            Mode::Ndarray => Some(Strategy::Reference),
            Mode::Compare => None,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(size = cli.size, power = cli.power, mode = ?cli.mode, seed = cli.seed, "starting");

    let a = seeded_normal(cli.size, cli.seed)?;

    match cli.mode.strategy() {
        Some(strategy) => {
            let result = strategy.apply(a, cli.power)?;
            println!("{}", max_diagonal(&result)?);
        }
        None => {
            let report = compare_strategies(&a, cli.power, &Strategy::ALL)?;
            for outcome in &report.outcomes {
                println!("{} {}", outcome.strategy, outcome.max_diagonal);
            }
            let disagreements = report.disagreements(cli.tolerance);
            if !disagreements.is_empty() {
                let names: Vec<_> = disagreements.iter().map(|o| o.strategy.name()).collect();
                bail!(
                    "{} disagree with {} beyond relative tolerance {}",
                    names.join(", "),
                    report.outcomes[0].strategy,
                    cli.tolerance
                );
            }
        }
    }

    Ok(())
}
