//! Quadratic root command implementation.

use anyhow::{Context, Result};
use console::style;

use quvar_vqe::{Quadratic, RootFinder};

use super::common::{print_outcome, print_result, rng_from_seed, spinner};

/// Execute the root command.
pub fn execute(b: f64, c: f64, seed: Option<u64>) -> Result<()> {
    let polynomial = Quadratic::new(b, c)?;
    println!(
        "{} Root magnitude of {}",
        style("→").cyan().bold(),
        style(polynomial).green()
    );
    print_result("operator", polynomial.to_operator()?);

    let mut rng = rng_from_seed(seed);
    let progress = spinner("Optimizing...")?;
    let estimate = RootFinder::new().estimate_with_rng(&polynomial, &mut rng);
    progress.finish_and_clear();
    let estimate = estimate.context("Root estimation failed")?;

    print_outcome(&estimate.outcome);
    println!(
        "\n{} |root| ≈ {}",
        style("✓").green().bold(),
        style(format!("{:.6}", estimate.magnitude)).cyan().bold()
    );
    Ok(())
}
