//! Shared helpers for CLI commands.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;

use quvar_vqe::VqeOutcome;

/// Seeded generator, or one drawn from OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Spinner shown while the optimizer runs.
pub fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Print a labelled value.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print the common part of a VQE outcome.
pub fn print_outcome(outcome: &VqeOutcome) {
    let mark = if outcome.converged {
        style("✓").green().bold()
    } else {
        style("!").yellow().bold()
    };
    println!(
        "\n{} {} {}",
        mark,
        style(outcome.direction).bold(),
        style(format!("{:.6}", outcome.optimal_value)).cyan()
    );
    print_result("converged", outcome.converged);
    print_result("iterations", outcome.iterations);
    print_result("evaluations", outcome.evaluations);
    if outcome.imaginary_part != 0.0 {
        print_result("imaginary part", format!("{:.3e}", outcome.imaginary_part));
    }
    let params: Vec<String> = outcome
        .optimal_params
        .iter()
        .map(|p| format!("{p:.4}"))
        .collect();
    print_result("parameters", format!("[{}]", params.join(", ")));
}
