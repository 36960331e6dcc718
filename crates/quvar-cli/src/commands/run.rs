//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use quvar_vqe::RunConfig;

use super::common::{print_outcome, print_result, spinner};

/// Execute the run command.
pub fn execute(config_path: &str, json: bool) -> Result<()> {
    let config = RunConfig::from_file(config_path)
        .and_then(RunConfig::merge_env)
        .with_context(|| format!("Failed to load run configuration: {config_path}"))?;
    debug!(?config, "loaded run configuration");

    if json {
        let outcome = config.run()?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} Running {} ({})",
        style("→").cyan().bold(),
        style(config_path).green(),
        style(config.direction).yellow()
    );
    let operator = config.build_operator()?;
    print_result("qubits", operator.num_qubits());
    print_result("terms", operator.num_terms());
    print_result("optimizer", config.optimizer.method);
    if let Some(seed) = config.seed {
        print_result("seed", seed);
    }

    let progress = spinner("Optimizing...")?;
    let outcome = config.run();
    progress.finish_and_clear();

    print_outcome(&outcome.context("VQE run failed")?);
    Ok(())
}
