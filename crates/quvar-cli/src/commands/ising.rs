//! Ising chain command implementation.

use anyhow::{Context, Result};
use console::style;

use quvar_ir::{Ansatz, Entanglement};
use quvar_vqe::Vqe;
use quvar_vqe::problems::{ising_zz_chain, ising_zz_chain_ground_energy};

use super::common::{print_outcome, print_result, rng_from_seed, spinner};

/// Execute the ising command.
pub fn execute(qubits: usize, seed: Option<u64>) -> Result<()> {
    println!(
        "{} Ising ZZ chain on {} sites",
        style("→").cyan().bold(),
        style(qubits).green()
    );

    let hamiltonian = ising_zz_chain(qubits)?;
    let width = u32::try_from(qubits).context("Too many sites")?;
    let ansatz = Ansatz::build(width, Entanglement::Linear, 1)?;
    println!(
        "  Ansatz: {} parameters, depth {}",
        ansatz.num_parameters(),
        ansatz.circuit().depth()
    );

    let mut rng = rng_from_seed(seed);
    let progress = spinner("Optimizing...")?;
    let outcome = Vqe::new().minimize_with_rng(&hamiltonian, &ansatz, &mut rng);
    progress.finish_and_clear();
    let outcome = outcome.context("VQE run failed")?;

    print_outcome(&outcome);
    print_result("exact", format!("{:.6}", ising_zz_chain_ground_energy(qubits)));
    Ok(())
}
