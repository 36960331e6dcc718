//! Operators for the worked problems.

use quvar_ir::PauliOperator;

use crate::error::{VqeError, VqeResult};

/// Ground energy of [`ising_zz_chain`]: `-(n - 1)`, reached by any
/// antiferromagnetic basis state.
pub fn ising_zz_chain_ground_energy(num_qubits: usize) -> f64 {
    -(num_qubits.saturating_sub(1) as f64)
}

/// Nearest-neighbour ZZ chain with open boundaries:
///
///   H = Σ_{i=0}^{n-2} Z_i Z_{i+1}
///
/// For `n = 4` the labels are `ZZII`, `IZZI`, `IIZZ`.
///
/// # Errors
///
/// [`VqeError::InvalidProblem`] for fewer than two sites.
pub fn ising_zz_chain(num_qubits: usize) -> VqeResult<PauliOperator> {
    if num_qubits < 2 {
        return Err(VqeError::InvalidProblem(format!(
            "an Ising chain needs at least 2 sites, got {num_qubits}"
        )));
    }

    // Label position p acts on qubit n-1-p; the bond order matches the
    // textbook listing from the left end of the chain.
    let terms = (0..num_qubits - 1).map(|p| {
        let label: String = (0..num_qubits)
            .map(|k| if k == p || k == p + 1 { 'Z' } else { 'I' })
            .collect();
        (label, 1.0)
    });
    Ok(PauliOperator::from_list(terms, num_qubits)?)
}
