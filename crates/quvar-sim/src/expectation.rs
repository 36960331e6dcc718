//! Expectation values of Pauli-sum operators.
//!
//! For each term `c·P`, `P|b⟩ = φ_b·|b'⟩` for every basis state, so
//!
//!   ⟨ψ|P|ψ⟩ = Σ_b  conj(ψ_{b'}) · φ_b · ψ_b
//!
//! which needs one pass over the amplitudes and no extra state copy.

use num_complex::Complex64;

use quvar_ir::{PauliOperator, PauliString};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Full complex `⟨ψ|H|ψ⟩`.
///
/// The imaginary part is zero for a Hermitian operator up to rounding.
///
/// # Errors
///
/// [`SimError::OperatorSizeMismatch`] if the widths differ.
pub fn expectation_complex(state: &Statevector, operator: &PauliOperator) -> SimResult<Complex64> {
    if operator.num_qubits() != state.num_qubits() {
        return Err(SimError::OperatorSizeMismatch {
            operator: operator.num_qubits(),
            state: state.num_qubits(),
        });
    }

    Ok(operator
        .terms()
        .iter()
        .map(|term| pauli_expectation(state.amplitudes(), &term.pauli) * term.coeff)
        .sum())
}

/// `Re⟨ψ|H|ψ⟩`. The imaginary part is discarded without a check.
///
/// # Errors
///
/// [`SimError::OperatorSizeMismatch`] if the widths differ.
pub fn expectation(state: &Statevector, operator: &PauliOperator) -> SimResult<f64> {
    expectation_complex(state, operator).map(|z| z.re)
}

fn pauli_expectation(amplitudes: &[Complex64], pauli: &PauliString) -> Complex64 {
    if pauli.is_identity() {
        return amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().into();
    }
    amplitudes
        .iter()
        .enumerate()
        .map(|(b, amp)| {
            let (image, phase) = pauli.apply_to_basis(b);
            amplitudes[image].conj() * phase * amp
        })
        .sum()
}
