//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while evaluating circuits and expectation values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit is wider than the dense statevector can hold.
    #[error("Circuit has {requested} qubits, the statevector supports at most {max}")]
    TooManyQubits {
        /// Qubit count of the circuit.
        requested: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Operator and state span a different number of qubits.
    #[error("Operator acts on {operator} qubits but the state has {state}")]
    OperatorSizeMismatch {
        /// Qubit count of the operator.
        operator: usize,
        /// Qubit count of the state.
        state: usize,
    },

    /// Circuit IR error, e.g. an unbound rotation angle.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] quvar_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
