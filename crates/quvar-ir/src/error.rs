//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Why a Pauli term was rejected by the operator builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedTerm {
    /// Label length differs from the operator's qubit count.
    #[error("label has length {got}, expected {expected}")]
    LengthMismatch {
        /// Declared qubit count.
        expected: usize,
        /// Length of the offending label.
        got: usize,
    },

    /// Label contains a character outside {I, X, Y, Z}.
    #[error("invalid Pauli character '{0}'")]
    InvalidPauli(char),

    /// Coefficient is NaN or infinite.
    #[error("coefficient {0} is not finite")]
    NonFiniteCoefficient(f64),
}

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A Pauli term could not be turned into an operator term.
    #[error("Malformed operator term '{label}': {reason}")]
    MalformedOperator {
        /// The label as supplied by the caller.
        label: String,
        /// What was wrong with it.
        reason: MalformedTerm,
    },

    /// Parameter vector length differs from the template's parameter count.
    #[error("Expected {expected} parameters, got {got}")]
    ParameterCountMismatch {
        /// Declared parameter count of the template.
        expected: usize,
        /// Length of the supplied vector.
        got: usize,
    },

    /// Two operators act on a different number of qubits.
    #[error("Operator acts on {left} qubits but the other operand acts on {right}")]
    OperatorSizeMismatch {
        /// Qubit count of the left operand.
        left: usize,
        /// Qubit count of the right operand.
        right: usize,
    },

    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Parameter is unbound.
    #[error("Parameter '{0}' is unbound")]
    UnboundParameter(String),

    /// Ansatz options cannot produce a circuit.
    #[error("Invalid ansatz: {0}")]
    InvalidAnsatz(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
