//! Error types for the VQE crate.

use thiserror::Error;

/// Errors produced by the VQE driver and the worked problems.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VqeError {
    /// Operator construction or parameter binding failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] quvar_ir::IrError),

    /// Statevector evaluation failed.
    #[error("Simulation error: {0}")]
    Sim(#[from] quvar_sim::SimError),

    /// Operator and ansatz act on a different number of qubits.
    #[error("Operator acts on {operator} qubits but the ansatz has {ansatz}")]
    QubitMismatch {
        /// Qubit count of the operator.
        operator: usize,
        /// Qubit count of the ansatz.
        ansatz: usize,
    },

    /// Strict mode: the optimizer stopped without meeting its tolerance.
    #[error("Optimizer did not converge after {iterations} iterations (last value {value})")]
    NotConverged {
        /// Iterations performed.
        iterations: usize,
        /// Expectation value at termination.
        value: f64,
    },

    /// Strict mode: the expectation carries a non-negligible imaginary part.
    #[error("Expectation value {real} has imaginary part {imag}")]
    ImaginaryExpectation {
        /// Real part.
        real: f64,
        /// Imaginary part.
        imag: f64,
    },

    /// Polynomial coefficients cannot be encoded.
    #[error("Invalid polynomial: {0}")]
    InvalidPolynomial(String),

    /// Problem size outside the supported range.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Run configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors loading or validating a run configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// The file is not valid YAML for a run.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A value is out of range or inconsistent.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for VQE operations.
pub type VqeResult<T> = Result<T, VqeError>;
