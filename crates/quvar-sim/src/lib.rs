//! Exact statevector evaluation for quvar circuits.
//!
//! Applies a fully bound [`quvar_ir::Circuit`] to |0…0⟩ and evaluates
//! expectation values of [`quvar_ir::PauliOperator`]s against the result.
//! Qubit `k` is bit `k` of the basis index.
//!
//! # Quick start
//!
//! ```rust
//! use quvar_ir::{Ansatz, Entanglement, PauliOperator};
//! use quvar_sim::{expectation, simulate};
//!
//! let ansatz = Ansatz::build(1, Entanglement::Linear, 1).unwrap();
//! let h = PauliOperator::from_list([("Z", 0.5), ("I", 0.5)], 1).unwrap();
//!
//! // Ry(0)Rz(0)|0⟩ = |0⟩, so ⟨H⟩ = 1.
//! let state = simulate(&ansatz.bind(&[0.0, 0.0]).unwrap()).unwrap();
//! let value = expectation(&state, &h).unwrap();
//! assert!((value - 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod expectation;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use expectation::{expectation, expectation_complex};
pub use statevector::{MAX_QUBITS, Statevector, simulate};
