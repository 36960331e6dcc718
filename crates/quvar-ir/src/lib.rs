//! quvar Intermediate Representation
//!
//! This crate provides the data structures shared by the quvar crates:
//! Pauli-sum operators, parameterized circuits and ansatz templates.
//!
//! # Core Components
//!
//! - **Operators**: [`PauliOperator`], a real-weighted sum of Pauli strings
//!   built from `(label, coefficient)` pairs
//! - **Parameters**: [`ParameterExpression`] for symbolic rotation angles
//! - **Gates and instructions**: [`StandardGate`], [`Instruction`]
//! - **Circuit**: [`Circuit`], an ordered gate list with a builder API
//! - **Ansatz**: [`Ansatz`] and the [`EfficientSu2`] builder
//!
//! # Example: Binding an Ansatz
//!
//! ```rust
//! use quvar_ir::{Ansatz, Entanglement};
//!
//! let ansatz = Ansatz::build(2, Entanglement::Linear, 1).unwrap();
//! assert_eq!(ansatz.num_parameters(), 4);
//!
//! let circuit = ansatz.bind(&[0.1, 0.2, 0.3, 0.4]).unwrap();
//! assert!(!circuit.is_parameterized());
//! assert!(ansatz.circuit().is_parameterized());
//! ```

pub mod ansatz;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod operator;
pub mod parameter;
pub mod qubit;

pub use ansatz::{Ansatz, EfficientSu2, Entanglement};
pub use circuit::Circuit;
pub use error::{IrError, IrResult, MalformedTerm};
pub use gate::{RotationAxis, StandardGate};
pub use instruction::Instruction;
pub use operator::{Pauli, PauliOperator, PauliString, PauliTerm};
pub use parameter::{Parameter, ParameterExpression};
pub use qubit::QubitId;
