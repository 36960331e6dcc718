//! Variational Quantum Eigensolver.
//!
//! This crate drives a classical optimizer over the angles of an
//! [`Ansatz`](quvar_ir::Ansatz) to find an extremal expectation value of a
//! [`PauliOperator`](quvar_ir::PauliOperator), evaluated exactly with
//! `quvar-sim`.
//!
//! # Components
//!
//! - [`Vqe`]: the driver, with [`Direction`] selecting minimum or maximum
//! - [`optimizers`]: conjugate gradient and Nelder–Mead behind [`Optimizer`]
//! - [`problems`]: operator builders for worked problems
//! - [`roots`]: the single-qubit quadratic root-magnitude encoding
//! - [`config`]: YAML run descriptions
//!
//! # Example
//!
//! ```rust
//! use quvar_ir::{Ansatz, Entanglement};
//! use quvar_vqe::{Vqe, problems};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let hamiltonian = problems::ising_zz_chain(2).unwrap();
//! let ansatz = Ansatz::build(2, Entanglement::Linear, 1).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let outcome = Vqe::new()
//!     .minimize_with_rng(&hamiltonian, &ansatz, &mut rng)
//!     .unwrap();
//! assert!(outcome.optimal_value < -0.99);
//! ```

pub mod config;
pub mod error;
pub mod optimizers;
pub mod problems;
pub mod roots;
pub mod vqe;

pub use config::RunConfig;
pub use error::{ConfigError, VqeError, VqeResult};
pub use optimizers::{
    ConjugateGradient, Method, NelderMead, OptimizationResult, Optimizer, OptimizerSettings,
};
pub use roots::{Quadratic, RootEstimate, RootFinder};
pub use vqe::{Direction, Vqe, VqeOutcome, evaluate};
