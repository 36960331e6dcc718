//! CLI command implementations.

pub mod common;
pub mod ising;
pub mod root;
pub mod run;
