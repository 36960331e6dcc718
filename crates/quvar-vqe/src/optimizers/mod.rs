//! Classical optimizers for variational algorithms.
//!
//! All optimizers minimize. Maximization is done by the caller negating the
//! objective.

mod conjugate_gradient;
mod nelder_mead;

pub use conjugate_gradient::ConjugateGradient;
pub use nelder_mead::NelderMead;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameter values.
    pub optimal_params: Vec<f64>,
    /// Optimal objective value.
    pub optimal_value: f64,
    /// Number of function evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// History of objective values, one per accepted iterate.
    pub history: Vec<f64>,
    /// Whether the optimization met its tolerance.
    pub converged: bool,
}

/// A local minimizer of a real objective.
pub trait Optimizer {
    /// Minimize `objective` starting from `initial_params`.
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64;
}

/// Which optimizer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Nonlinear conjugate gradient with finite-difference gradients.
    #[default]
    ConjugateGradient,
    /// Derivative-free downhill simplex.
    NelderMead,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::ConjugateGradient => f.write_str("conjugate_gradient"),
            Method::NelderMead => f.write_str("nelder_mead"),
        }
    }
}

/// Method choice plus the tolerances shared by both optimizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerSettings {
    /// Algorithm.
    pub method: Method,
    /// Gradient tolerance (conjugate gradient) or simplex tolerance
    /// (Nelder–Mead).
    pub gtol: f64,
    /// Iteration cap; `None` means `200 · num_parameters`.
    pub max_iterations: Option<usize>,
    /// Finite-difference step.
    pub epsilon: f64,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            method: Method::ConjugateGradient,
            gtol: conjugate_gradient::DEFAULT_GTOL,
            max_iterations: None,
            epsilon: f64::EPSILON.sqrt(),
        }
    }
}

impl OptimizerSettings {
    /// Run the configured optimizer.
    pub fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        match self.method {
            Method::ConjugateGradient => ConjugateGradient::new()
                .with_gtol(self.gtol)
                .with_epsilon(self.epsilon)
                .with_max_iterations(self.max_iterations)
                .minimize(objective, initial_params),
            Method::NelderMead => NelderMead::new()
                .with_tol(self.gtol)
                .with_max_iterations(self.max_iterations)
                .minimize(objective, initial_params),
        }
    }
}

/// Objective wrapper that counts evaluations.
pub(crate) struct Counted<F> {
    objective: F,
    evaluations: usize,
}

impl<F: FnMut(&[f64]) -> f64> Counted<F> {
    pub(crate) fn new(objective: F) -> Self {
        Self {
            objective,
            evaluations: 0,
        }
    }

    pub(crate) fn eval(&mut self, x: &[f64]) -> f64 {
        self.evaluations += 1;
        (self.objective)(x)
    }

    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations
    }
}
