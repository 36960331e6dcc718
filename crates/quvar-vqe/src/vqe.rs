//! Variational Quantum Eigensolver driver.
//!
//! VQE approximates an extremal eigenvalue of a Hermitian operator `H` by
//! optimizing the angles `θ` of an ansatz `U(θ)`:
//!
//!   E(θ) = ⟨0|U(θ)† H U(θ)|0⟩
//!
//! The optimizer always minimizes `s · E(θ)`; [`Direction`] only supplies the
//! sign `s`. Non-convergence is reported through
//! [`VqeOutcome::converged`] and is an error only in strict mode.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use quvar_ir::{Ansatz, IrError, PauliOperator};
use quvar_sim::{expectation, expectation_complex, simulate};

use crate::error::{VqeError, VqeResult};
use crate::optimizers::{Method, OptimizerSettings};

/// Relative size above which a discarded imaginary part fails strict mode.
const IMAGINARY_TOLERANCE: f64 = 1e-9;

/// Which extremum to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smallest eigenvalue.
    #[default]
    Minimize,
    /// Largest eigenvalue.
    Maximize,
}

impl Direction {
    /// Sign applied to the expectation before minimizing.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Minimize => 1.0,
            Direction::Maximize => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Minimize => f.write_str("minimize"),
            Direction::Maximize => f.write_str("maximize"),
        }
    }
}

/// Result of a VQE run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VqeOutcome {
    /// Direction of the run.
    pub direction: Direction,
    /// Starting parameters.
    pub initial_params: Vec<f64>,
    /// Parameters at termination.
    pub optimal_params: Vec<f64>,
    /// `Re⟨H⟩` recomputed at `optimal_params`.
    pub optimal_value: f64,
    /// `Im⟨H⟩` at `optimal_params`, discarded from `optimal_value`.
    pub imaginary_part: f64,
    /// Optimizer iterations.
    pub iterations: usize,
    /// Cost function evaluations.
    pub evaluations: usize,
    /// Whether the optimizer met its tolerance.
    pub converged: bool,
    /// Expectation after each accepted iterate.
    pub history: Vec<f64>,
}

/// VQE driver configuration.
#[derive(Debug, Clone, Default)]
pub struct Vqe {
    optimizer: OptimizerSettings,
    strict: bool,
}

impl Vqe {
    /// Create a driver with the default conjugate-gradient optimizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the optimizer settings.
    pub fn with_optimizer(mut self, optimizer: OptimizerSettings) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Select the optimizer algorithm, keeping the other settings.
    pub fn with_method(mut self, method: Method) -> Self {
        self.optimizer.method = method;
        self
    }

    /// Fail on non-convergence or a non-negligible imaginary expectation.
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Current optimizer settings.
    pub fn optimizer(&self) -> &OptimizerSettings {
        &self.optimizer
    }

    /// Whether strict validation is enabled.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Approximate the smallest eigenvalue, from an entropy-seeded start.
    pub fn minimize(&self, operator: &PauliOperator, ansatz: &Ansatz) -> VqeResult<VqeOutcome> {
        self.run(operator, ansatz, Direction::Minimize, &mut StdRng::from_entropy())
    }

    /// Approximate the largest eigenvalue, from an entropy-seeded start.
    pub fn maximize(&self, operator: &PauliOperator, ansatz: &Ansatz) -> VqeResult<VqeOutcome> {
        self.run(operator, ansatz, Direction::Maximize, &mut StdRng::from_entropy())
    }

    /// [`Vqe::minimize`] drawing the start from `rng`.
    pub fn minimize_with_rng<R: Rng + ?Sized>(
        &self,
        operator: &PauliOperator,
        ansatz: &Ansatz,
        rng: &mut R,
    ) -> VqeResult<VqeOutcome> {
        self.run(operator, ansatz, Direction::Minimize, rng)
    }

    /// [`Vqe::maximize`] drawing the start from `rng`.
    pub fn maximize_with_rng<R: Rng + ?Sized>(
        &self,
        operator: &PauliOperator,
        ansatz: &Ansatz,
        rng: &mut R,
    ) -> VqeResult<VqeOutcome> {
        self.run(operator, ansatz, Direction::Maximize, rng)
    }

    /// Run with every initial angle drawn uniformly from `[0, 1)`.
    pub fn run<R: Rng + ?Sized>(
        &self,
        operator: &PauliOperator,
        ansatz: &Ansatz,
        direction: Direction,
        rng: &mut R,
    ) -> VqeResult<VqeOutcome> {
        let initial: Vec<f64> = (0..ansatz.num_parameters())
            .map(|_| rng.r#gen::<f64>())
            .collect();
        self.run_from(operator, ansatz, direction, initial)
    }

    /// Run from an explicit starting point.
    ///
    /// # Errors
    ///
    /// - [`VqeError::QubitMismatch`] if operator and ansatz widths differ
    /// - [`VqeError::Ir`] if `initial` does not have one angle per parameter
    /// - the first evaluation error raised inside the cost function
    /// - [`VqeError::NotConverged`] / [`VqeError::ImaginaryExpectation`] in
    ///   strict mode
    pub fn run_from(
        &self,
        operator: &PauliOperator,
        ansatz: &Ansatz,
        direction: Direction,
        initial: Vec<f64>,
    ) -> VqeResult<VqeOutcome> {
        if operator.num_qubits() != ansatz.num_qubits() {
            return Err(VqeError::QubitMismatch {
                operator: operator.num_qubits(),
                ansatz: ansatz.num_qubits(),
            });
        }
        if initial.len() != ansatz.num_parameters() {
            return Err(IrError::ParameterCountMismatch {
                expected: ansatz.num_parameters(),
                got: initial.len(),
            }
            .into());
        }

        info!(
            %direction,
            qubits = ansatz.num_qubits(),
            parameters = ansatz.num_parameters(),
            terms = operator.num_terms(),
            method = %self.optimizer.method,
            "starting VQE"
        );

        let sign = direction.sign();
        let mut failure: Option<VqeError> = None;
        let cost = |params: &[f64]| match evaluate(operator, ansatz, params) {
            Ok(value) => sign * value,
            Err(e) => {
                failure.get_or_insert(e);
                f64::NAN
            }
        };
        let result = self.optimizer.minimize(cost, initial.clone());
        if let Some(e) = failure {
            return Err(e);
        }

        let state = simulate(&ansatz.bind(&result.optimal_params)?)?;
        let value = expectation_complex(&state, operator)?;

        info!(
            %direction,
            value = value.re,
            converged = result.converged,
            iterations = result.num_iterations,
            evaluations = result.num_evaluations,
            "VQE finished"
        );

        if self.strict {
            if !result.converged || !value.re.is_finite() {
                return Err(VqeError::NotConverged {
                    iterations: result.num_iterations,
                    value: value.re,
                });
            }
            if !imaginary_within_tolerance(value.re, value.im) {
                return Err(VqeError::ImaginaryExpectation {
                    real: value.re,
                    imag: value.im,
                });
            }
        }

        Ok(VqeOutcome {
            direction,
            initial_params: initial,
            optimal_params: result.optimal_params,
            optimal_value: value.re,
            imaginary_part: value.im,
            iterations: result.num_iterations,
            evaluations: result.num_evaluations,
            converged: result.converged,
            history: result.history.iter().map(|v| sign * v).collect(),
        })
    }
}

/// Whether `im` is small next to `max(1, |re|)`. False for non-finite input.
fn imaginary_within_tolerance(re: f64, im: f64) -> bool {
    im.abs() <= IMAGINARY_TOLERANCE * re.abs().max(1.0)
}

/// `Re⟨H⟩` for the ansatz bound to `params`.
pub fn evaluate(operator: &PauliOperator, ansatz: &Ansatz, params: &[f64]) -> VqeResult<f64> {
    let state = simulate(&ansatz.bind(params)?)?;
    Ok(expectation(&state, operator)?)
}
