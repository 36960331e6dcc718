//! Toy quadratic root finder.
//!
//! A monic quadratic `p(x) = x² + bx + c` is evaluated on the projector
//! `x → (I − Z)/2`. Because that projector is idempotent,
//!
//!   p((I − Z)/2) = (1 + b)·(I − Z)/2 + c·I
//!                = −(1 + b)/2 · Z + ((1 + b)/2 + c) · I
//!
//! a single-qubit operator. The square root of its largest expectation,
//! found with VQE, is taken as the root magnitude.
//!
//! This only recovers `|root|` for double-root polynomials such as
//! `(x − 1)²` and `(x − 2)²`. It gives no sign and no second root.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use quvar_ir::{Ansatz, Entanglement, PauliOperator};

use crate::error::{VqeError, VqeResult};
use crate::vqe::{Direction, Vqe, VqeOutcome};

/// A monic quadratic `x² + bx + c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadratic {
    /// Linear coefficient.
    pub b: f64,
    /// Constant coefficient.
    pub c: f64,
}

impl Quadratic {
    /// Create a quadratic, rejecting non-finite coefficients.
    pub fn new(b: f64, c: f64) -> VqeResult<Self> {
        if !b.is_finite() || !c.is_finite() {
            return Err(VqeError::InvalidPolynomial(format!(
                "coefficients must be finite, got b = {b}, c = {c}"
            )));
        }
        Ok(Self { b, c })
    }

    /// Value at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        x * x + self.b * x + self.c
    }

    /// Single-qubit operator `p((I − Z)/2)`.
    pub fn to_operator(&self) -> VqeResult<PauliOperator> {
        let half = (1.0 + self.b) / 2.0;
        Ok(PauliOperator::from_list(
            [("Z", -half), ("I", half + self.c)],
            1,
        )?)
    }
}

impl fmt::Display for Quadratic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x²")?;
        for (coeff, suffix) in [(self.b, "x"), (self.c, "")] {
            if coeff != 0.0 {
                let sign = if coeff < 0.0 { '-' } else { '+' };
                write!(f, " {sign} {}{suffix}", coeff.abs())?;
            }
        }
        Ok(())
    }
}

/// Estimated root magnitude and the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootEstimate {
    /// `sqrt(|⟨H⟩|)` at the optimum.
    pub magnitude: f64,
    /// Largest expectation found.
    pub expectation: f64,
    /// The underlying VQE run.
    pub outcome: VqeOutcome,
}

/// Runs the quadratic encoding through a [`Vqe`] driver.
#[derive(Debug, Clone, Default)]
pub struct RootFinder {
    vqe: Vqe,
}

impl RootFinder {
    /// Create a finder with the default driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific driver configuration.
    pub fn with_vqe(mut self, vqe: Vqe) -> Self {
        self.vqe = vqe;
        self
    }

    /// Estimate `|root|` from an entropy-seeded start.
    pub fn estimate(&self, polynomial: &Quadratic) -> VqeResult<RootEstimate> {
        self.estimate_with_rng(polynomial, &mut StdRng::from_entropy())
    }

    /// Estimate `|root|`, drawing the start from `rng`.
    pub fn estimate_with_rng<R: Rng + ?Sized>(
        &self,
        polynomial: &Quadratic,
        rng: &mut R,
    ) -> VqeResult<RootEstimate> {
        let operator = polynomial.to_operator()?;
        let ansatz = Ansatz::build(1, Entanglement::Linear, 1)?;
        let outcome = self
            .vqe
            .run(&operator, &ansatz, Direction::Maximize, rng)?;

        Ok(RootEstimate {
            magnitude: outcome.optimal_value.abs().sqrt(),
            expectation: outcome.optimal_value,
            outcome,
        })
    }
}
