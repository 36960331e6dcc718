//! YAML run configuration.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`QUVAR_` prefix)
//! 2. Configuration file
//! 3. Default values

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use quvar_ir::{Ansatz, EfficientSu2, Entanglement, PauliOperator};

use crate::error::{ConfigError, VqeResult};
use crate::optimizers::OptimizerSettings;
use crate::vqe::{Direction, Vqe, VqeOutcome};

/// One VQE run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Operator to extremize
    pub operator: OperatorConfig,

    /// Trial-state template
    #[serde(default)]
    pub ansatz: AnsatzConfig,

    /// Minimize or maximize
    #[serde(default)]
    pub direction: Direction,

    /// Optimizer settings
    #[serde(default)]
    pub optimizer: OptimizerSettings,

    /// Seed for the initial parameter draw; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Fail on non-convergence or an imaginary expectation
    #[serde(default)]
    pub strict: bool,
}

/// Weighted Pauli-string sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorConfig {
    /// Width of every label
    pub num_qubits: usize,
    /// Terms in order
    pub terms: Vec<TermConfig>,
}

/// A single `coeff * label` term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermConfig {
    /// Pauli label, rightmost character on qubit 0
    pub label: String,
    /// Real coefficient
    pub coeff: f64,
}

/// EfficientSU2 settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnsatzConfig {
    /// Rotation + entanglement blocks
    pub reps: usize,
    /// Two-qubit coupling pattern
    pub entanglement: Entanglement,
    /// Trailing rotation block
    pub final_rotation_layer: bool,
}

impl Default for AnsatzConfig {
    fn default() -> Self {
        Self {
            reps: 1,
            entanglement: Entanglement::Linear,
            final_rotation_layer: false,
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RunConfig =
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QUVAR_*` environment overrides.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Variables that are absent leave the corresponding fields unchanged.
    /// Present but unparsable values are rejected.
    pub fn merge_env_from<L>(mut self, lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QUVAR_SEED") {
            self.seed = Some(parse_env("QUVAR_SEED", &v)?);
        }
        if let Some(v) = lookup("QUVAR_STRICT") {
            self.strict = parse_env("QUVAR_STRICT", &v)?;
        }
        if let Some(v) = lookup("QUVAR_MAX_ITERATIONS") {
            self.optimizer.max_iterations = Some(parse_env("QUVAR_MAX_ITERATIONS", &v)?);
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.operator.num_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "operator.num_qubits must be at least 1".to_string(),
            ));
        }
        if self.operator.num_qubits > quvar_sim::MAX_QUBITS {
            return Err(ConfigError::ValidationError(format!(
                "operator.num_qubits is {} but at most {} are supported",
                self.operator.num_qubits,
                quvar_sim::MAX_QUBITS
            )));
        }
        if self.operator.terms.is_empty() {
            return Err(ConfigError::ValidationError(
                "operator.terms must not be empty".to_string(),
            ));
        }
        if self.ansatz.reps == 0 && !self.ansatz.final_rotation_layer {
            return Err(ConfigError::ValidationError(
                "ansatz needs reps >= 1 or a final rotation layer".to_string(),
            ));
        }
        if !(self.optimizer.gtol.is_finite() && self.optimizer.gtol > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "optimizer.gtol must be positive, got {}",
                self.optimizer.gtol
            )));
        }
        if !(self.optimizer.epsilon.is_finite() && self.optimizer.epsilon > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "optimizer.epsilon must be positive, got {}",
                self.optimizer.epsilon
            )));
        }
        if self.optimizer.max_iterations == Some(0) {
            return Err(ConfigError::ValidationError(
                "optimizer.max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the operator.
    pub fn build_operator(&self) -> VqeResult<PauliOperator> {
        let terms = self
            .operator
            .terms
            .iter()
            .map(|t| (t.label.as_str(), t.coeff));
        Ok(PauliOperator::from_list(terms, self.operator.num_qubits)?)
    }

    /// Build the ansatz on `operator.num_qubits` qubits.
    pub fn build_ansatz(&self) -> VqeResult<Ansatz> {
        Ok(EfficientSu2::new(self.operator.num_qubits as u32)
            .with_reps(self.ansatz.reps)
            .with_entanglement(self.ansatz.entanglement)
            .with_final_rotation_layer(self.ansatz.final_rotation_layer)
            .build()?)
    }

    /// Driver configured from this run.
    pub fn vqe(&self) -> Vqe {
        Vqe::new()
            .with_optimizer(self.optimizer.clone())
            .with_strict_validation(self.strict)
    }

    /// Build everything and run.
    pub fn run(&self) -> VqeResult<VqeOutcome> {
        let operator = self.build_operator()?;
        let ansatz = self.build_ansatz()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.vqe().run(&operator, &ansatz, self.direction, &mut rng)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::ValidationError(format!("{key}={value:?}: {e}")))
}
