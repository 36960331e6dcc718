//! Parameterized ansatz templates.
//!
//! An ansatz is a parameterized circuit used as the variational trial state.
//! Its gate topology is fixed when the template is built; only the rotation
//! angles change between evaluations, via [`Ansatz::bind`].
//!
//! The EfficientSU2 family alternates a rotation block (Ry then Rz on every
//! qubit) with an entanglement block of CX gates:
//!
//! ```text
//! q0: ─Ry(θ0)─Rz(θ2)─■───────
//! q1: ─Ry(θ1)─Rz(θ3)─X─  ...
//! ```
//!
//! Parameter indices are assigned layer by layer: the Ry angles of one
//! block occupy `base..base+N`, the Rz angles `base+N..base+2N`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::RotationAxis;
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// Name of the parameter vector referenced by ansatz rotations.
pub const PARAMETER_NAME: &str = "θ";

/// CX connectivity of an entanglement block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entanglement {
    /// `(i, i+1)` for ascending `i`.
    #[default]
    Linear,
    /// The linear pairs in descending order.
    ReverseLinear,
    /// `(N-1, 0)` followed by the linear pairs.
    Circular,
    /// Every `(i, j)` with `i < j`.
    Full,
}

impl Entanglement {
    /// The `(control, target)` pairs of one block on `num_qubits` qubits.
    pub fn pairs(self, num_qubits: u32) -> Vec<(u32, u32)> {
        let linear = || (0..num_qubits.saturating_sub(1)).map(|i| (i, i + 1));
        match self {
            Entanglement::Linear => linear().collect(),
            Entanglement::ReverseLinear => linear().rev().collect(),
            Entanglement::Circular if num_qubits > 2 => std::iter::once((num_qubits - 1, 0))
                .chain(linear())
                .collect(),
            Entanglement::Circular => linear().collect(),
            Entanglement::Full => (0..num_qubits)
                .flat_map(|i| (i + 1..num_qubits).map(move |j| (i, j)))
                .collect(),
        }
    }
}

impl fmt::Display for Entanglement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entanglement::Linear => "linear",
            Entanglement::ReverseLinear => "reverse_linear",
            Entanglement::Circular => "circular",
            Entanglement::Full => "full",
        };
        f.write_str(name)
    }
}

/// Builder for EfficientSU2-style templates.
///
/// Defaults to the reference construction: one repetition, linear
/// entanglement, no trailing rotation block.
///
/// ```rust
/// use quvar_ir::{EfficientSu2, Entanglement};
///
/// let ansatz = EfficientSu2::new(3)
///     .with_reps(2)
///     .with_entanglement(Entanglement::Full)
///     .build()
///     .unwrap();
/// assert_eq!(ansatz.num_parameters(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EfficientSu2 {
    num_qubits: u32,
    reps: usize,
    entanglement: Entanglement,
    final_rotation_layer: bool,
}

impl EfficientSu2 {
    /// Start a template over `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            reps: 1,
            entanglement: Entanglement::Linear,
            final_rotation_layer: false,
        }
    }

    /// Number of rotation + entanglement repetitions.
    #[must_use]
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    /// Connectivity of each entanglement block.
    #[must_use]
    pub fn with_entanglement(mut self, entanglement: Entanglement) -> Self {
        self.entanglement = entanglement;
        self
    }

    /// Append a rotation block after the last entanglement block.
    #[must_use]
    pub fn with_final_rotation_layer(mut self, enabled: bool) -> Self {
        self.final_rotation_layer = enabled;
        self
    }

    /// Build the template.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidAnsatz`] for zero qubits or a template without any
    /// rotation block.
    pub fn build(self) -> IrResult<Ansatz> {
        if self.num_qubits == 0 {
            return Err(IrError::InvalidAnsatz(
                "ansatz needs at least one qubit".into(),
            ));
        }
        let rotation_blocks = self.reps + usize::from(self.final_rotation_layer);
        if rotation_blocks == 0 {
            return Err(IrError::InvalidAnsatz(
                "ansatz has no rotation blocks (reps = 0 without a final layer)".into(),
            ));
        }

        let n = self.num_qubits;
        let width = n as usize;
        let pairs = self.entanglement.pairs(n);
        let mut circuit = Circuit::with_size("efficient_su2", n);
        let mut base = 0usize;

        for _ in 0..self.reps {
            rotation_block(&mut circuit, n, base)?;
            base += 2 * width;
            for &(control, target) in &pairs {
                circuit.cx(QubitId(control), QubitId(target))?;
            }
        }
        if self.final_rotation_layer {
            rotation_block(&mut circuit, n, base)?;
        }

        Ok(Ansatz {
            circuit,
            reps: self.reps,
            entanglement: self.entanglement,
            final_rotation_layer: self.final_rotation_layer,
        })
    }
}

fn rotation_block(circuit: &mut Circuit, num_qubits: u32, base: usize) -> IrResult<()> {
    let width = num_qubits as usize;
    for (offset, axis) in [RotationAxis::Y, RotationAxis::Z].into_iter().enumerate() {
        for q in 0..num_qubits {
            let index = base + offset * width + q as usize;
            let theta = ParameterExpression::symbol(PARAMETER_NAME, index);
            circuit.apply(Instruction::single_qubit_gate(
                axis.gate(theta),
                QubitId(q),
            ))?;
        }
    }
    Ok(())
}

/// An immutable parameterized circuit template.
#[derive(Debug, Clone, PartialEq)]
pub struct Ansatz {
    circuit: Circuit,
    reps: usize,
    entanglement: Entanglement,
    final_rotation_layer: bool,
}

impl Ansatz {
    /// Build an EfficientSU2 template without a final rotation block.
    ///
    /// With `reps = 1` and linear entanglement this is the reference
    /// construction: `2N` parameters and a CX chain `(i, i+1)`.
    pub fn build(num_qubits: u32, entanglement: Entanglement, reps: usize) -> IrResult<Self> {
        EfficientSu2::new(num_qubits)
            .with_entanglement(entanglement)
            .with_reps(reps)
            .build()
    }

    /// Bind a parameter vector, producing a concrete circuit.
    ///
    /// # Errors
    ///
    /// [`IrError::ParameterCountMismatch`] unless
    /// `parameters.len() == self.num_parameters()`.
    pub fn bind(&self, parameters: &[f64]) -> IrResult<Circuit> {
        self.circuit.bind(parameters)
    }

    /// Declared parameter count.
    pub fn num_parameters(&self) -> usize {
        self.circuit.num_parameters()
    }

    /// Qubit count.
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }

    /// The symbolic template circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Number of repetitions.
    pub fn reps(&self) -> usize {
        self.reps
    }

    /// Entanglement pattern.
    pub fn entanglement(&self) -> Entanglement {
        self.entanglement
    }

    /// Whether a trailing rotation block is present.
    pub fn has_final_rotation_layer(&self) -> bool {
        self.final_rotation_layer
    }
}
