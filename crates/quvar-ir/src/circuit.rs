//! High-level circuit builder API.

use serde::Serialize;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::parameter::{Parameter, ParameterExpression};
use crate::qubit::QubitId;

/// A quantum circuit: an ordered gate list over a fixed qubit register.
///
/// Instructions are applied in the order they were added. Builder methods
/// validate operands and return `&mut Self` so calls can be chained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate(self.num_qubits)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        ))
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Number of free parameters: one past the highest referenced index.
    pub fn num_parameters(&self) -> usize {
        self.parameters()
            .map(|p| p.index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Free parameters in instruction order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> + '_ {
        self.instructions
            .iter()
            .filter_map(|inst| inst.gate.angle().and_then(ParameterExpression::parameter))
    }

    /// Whether any gate still references a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.instructions.iter().any(Instruction::is_parameterized)
    }

    /// Bind every free parameter, returning a new fully concrete circuit.
    ///
    /// `self` is left untouched, so one template can be bound repeatedly.
    ///
    /// # Errors
    ///
    /// [`IrError::ParameterCountMismatch`] if `values.len()` differs from
    /// [`Circuit::num_parameters`].
    pub fn bind(&self, values: &[f64]) -> IrResult<Circuit> {
        let expected = self.num_parameters();
        if values.len() != expected {
            return Err(IrError::ParameterCountMismatch {
                expected,
                got: values.len(),
            });
        }

        Ok(Circuit {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            instructions: self.instructions.iter().map(|i| i.bind(values)).collect(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Get the circuit depth (longest chain of instructions sharing qubits).
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits()];
        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| levels[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                levels[q.index()] = level;
            }
        }
        levels.into_iter().max().unwrap_or(0)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} qubits, {} ops, {} parameters):",
            self.name,
            self.num_qubits,
            self.instructions.len(),
            self.num_parameters()
        )?;
        for inst in &self.instructions {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}
