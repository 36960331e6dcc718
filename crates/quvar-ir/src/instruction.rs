//! Circuit instructions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate applied to an ordered list of qubits.
///
/// For controlled gates the first operand is the control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: StandardGate,
    /// The qubits the gate acts on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q0: QubitId, q1: QubitId) -> Self {
        Self::gate(gate, [q0, q1])
    }

    /// Whether the gate still references a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.gate.is_parameterized()
    }

    /// Check the operands against a register of `num_qubits` qubits.
    ///
    /// # Errors
    ///
    /// - [`IrError::QubitCountMismatch`] if the operand count does not match the gate
    /// - [`IrError::QubitNotFound`] for an operand outside the register
    /// - [`IrError::DuplicateQubit`] if an operand repeats
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let gate_name = self.gate.name();
        let expected = self.gate.num_qubits();
        let got = self.qubits.len() as u32;
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate_name.to_string(),
                expected,
                got,
            });
        }

        for (i, &qubit) in self.qubits.iter().enumerate() {
            if qubit.0 >= num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(gate_name.to_string()),
                });
            }
            if self.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate_name.to_string()),
                });
            }
        }
        Ok(())
    }

    /// A copy with the gate angle bound against `values`.
    #[must_use]
    pub fn bind(&self, values: &[f64]) -> Self {
        Self {
            gate: self.gate.bind(values),
            qubits: self.qubits.clone(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        for (i, q) in self.qubits.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{q}")?;
        }
        Ok(())
    }
}
