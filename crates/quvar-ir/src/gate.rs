//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parameter::ParameterExpression;

/// Axis of a single-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAxis {
    /// Rotation about X.
    X,
    /// Rotation about Y.
    Y,
    /// Rotation about Z.
    Z,
}

impl RotationAxis {
    /// The rotation gate about this axis.
    pub fn gate(self, angle: impl Into<ParameterExpression>) -> StandardGate {
        match self {
            RotationAxis::X => StandardGate::Rx(angle.into()),
            RotationAxis::Y => StandardGate::Ry(angle.into()),
            RotationAxis::Z => StandardGate::Rz(angle.into()),
        }
    }
}

impl fmt::Display for RotationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotationAxis::X => "x",
            RotationAxis::Y => "y",
            RotationAxis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ => 2,
            _ => 1,
        }
    }

    /// The rotation angle, for rotation gates.
    pub fn angle(&self) -> Option<&ParameterExpression> {
        match self {
            StandardGate::Rx(p) | StandardGate::Ry(p) | StandardGate::Rz(p) => Some(p),
            _ => None,
        }
    }

    /// Check if this gate still has a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.angle().is_some_and(ParameterExpression::is_symbolic)
    }

    /// A copy of this gate with its angle bound against `values`.
    #[must_use]
    pub fn bind(&self, values: &[f64]) -> Self {
        match self {
            StandardGate::Rx(p) => StandardGate::Rx(p.bind(values)),
            StandardGate::Ry(p) => StandardGate::Ry(p.bind(values)),
            StandardGate::Rz(p) => StandardGate::Rz(p.bind(values)),
            other => other.clone(),
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(angle) => write!(f, "{}({angle})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CZ.name(), "cz");

        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(ParameterExpression::constant(PI)).is_parameterized());
        assert!(StandardGate::Rx(ParameterExpression::symbol("θ", 0)).is_parameterized());
    }

    #[test]
    fn test_axis_gate() {
        let g = RotationAxis::Y.gate(ParameterExpression::symbol("θ", 2));
        assert_eq!(g.name(), "ry");
        assert_eq!(g.to_string(), "ry(θ[2])");
    }

    #[test]
    fn test_bind_gate() {
        let g = StandardGate::Rz(ParameterExpression::symbol("θ", 0));
        let bound = g.bind(&[0.25]);
        assert_eq!(bound.angle().and_then(ParameterExpression::as_f64), Some(0.25));
        assert!(g.is_parameterized());
        assert_eq!(StandardGate::CX.bind(&[1.0]), StandardGate::CX);
    }
}
