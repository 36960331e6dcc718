//! Statevector simulation engine.

use num_complex::Complex64;
use tracing::trace;

use quvar_ir::{Circuit, Instruction, IrError, ParameterExpression, StandardGate};

use crate::error::{SimError, SimResult};

/// Widest circuit the dense statevector accepts (2^24 amplitudes, 256 MiB).
pub const MAX_QUBITS: usize = 24;

/// A statevector representing a pure quantum state.
///
/// Basis index bit `k` is the state of qubit `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension of the state space, `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Measurement probabilities `|ψ_b|²` in the computational basis.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Squared norm `⟨ψ|ψ⟩`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Apply an instruction to the statevector.
    ///
    /// # Errors
    ///
    /// - [`IrError::QubitNotFound`], [`IrError::QubitCountMismatch`] or
    ///   [`IrError::DuplicateQubit`] if the operands do not fit this state
    /// - [`IrError::UnboundParameter`] if the gate angle is still symbolic
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        instruction.validate(self.num_qubits as u32)?;
        let q = |k: usize| instruction.qubits[k].index();
        match &instruction.gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(q(0)),
            StandardGate::Y => self.apply_y(q(0)),
            StandardGate::Z => self.apply_z(q(0)),
            StandardGate::H => self.apply_h(q(0)),
            StandardGate::Rx(theta) => self.apply_rx(q(0), bound_angle(theta)?),
            StandardGate::Ry(theta) => self.apply_ry(q(0), bound_angle(theta)?),
            StandardGate::Rz(theta) => self.apply_rz(q(0), bound_angle(theta)?),
            StandardGate::CX => self.apply_cx(q(0), q(1)),
            StandardGate::CZ => self.apply_cz(q(0), q(1)),
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.dim() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.dim() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let both = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }
}

fn bound_angle(theta: &ParameterExpression) -> SimResult<f64> {
    theta
        .as_f64()
        .ok_or_else(|| IrError::UnboundParameter(theta.to_string()).into())
}

/// Apply every instruction of `circuit`, in order, to |0…0⟩.
///
/// # Errors
///
/// - [`SimError::TooManyQubits`] above [`MAX_QUBITS`]
/// - [`SimError::Ir`] wrapping [`IrError::UnboundParameter`] if any angle is
///   still symbolic
pub fn simulate(circuit: &Circuit) -> SimResult<Statevector> {
    let num_qubits = circuit.num_qubits();
    if num_qubits > MAX_QUBITS {
        return Err(SimError::TooManyQubits {
            requested: num_qubits,
            max: MAX_QUBITS,
        });
    }

    let mut state = Statevector::new(num_qubits);
    for instruction in circuit.instructions() {
        state.apply(instruction)?;
    }
    trace!(
        circuit = circuit.name(),
        qubits = num_qubits,
        ops = circuit.num_ops(),
        "simulated circuit"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quvar_ir::QubitId;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.dim(), 4);
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(1.0, 0.0)));
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hadamard() {
        let mut c = Circuit::with_size("h", 1);
        c.h(QubitId(0)).unwrap();
        let sv = simulate(&c).unwrap();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(h, 0.0)));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(h, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut c = Circuit::with_size("bell", 2);
        c.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let probs = simulate(&c).unwrap().probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!(probs[1].abs() < 1e-12);
        assert!(probs[2].abs() < 1e-12);
        assert!((probs[3] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_qubit_zero_is_least_significant() {
        let mut c = Circuit::with_size("x1", 3);
        c.x(QubitId(1)).unwrap();
        let sv = simulate(&c).unwrap();
        assert!(approx_eq(sv.amplitudes()[0b010], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_ry_pi_flips() {
        let mut c = Circuit::with_size("ry", 1);
        c.ry(PI, QubitId(0)).unwrap();
        let sv = simulate(&c).unwrap();
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_rz_phases() {
        let mut c = Circuit::with_size("rz", 1);
        c.h(QubitId(0)).unwrap().rz(PI / 2.0, QubitId(0)).unwrap();
        let sv = simulate(&c).unwrap();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!(approx_eq(sv.amplitudes()[0], Complex64::from_polar(h, -PI / 4.0)));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::from_polar(h, PI / 4.0)));
    }

    #[test]
    fn test_rx_matches_h_z_h() {
        // Rx(θ) = H Rz(θ) H
        let theta = 0.7;
        let mut a = Circuit::with_size("rx", 1);
        a.ry(0.4, QubitId(0)).unwrap().rx(theta, QubitId(0)).unwrap();
        let mut b = Circuit::with_size("hzh", 1);
        b.ry(0.4, QubitId(0))
            .unwrap()
            .h(QubitId(0))
            .unwrap()
            .rz(theta, QubitId(0))
            .unwrap()
            .h(QubitId(0))
            .unwrap();
        let sa = simulate(&a).unwrap();
        let sb = simulate(&b).unwrap();
        for (x, y) in sa.amplitudes().iter().zip(sb.amplitudes()) {
            assert!(approx_eq(*x, *y));
        }
    }

    #[test]
    fn test_y_and_cz() {
        let mut c = Circuit::with_size("ycz", 2);
        c.y(QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .cz(QubitId(0), QubitId(1))
            .unwrap();
        let sv = simulate(&c).unwrap();
        // Y|0⟩ = i|1⟩, then CZ on |11⟩ flips the sign.
        assert!(approx_eq(sv.amplitudes()[0b11], Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_unbound_parameter_rejected() {
        let mut c = Circuit::with_size("sym", 1);
        c.ry(ParameterExpression::symbol("θ", 0), QubitId(0)).unwrap();
        let err = simulate(&c).unwrap_err();
        assert!(matches!(err, SimError::Ir(IrError::UnboundParameter(_))));
    }

    #[test]
    fn test_too_many_qubits() {
        let c = Circuit::with_size("wide", 25);
        assert!(matches!(
            simulate(&c),
            Err(SimError::TooManyQubits {
                requested: 25,
                max: 24
            })
        ));
    }

    #[test]
    fn test_apply_rejects_bad_operands() {
        let mut sv = Statevector::new(1);
        let x = Instruction::single_qubit_gate(StandardGate::X, QubitId(3));
        assert!(matches!(
            sv.apply(&x),
            Err(SimError::Ir(IrError::QubitNotFound {
                qubit: QubitId(3),
                ..
            }))
        ));

        let short_cx = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        assert!(matches!(
            sv.apply(&short_cx),
            Err(SimError::Ir(IrError::QubitCountMismatch { .. }))
        ));

        // Rejected instructions leave the state untouched.
        assert_eq!(sv, Statevector::new(1));
    }
}
