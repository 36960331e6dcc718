//! Tests for ansatz templates and parameter binding.

use proptest::prelude::*;

use quvar_ir::{Ansatz, EfficientSu2, Entanglement, IrError, StandardGate};

#[test]
fn reference_template_counts() {
    for n in 1..=5u32 {
        let ansatz = Ansatz::build(n, Entanglement::Linear, 1).unwrap();
        assert_eq!(ansatz.num_parameters(), 2 * n as usize);
        let cx = ansatz
            .circuit()
            .instructions()
            .iter()
            .filter(|i| i.gate == StandardGate::CX)
            .count();
        assert_eq!(cx, n as usize - 1);
    }
}

#[test]
fn full_entanglement_gate_count() {
    let ansatz = EfficientSu2::new(4)
        .with_entanglement(Entanglement::Full)
        .with_reps(2)
        .with_final_rotation_layer(true)
        .build()
        .unwrap();
    // 3 rotation blocks of 8 gates, 2 entanglement blocks of 6 CX.
    assert_eq!(ansatz.circuit().num_ops(), 3 * 8 + 2 * 6);
    assert_eq!(ansatz.num_parameters(), 24);
    assert_eq!(ansatz.reps(), 2);
    assert_eq!(ansatz.entanglement(), Entanglement::Full);
}

#[test]
fn bind_twice_keeps_template() {
    let ansatz = Ansatz::build(2, Entanglement::Linear, 1).unwrap();
    let before = ansatz.clone();

    let a = ansatz.bind(&[0.0; 4]).unwrap();
    let b = ansatz.bind(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_ne!(a, b);
    assert_eq!(ansatz, before);
    assert!(ansatz.circuit().is_parameterized());
}

#[test]
fn bound_angles_follow_parameter_order() {
    let ansatz = Ansatz::build(2, Entanglement::Linear, 1).unwrap();
    let bound = ansatz.bind(&[0.1, 0.2, 0.3, 0.4]).unwrap();
    let angles: Vec<f64> = bound
        .instructions()
        .iter()
        .filter_map(|i| i.gate.angle().and_then(|a| a.as_f64()))
        .collect();
    assert_eq!(angles, vec![0.1, 0.2, 0.3, 0.4]);
}

proptest! {
    /// Any vector whose length differs from P is rejected.
    #[test]
    fn wrong_length_always_rejected(
        qubits in prop::sample::select(vec![1u32, 4, 8]),
        len in 0usize..40,
    ) {
        let ansatz = Ansatz::build(qubits, Entanglement::Linear, 1).unwrap();
        let p = ansatz.num_parameters();
        prop_assume!(len != p);

        let err = ansatz.bind(&vec![0.5; len]).unwrap_err();
        let matches_counts = matches!(
            err,
            IrError::ParameterCountMismatch { expected, got } if expected == p && got == len
        );
        prop_assert!(matches_counts);
    }

    /// A vector of exactly P angles always binds.
    #[test]
    fn correct_length_always_binds(
        qubits in 1u32..6,
        reps in 1usize..3,
        seed_angle in -3.0f64..3.0,
    ) {
        let ansatz = Ansatz::build(qubits, Entanglement::Circular, reps).unwrap();
        let values = vec![seed_angle; ansatz.num_parameters()];
        let bound = ansatz.bind(&values).unwrap();
        prop_assert!(!bound.is_parameterized());
        prop_assert_eq!(bound.num_ops(), ansatz.circuit().num_ops());
    }
}
