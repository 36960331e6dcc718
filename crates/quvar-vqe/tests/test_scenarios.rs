//! End-to-end VQE runs on the worked problems.

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use quvar_ir::{Ansatz, Entanglement, PauliOperator};
use quvar_vqe::problems::{ising_zz_chain, ising_zz_chain_ground_energy};
use quvar_vqe::{
    Direction, Method, OptimizerSettings, Quadratic, RootFinder, Vqe, VqeError,
};

fn reference_ansatz(num_qubits: u32) -> Ansatz {
    Ansatz::build(num_qubits, Entanglement::Linear, 1).unwrap()
}

#[test]
fn test_ising_chain_ground_state() {
    let hamiltonian = ising_zz_chain(4).unwrap();
    let ansatz = reference_ansatz(4);
    assert_eq!(ansatz.num_parameters(), 8);

    for seed in [1, 2, 3] {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = Vqe::new()
            .minimize_with_rng(&hamiltonian, &ansatz, &mut rng)
            .unwrap();
        assert_abs_diff_eq!(
            outcome.optimal_value,
            ising_zz_chain_ground_energy(4),
            epsilon = 1e-3
        );
        assert_eq!(outcome.direction, Direction::Minimize);
    }
}

#[test]
fn test_root_of_x_minus_one_squared() {
    let hamiltonian = PauliOperator::from_list([("Z", 0.5), ("I", 0.5)], 1).unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    let outcome = Vqe::new()
        .maximize_with_rng(&hamiltonian, &reference_ansatz(1), &mut rng)
        .unwrap();
    assert_abs_diff_eq!(outcome.optimal_value.abs().sqrt(), 1.0, epsilon = 1e-3);
}

#[test]
fn test_root_of_x_minus_two_squared() {
    let hamiltonian = PauliOperator::from_list([("Z", 1.5), ("I", 2.5)], 1).unwrap();
    let mut rng = StdRng::seed_from_u64(23);
    let outcome = Vqe::new()
        .maximize_with_rng(&hamiltonian, &reference_ansatz(1), &mut rng)
        .unwrap();
    assert_abs_diff_eq!(outcome.optimal_value.abs().sqrt(), 2.0, epsilon = 1e-3);
}

#[test]
fn test_root_finder_matches_hand_built_operator() {
    let finder = RootFinder::new();
    for (b, c, root) in [(-2.0, 1.0, 1.0), (-4.0, 4.0, 2.0)] {
        let q = Quadratic::new(b, c).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let estimate = finder.estimate_with_rng(&q, &mut rng).unwrap();
        assert_abs_diff_eq!(estimate.magnitude, root, epsilon = 1e-3);
        assert_abs_diff_eq!(estimate.expectation, root * root, epsilon = 1e-3);
    }
}

#[test]
fn test_root_finder_with_nelder_mead() {
    let vqe = Vqe::new().with_optimizer(OptimizerSettings {
        method: Method::NelderMead,
        gtol: 1e-8,
        max_iterations: Some(400),
        ..OptimizerSettings::default()
    });
    let q = Quadratic::new(-4.0, 4.0).unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let estimate = RootFinder::new()
        .with_vqe(vqe)
        .estimate_with_rng(&q, &mut rng)
        .unwrap();
    assert_abs_diff_eq!(estimate.magnitude, 2.0, epsilon = 1e-2);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let hamiltonian = ising_zz_chain(3).unwrap();
    let ansatz = reference_ansatz(3);
    let run = || {
        let mut rng = StdRng::seed_from_u64(2024);
        Vqe::new()
            .minimize_with_rng(&hamiltonian, &ansatz, &mut rng)
            .unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.initial_params, b.initial_params);
    assert_eq!(a.optimal_params, b.optimal_params);
    assert_eq!(a.history, b.history);
    assert_eq!(a.evaluations, b.evaluations);
}

#[test]
fn test_maximize_finds_top_of_spectrum() {
    // Largest eigenvalue of the open chain is n - 1 (ferromagnetic state).
    let hamiltonian = ising_zz_chain(3).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let outcome = Vqe::new()
        .maximize_with_rng(&hamiltonian, &reference_ansatz(3), &mut rng)
        .unwrap();
    assert_abs_diff_eq!(outcome.optimal_value, 2.0, epsilon = 1e-3);
    assert!(outcome.imaginary_part.abs() < 1e-12);
}

#[test]
fn test_strict_mode_accepts_converged_run() {
    let hamiltonian = ising_zz_chain(2).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let outcome = Vqe::new()
        .with_strict_validation(true)
        .minimize_with_rng(&hamiltonian, &reference_ansatz(2), &mut rng)
        .unwrap();
    assert!(outcome.converged);
}

#[test]
fn test_strict_mode_rejects_iteration_cap() {
    let hamiltonian = ising_zz_chain(4).unwrap();
    let vqe = Vqe::new()
        .with_optimizer(OptimizerSettings {
            max_iterations: Some(1),
            ..OptimizerSettings::default()
        })
        .with_strict_validation(true);
    let mut rng = StdRng::seed_from_u64(6);
    let err = vqe
        .minimize_with_rng(&hamiltonian, &reference_ansatz(4), &mut rng)
        .unwrap_err();
    assert!(matches!(err, VqeError::NotConverged { .. }));
}
