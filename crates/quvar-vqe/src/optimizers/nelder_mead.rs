//! Nelder–Mead downhill simplex.
//!
//! Derivative-free; useful when the objective is noisy or finite differences
//! are too expensive.

use tracing::{debug, warn};

use super::{Counted, OptimizationResult, Optimizer};

/// Nelder–Mead optimizer configuration.
#[derive(Debug, Clone)]
pub struct NelderMead {
    /// Iteration cap; `None` means `200 · n`.
    pub max_iterations: Option<usize>,
    /// Largest allowed vertex distance from the best point, per coordinate.
    pub xatol: f64,
    /// Largest allowed value difference from the best point.
    pub fatol: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: None,
            xatol: 1e-4,
            fatol: 1e-4,
        }
    }
}

impl NelderMead {
    /// Create a new optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set both the coordinate and the value tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.xatol = tol;
        self.fatol = tol;
        self
    }
}

impl Optimizer for NelderMead {
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial_params.len();
        let max_iterations = self.max_iterations.unwrap_or(200 * n);
        let mut objective = Counted::new(objective);

        // Initial simplex: 5% steps, or 0.00025 for zero coordinates.
        let mut simplex: Vec<Vec<f64>> = vec![initial_params.clone()];
        for i in 0..n {
            let mut point = initial_params.clone();
            point[i] = if point[i] == 0.0 {
                0.00025
            } else {
                1.05 * point[i]
            };
            simplex.push(point);
        }
        let mut values: Vec<f64> = simplex.iter().map(|p| objective.eval(p)).collect();
        sort_simplex(&mut simplex, &mut values);

        let mut history = vec![values[0]];
        let mut iterations = 0;
        let mut converged = n == 0 && values[0].is_finite();

        while !converged && iterations < max_iterations {
            // NaN sorts last: a non-finite best vertex leaves nothing to compare.
            if !values[0].is_finite() {
                warn!(iteration = iterations, "nelder-mead objective is not finite");
                break;
            }
            let centroid: Vec<f64> = (0..n)
                .map(|j| simplex[..n].iter().map(|p| p[j]).sum::<f64>() / n as f64)
                .collect();
            let toward = |t: f64, from: &[f64]| -> Vec<f64> {
                centroid
                    .iter()
                    .zip(from)
                    .map(|(c, w)| c + t * (c - w))
                    .collect()
            };

            // Reflection
            let reflected = toward(1.0, &simplex[n]);
            let f_reflected = objective.eval(&reflected);

            if f_reflected < values[0] {
                // Expansion
                let expanded = toward(2.0, &simplex[n]);
                let f_expanded = objective.eval(&expanded);
                if f_expanded < f_reflected {
                    simplex[n] = expanded;
                    values[n] = f_expanded;
                } else {
                    simplex[n] = reflected;
                    values[n] = f_reflected;
                }
            } else if f_reflected < values[n - 1] {
                simplex[n] = reflected;
                values[n] = f_reflected;
            } else {
                // Contraction, outside or inside the simplex
                let (contracted, f_limit) = if f_reflected < values[n] {
                    (toward(0.5, &simplex[n]), f_reflected)
                } else {
                    (toward(-0.5, &simplex[n]), values[n])
                };
                let f_contracted = objective.eval(&contracted);

                if f_contracted <= f_limit {
                    simplex[n] = contracted;
                    values[n] = f_contracted;
                } else {
                    // Shrink towards the best point
                    let best = simplex[0].clone();
                    for i in 1..=n {
                        for j in 0..n {
                            simplex[i][j] = best[j] + 0.5 * (simplex[i][j] - best[j]);
                        }
                        values[i] = objective.eval(&simplex[i]);
                    }
                }
            }

            sort_simplex(&mut simplex, &mut values);
            iterations += 1;
            history.push(values[0]);

            let x_spread = simplex[1..]
                .iter()
                .flat_map(|p| p.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
                .fold(0.0, max_or_nan);
            let f_spread = values[1..]
                .iter()
                .map(|v| (v - values[0]).abs())
                .fold(0.0, max_or_nan);
            debug!(
                iteration = iterations,
                value = values[0],
                x_spread,
                f_spread,
                "nelder-mead iteration"
            );
            converged = values[0].is_finite() && x_spread <= self.xatol && f_spread <= self.fatol;
        }

        if !converged && iterations >= max_iterations {
            warn!(
                iterations,
                value = values[0],
                "nelder-mead reached the iteration cap"
            );
        }

        OptimizationResult {
            optimal_params: simplex.swap_remove(0),
            optimal_value: values[0],
            num_evaluations: objective.evaluations(),
            num_iterations: iterations,
            history,
            converged,
        }
    }
}

/// `f64::max` that lets NaN through instead of dropping it.
fn max_or_nan(acc: f64, x: f64) -> f64 {
    if acc.is_nan() || x.is_nan() { f64::NAN } else { acc.max(x) }
}

/// Order vertices by ascending value, NaN last.
fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or_else(|| values[a].is_nan().cmp(&values[b].is_nan()))
    });
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizers::test_functions::{rosenbrock, shifted_sphere};

    #[test]
    fn test_nelder_mead_simple() {
        let result = NelderMead::new()
            .with_tol(1e-8)
            .with_max_iterations(Some(1000))
            .minimize(|p| (p[0] - 1.0).powi(2) + (p[1] - 2.0).powi(2), vec![0.0, 0.0]);

        assert!(result.converged);
        assert!(result.optimal_value < 1e-8);
        assert!((result.optimal_params[0] - 1.0).abs() < 1e-3);
        assert!((result.optimal_params[1] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_nelder_mead_rosenbrock() {
        let result = NelderMead::new()
            .with_max_iterations(Some(2000))
            .minimize(rosenbrock, vec![-1.2, 1.0]);
        assert!(result.optimal_value < 1e-4);
    }

    #[test]
    fn test_nelder_mead_sphere_3d() {
        let result = NelderMead::new().minimize(shifted_sphere, vec![0.5, 0.5, 0.5]);
        assert!(result.optimal_value < 1e-3);
        assert_eq!(result.history.len(), result.num_iterations + 1);
    }

    #[test]
    fn test_sort_simplex_puts_nan_last() {
        let mut simplex = vec![vec![0.0], vec![1.0], vec![2.0]];
        let mut values = vec![f64::NAN, 3.0, -1.0];
        sort_simplex(&mut simplex, &mut values);
        assert_eq!(simplex, vec![vec![2.0], vec![1.0], vec![0.0]]);
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_nan_everywhere_not_converged() {
        let result = NelderMead::new()
            .with_max_iterations(Some(50))
            .minimize(|_| f64::NAN, vec![0.1, 0.2]);
        assert!(!result.converged);
        assert!(result.optimal_value.is_nan());
    }

    #[test]
    fn test_no_parameters_nan_not_converged() {
        let result = NelderMead::new().minimize(|_| f64::NAN, vec![]);
        assert!(!result.converged);
    }

    #[test]
    fn test_spread_keeps_nan() {
        assert_eq!([1.0, 3.0, 2.0].into_iter().fold(0.0, max_or_nan), 3.0);
        assert!([1.0, f64::NAN, 2.0].into_iter().fold(0.0, max_or_nan).is_nan());
    }
}
