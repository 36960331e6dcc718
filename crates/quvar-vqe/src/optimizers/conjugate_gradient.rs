//! Nonlinear conjugate gradient (Polak–Ribière+).
//!
//! Gradients come from forward finite differences, so each gradient costs
//! `n` extra objective evaluations. Each iteration runs a line search that
//! satisfies the strong Wolfe conditions
//!
//!   f(x + αd) ≤ f(x) + c1·α·∇f·d
//!   |∇f(x + αd)·d| ≤ c2·|∇f·d|
//!
//! and updates the direction with β = max(0, g₁·(g₁ − g₀) / g₀·g₀).

use tracing::{debug, warn};

use super::{Counted, OptimizationResult, Optimizer};

/// Default infinity-norm gradient tolerance.
pub(crate) const DEFAULT_GTOL: f64 = 1e-5;

const C1: f64 = 1e-4;
const C2: f64 = 0.4;
const MAX_BRACKET_STEPS: usize = 20;
const MAX_ZOOM_STEPS: usize = 30;

/// Conjugate-gradient optimizer configuration.
#[derive(Debug, Clone)]
pub struct ConjugateGradient {
    /// Stop once `max |∂f/∂x_i| <= gtol`.
    pub gtol: f64,
    /// Iteration cap; `None` means `200 · n`.
    pub max_iterations: Option<usize>,
    /// Absolute finite-difference step.
    pub epsilon: f64,
}

impl Default for ConjugateGradient {
    fn default() -> Self {
        Self {
            gtol: DEFAULT_GTOL,
            max_iterations: None,
            epsilon: f64::EPSILON.sqrt(),
        }
    }
}

impl ConjugateGradient {
    /// Create a new optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gradient tolerance.
    pub fn with_gtol(mut self, gtol: f64) -> Self {
        self.gtol = gtol;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the finite-difference step.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// A trial point along the search direction.
#[derive(Debug, Clone)]
struct LinePoint {
    alpha: f64,
    x: Vec<f64>,
    f: f64,
    g: Vec<f64>,
    /// Directional derivative `g · d`.
    slope: f64,
}

struct Search<'a, F> {
    objective: &'a mut Counted<F>,
    epsilon: f64,
}

impl<F: FnMut(&[f64]) -> f64> Search<'_, F> {
    fn gradient(&mut self, x: &[f64], fx: f64) -> Vec<f64> {
        let mut shifted = x.to_vec();
        (0..x.len())
            .map(|i| {
                shifted[i] = x[i] + self.epsilon;
                let f_step = self.objective.eval(&shifted);
                shifted[i] = x[i];
                (f_step - fx) / self.epsilon
            })
            .collect()
    }

    fn point(&mut self, x0: &[f64], d: &[f64], alpha: f64) -> LinePoint {
        let x: Vec<f64> = x0.iter().zip(d).map(|(xi, di)| xi + alpha * di).collect();
        let f = self.objective.eval(&x);
        let g = self.gradient(&x, f);
        let slope = dot(&g, d);
        LinePoint {
            alpha,
            x,
            f,
            g,
            slope,
        }
    }

    /// Find a step satisfying the strong Wolfe conditions.
    ///
    /// Returns `None` if no acceptable step was found or the objective stopped
    /// being finite.
    fn wolfe(&mut self, start: &LinePoint, d: &[f64], alpha1: f64) -> Option<LinePoint> {
        let mut prev = LinePoint {
            alpha: 0.0,
            ..start.clone()
        };
        let mut alpha = alpha1;

        for i in 0..MAX_BRACKET_STEPS {
            let cur = self.point(&start.x, d, alpha);
            if !cur.f.is_finite() {
                return None;
            }
            if cur.f > start.f + C1 * alpha * start.slope || (i > 0 && cur.f >= prev.f) {
                return self.zoom(start, d, prev, cur);
            }
            if cur.slope.abs() <= -C2 * start.slope {
                return Some(cur);
            }
            if cur.slope >= 0.0 {
                return self.zoom(start, d, cur, prev);
            }
            prev = cur;
            alpha *= 2.0;
        }
        None
    }

    fn zoom(
        &mut self,
        start: &LinePoint,
        d: &[f64],
        mut lo: LinePoint,
        mut hi: LinePoint,
    ) -> Option<LinePoint> {
        for _ in 0..MAX_ZOOM_STEPS {
            let (a_min, a_max) = if lo.alpha < hi.alpha {
                (lo.alpha, hi.alpha)
            } else {
                (hi.alpha, lo.alpha)
            };
            if a_max - a_min <= f64::EPSILON * a_max.max(1.0) {
                break;
            }

            // Minimizer of the quadratic through (lo.f, lo.slope) and hi.f,
            // kept away from the interval ends.
            let delta = hi.alpha - lo.alpha;
            let curvature = 2.0 * (hi.f - lo.f - lo.slope * delta);
            let margin = 0.1 * (a_max - a_min);
            let alpha = if curvature > 0.0 {
                let a = lo.alpha - lo.slope * delta * delta / curvature;
                if a.is_finite() && a > a_min + margin && a < a_max - margin {
                    a
                } else {
                    0.5 * (a_min + a_max)
                }
            } else {
                0.5 * (a_min + a_max)
            };

            let cur = self.point(&start.x, d, alpha);
            if !cur.f.is_finite() {
                return None;
            }
            if cur.f > start.f + C1 * alpha * start.slope || cur.f >= lo.f {
                hi = cur;
            } else {
                if cur.slope.abs() <= -C2 * start.slope {
                    return Some(cur);
                }
                if cur.slope * (hi.alpha - lo.alpha) >= 0.0 {
                    hi = lo;
                }
                lo = cur;
            }
        }

        // Fall back to the best sufficient-decrease point, if any.
        (lo.alpha > 0.0).then_some(lo)
    }
}

impl Optimizer for ConjugateGradient {
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial_params.len();
        let max_iterations = self.max_iterations.unwrap_or(200 * n);
        let mut counted = Counted::new(objective);
        let mut search = Search {
            objective: &mut counted,
            epsilon: self.epsilon,
        };

        let f0 = search.objective.eval(&initial_params);
        let g0 = search.gradient(&initial_params, f0);
        let mut current = LinePoint {
            alpha: 0.0,
            slope: 0.0,
            x: initial_params,
            f: f0,
            g: g0,
        };
        let mut history = vec![f0];
        let mut iterations = 0;
        let mut gnorm = inf_norm(&current.g);
        let mut converged = current.f.is_finite() && gnorm <= self.gtol;

        let mut direction: Vec<f64> = current.g.iter().map(|gi| -gi).collect();
        let mut old_old_f = current.f + dot(&current.g, &current.g).sqrt() / 2.0;

        while !converged && iterations < max_iterations {
            current.slope = dot(&current.g, &direction);
            if current.slope >= 0.0 || current.slope.is_nan() {
                // Not a descent direction: restart along steepest descent.
                direction = current.g.iter().map(|gi| -gi).collect();
                current.slope = -dot(&current.g, &current.g);
            }

            let alpha1 = {
                let a = 1.01 * 2.0 * (current.f - old_old_f) / current.slope;
                if a.is_finite() && a > 0.0 { a.min(1.0) } else { 1.0 }
            };

            let Some(next) = search.wolfe(&current, &direction, alpha1) else {
                warn!(
                    iteration = iterations,
                    value = current.f,
                    gnorm,
                    "line search failed to find a Wolfe step"
                );
                break;
            };

            let g_sq = dot(&current.g, &current.g);
            let beta = if g_sq > 0.0 {
                let y: Vec<f64> = next.g.iter().zip(&current.g).map(|(a, b)| a - b).collect();
                (dot(&next.g, &y) / g_sq).max(0.0)
            } else {
                0.0
            };
            direction = next
                .g
                .iter()
                .zip(&direction)
                .map(|(gi, di)| -gi + beta * di)
                .collect();

            old_old_f = current.f;
            let step = next.alpha;
            current = next;
            iterations += 1;
            history.push(current.f);
            gnorm = inf_norm(&current.g);
            debug!(iteration = iterations, value = current.f, gnorm, step, "cg iteration");

            converged = current.f.is_finite() && gnorm <= self.gtol;
        }

        if !converged && iterations >= max_iterations {
            warn!(
                iterations,
                value = current.f,
                gnorm,
                "conjugate gradient reached the iteration cap"
            );
        }

        OptimizationResult {
            optimal_params: current.x,
            optimal_value: current.f,
            num_evaluations: counted.evaluations(),
            num_iterations: iterations,
            history,
            converged,
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Largest absolute entry, NaN if any entry is NaN.
fn inf_norm(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |acc: f64, x| {
        if x.is_nan() { f64::NAN } else { acc.max(x.abs()) }
    })
}
