//! Newton-Raphson root-finding solver.

use super::engine::{run_iterations, ConvergenceCheck, IterationOutcome, IterativeMethod};
use super::SolverConfig;
use crate::math::analysis::{bounds_abs_first_derivative, bounds_abs_second_derivative};
use crate::math::equation::Equation;
use crate::types::{AprioriEstimate, ProblemDefinition};

/// Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
///
/// # Convergence
///
/// Two conditions are checked before iterating; a violation is reported
/// but does not stop the run:
/// - Fourier's condition `f(x0) * f''(x0) > 0`;
/// - `q = M2 * (b - a) / (2 * m1) < 1`, with `m1 = min |f'|` and
///   `M2 = max |f''|` over `[a, b]`.
///
/// The a-priori estimate follows from quadratic error contraction
/// `e_{n+1} <= q * e_n^2 / e_0`, evaluated with
/// `e_0 = max(|x0 - a|, |x0 - b|)`:
///
/// `n = floor(log2(ln(e_0 / eps) / ln(1 / q) + 1)) + 1`
///
/// It is unavailable unless `0 < q < 1`.
///
/// # Failure
///
/// If `|f'(x)|` drops below `SolverConfig::derivative_tolerance` the
/// update is undefined; the run stops with
/// `SolveStatus::DerivativeTooSmall` instead of producing infinities.
///
/// # Example
///
/// ```
/// use solver_core::math::equation::Equation;
/// use solver_core::math::solvers::{EquationSolver, NewtonSolver};
/// use solver_core::types::{AprioriEstimate, ProblemDefinition};
///
/// let problem = ProblemDefinition::new("Root near 1", 1.0, 2.0).with_newton_guess(1.5);
/// let result = NewtonSolver::with_defaults()
///     .solve(&Equation::cubic(), &problem, 1e-6)
///     .unwrap();
///
/// assert!((result.root - 1.0).abs() < 1e-6);
/// assert_eq!(result.apriori_iterations, AprioriEstimate::Iterations(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewtonSolver {
    config: SolverConfig,
}

impl NewtonSolver {
    /// Create a Newton solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// One Newton update from `x`.
    ///
    /// Returns `None` when `|f'(x)|` is below the derivative tolerance.
    pub fn step(&self, equation: &Equation, x: f64) -> Option<f64> {
        let f_prime_val = equation.derivative(x);
        if f_prime_val.abs() < self.config.derivative_tolerance {
            return None;
        }
        Some(x - equation.f(x) / f_prime_val)
    }

    /// `q = M2 * initial_error / (2 * m1)` over the problem interval.
    ///
    /// Infinite or NaN when `m1` is zero.
    pub fn contraction_ratio(
        equation: &Equation,
        problem: &ProblemDefinition,
        initial_error: f64,
    ) -> f64 {
        let m1 = bounds_abs_first_derivative(equation, problem.a, problem.b).min;
        let m2_max = bounds_abs_second_derivative(equation, problem.a, problem.b).max;
        (m2_max * initial_error) / (2.0 * m1)
    }
}

impl IterativeMethod for NewtonSolver {
    const NAME: &'static str = "Newton's method";

    fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn initial_guess(&self, problem: &ProblemDefinition) -> Option<f64> {
        problem.newton_initial_guess
    }

    fn check_convergence(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        x0: f64,
    ) -> ConvergenceCheck {
        let mut check = ConvergenceCheck::new();

        if equation.f(x0) * equation.second_derivative(x0) <= 0.0 {
            check.flag("f(x0) * f''(x0) <= 0, convergence not guaranteed.");
        }

        let q = Self::contraction_ratio(equation, problem, problem.width());
        // NaN (0/0) counts as a violation too.
        if !(q < 1.0) {
            check.flag("q >= 1, convergence not guaranteed.");
        }

        check
    }

    fn estimate_apriori(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        x0: f64,
        epsilon: f64,
    ) -> AprioriEstimate {
        let initial_error = problem.max_distance_to_bounds(x0);
        let q = Self::contraction_ratio(equation, problem, initial_error);
        if !(q > 0.0 && q < 1.0) {
            return AprioriEstimate::Unavailable;
        }

        let temp = (initial_error / epsilon).ln() / (1.0 / q).ln();
        AprioriEstimate::from_raw((temp + 1.0).log2().floor() + 1.0)
    }

    fn iterate(
        &self,
        equation: &Equation,
        _problem: &ProblemDefinition,
        x0: f64,
        epsilon: f64,
    ) -> IterationOutcome {
        run_iterations(x0, epsilon, self.config.max_iterations, |x| {
            self.step(equation, x)
        })
    }
}
