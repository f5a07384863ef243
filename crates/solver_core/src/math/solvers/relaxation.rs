//! Relaxation (simple-iteration) root-finding solver.

use tracing::warn;

use super::engine::{run_iterations, ConvergenceCheck, IterationOutcome, IterativeMethod};
use super::SolverConfig;
use crate::math::analysis::bounds_abs_first_derivative;
use crate::math::equation::Equation;
use crate::types::{AprioriEstimate, ProblemDefinition};

/// Relaxation method: `x_{n+1} = x_n - sign(f'(x_n)) * tau * f(x_n)`.
///
/// The step size `tau = 2 / (m1 + M1)` minimises the worst-case
/// contraction factor `q0 = (M1 - m1) / (M1 + m1)` over `[a, b]`, where
/// `m1` and `M1` bound `|f'|` on the interval.
///
/// Convergence is guaranteed when `0 < m1 < M1`. The a-priori estimate is
/// the linear contraction bound `floor(ln(e_0 / eps) / ln(1 / q0)) + 1`
/// with `e_0 = max(|x0 - a|, |x0 - b|)`, unavailable unless
/// `0 < q0 < 1`.
///
/// # Example
///
/// ```
/// use solver_core::math::equation::Equation;
/// use solver_core::math::solvers::{EquationSolver, RelaxationSolver};
/// use solver_core::types::ProblemDefinition;
///
/// let problem = ProblemDefinition::new("Root near -3", -4.0, -2.5).with_relaxation_guess(-3.5);
/// let result = RelaxationSolver::with_defaults()
///     .solve(&Equation::cubic(), &problem, 1e-8)
///     .unwrap();
///
/// assert!((result.root + 3.0).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelaxationSolver {
    config: SolverConfig,
}

impl RelaxationSolver {
    /// Create a relaxation solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Optimal step size `2 / (m1 + M1)` over `[a, b]`.
    ///
    /// `None` when both derivative bounds vanish.
    pub fn optimal_tau(equation: &Equation, a: f64, b: f64) -> Option<f64> {
        let bounds = bounds_abs_first_derivative(equation, a, b);
        let sum = bounds.min + bounds.max;
        (sum > 0.0).then(|| 2.0 / sum)
    }

    /// One relaxation update from `x` with step size `tau`.
    ///
    /// Returns `None` when `|f'(x)|` is below the derivative tolerance, where
    /// the direction of the update is undefined.
    pub fn step(&self, equation: &Equation, x: f64, tau: f64) -> Option<f64> {
        let f_prime_val = equation.derivative(x);
        if f_prime_val.abs() < self.config.derivative_tolerance {
            return None;
        }
        Some(x - f_prime_val.signum() * tau * equation.f(x))
    }
}

impl IterativeMethod for RelaxationSolver {
    const NAME: &'static str = "Relaxation Method";

    fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn initial_guess(&self, problem: &ProblemDefinition) -> Option<f64> {
        problem.relaxation_initial_guess
    }

    fn check_convergence(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        _x0: f64,
    ) -> ConvergenceCheck {
        let bounds = bounds_abs_first_derivative(equation, problem.a, problem.b);
        let mut check = ConvergenceCheck::new();
        if !(0.0 < bounds.min && bounds.min < bounds.max) {
            check.flag("0 >= m1 or m1 >= M1, convergence not guaranteed.");
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
        let bounds = bounds_abs_first_derivative(equation, problem.a, problem.b);
        let (m1, m1_max) = (bounds.min, bounds.max);

        if m1 + m1_max <= 0.0 {
            return AprioriEstimate::Unavailable;
        }

        let q0 = (m1_max - m1) / (m1_max + m1);
        if !(q0 > 0.0 && q0 < 1.0) {
            return AprioriEstimate::Unavailable;
        }

        let initial_error = problem.max_distance_to_bounds(x0);
        let temp = (initial_error / epsilon).ln() / (1.0 / q0).ln();
        AprioriEstimate::from_raw(temp.floor() + 1.0)
    }

    fn iterate(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        x0: f64,
        epsilon: f64,
    ) -> IterationOutcome {
        let Some(tau) = Self::optimal_tau(equation, problem.a, problem.b) else {
            warn!("derivative bounds vanish on the interval, step size undefined");
            return IterationOutcome::DerivativeTooSmall {
                x: x0,
                iterations: 0,
            };
        };

        run_iterations(x0, epsilon, self.config.max_iterations, |x| {
            self.step(equation, x, tau)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::solvers::EquationSolver;
    use crate::types::SolveStatus;
    use approx::assert_relative_eq;

    fn relaxation_problem(a: f64, b: f64, x0: f64) -> ProblemDefinition {
        ProblemDefinition::new("test", a, b).with_relaxation_guess(x0)
    }

    #[test]
    fn test_step_matches_formula() {
        // f(1.5) = 5.625, f'(1.5) = 14.75 > 0
        let solver = RelaxationSolver::with_defaults();
        let next = solver.step(&Equation::cubic(), 1.5, 0.1).unwrap();
        assert_relative_eq!(next, 1.5 - 0.5625, epsilon = 1e-15);
    }

    #[test]
    fn test_step_undefined_where_derivative_vanishes() {
        let eq = Equation::new("x^2 - 1 = 0", |x| x * x - 1.0, |x| 2.0 * x, |_| 2.0);
        assert!(RelaxationSolver::with_defaults().step(&eq, 0.0, 0.5).is_none());
    }

    #[test]
    fn test_optimal_tau() {
        // m1 = 8, M1 = 23 on [1, 2]
        let tau = RelaxationSolver::optimal_tau(&Equation::cubic(), 1.0, 2.0).unwrap();
        assert_relative_eq!(tau, 2.0 / 31.0);
    }

    #[test]
    fn test_optimal_tau_undefined_for_flat_function() {
        let eq = Equation::new("1 = 0", |_| 1.0, |_| 0.0, |_| 0.0);
        assert!(RelaxationSolver::optimal_tau(&eq, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_finds_root_near_one() {
        let result = RelaxationSolver::with_defaults()
            .solve(&Equation::cubic(), &relaxation_problem(1.0, 2.0, 1.5), 1e-6)
            .unwrap();

        assert_eq!(result.status, SolveStatus::Converged);
        assert_relative_eq!(result.root, 1.0, epsilon = 1e-5);
        assert_eq!(result.aposteriori_iterations, 18);
        assert_eq!(result.apriori_iterations, AprioriEstimate::Iterations(19));
        assert_eq!(result.comments, "Convergence conditions satisfied.");
        assert_eq!(result.method_name, "Relaxation Method");
    }

    #[test]
    fn test_vertex_interval() {
        // m1 = 3.25, M1 = 4 once the vertex at -1 is a candidate.
        let result = RelaxationSolver::with_defaults()
            .solve(&Equation::cubic(), &relaxation_problem(-1.5, -0.5, -0.7), 1e-8)
            .unwrap();

        assert_relative_eq!(result.root, -1.0, epsilon = 1e-8);
        assert_eq!(result.aposteriori_iterations, 9);
        assert_eq!(result.apriori_iterations, AprioriEstimate::Iterations(9));
    }

    #[test]
    fn test_zero_minimum_derivative() {
        // f' vanishes inside [0, 1], so m1 = 0.
        let result = RelaxationSolver::with_defaults()
            .solve(&Equation::cubic(), &relaxation_problem(0.0, 1.0, 0.5), 1e-6)
            .unwrap();

        assert_eq!(
            result.convergence_check,
            "0 >= m1 or m1 >= M1, convergence not guaranteed."
        );
        assert_eq!(result.apriori_iterations, AprioriEstimate::Unavailable);
        assert!(result.aposteriori_iterations <= 1000);
    }

    #[test]
    fn test_equal_bounds_flagged() {
        // Linear f gives m1 == M1, q0 = 0.
        let eq = Equation::new("2x - 1 = 0", |x| 2.0 * x - 1.0, |_| 2.0, |_| 0.0);
        let result = RelaxationSolver::with_defaults()
            .solve(&eq, &relaxation_problem(0.0, 1.0, 0.9), 1e-9)
            .unwrap();

        assert!(result.convergence_check.contains("convergence not guaranteed"));
        assert_eq!(result.apriori_iterations, AprioriEstimate::Unavailable);
        assert_eq!(result.status, SolveStatus::Converged);
        assert_relative_eq!(result.root, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_function_reports_failure() {
        let eq = Equation::new("1 = 0", |_| 1.0, |_| 0.0, |_| 0.0);
        let result = RelaxationSolver::with_defaults()
            .solve(&eq, &relaxation_problem(0.0, 1.0, 0.5), 1e-6)
            .unwrap();

        assert_eq!(result.status, SolveStatus::DerivativeTooSmall);
        assert_eq!(result.aposteriori_iterations, 0);
        assert!(result.root.is_nan());
    }

    #[test]
    fn test_start_at_critical_point_is_not_a_root() {
        // f'(0) = 0 while f(0) = -1: the first update has no direction.
        let eq = Equation::new("x^2 - 1 = 0", |x| x * x - 1.0, |x| 2.0 * x, |_| 2.0);
        let result = RelaxationSolver::with_defaults()
            .solve(&eq, &relaxation_problem(-0.5, 2.0, 0.0), 1e-6)
            .unwrap();

        assert_eq!(result.status, SolveStatus::DerivativeTooSmall);
        assert_eq!(result.aposteriori_iterations, 0);
        assert!(result.root.is_nan());
        assert_eq!(result.comments, "Derivative too small at x = 0, method fails");
    }
}
