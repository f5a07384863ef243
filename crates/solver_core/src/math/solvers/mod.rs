//! Iterative solvers for a single nonlinear equation.
//!
//! ## Available Solvers
//!
//! - [`NewtonSolver`]: quadratic convergence from a good initial guess
//! - [`RelaxationSolver`]: linear convergence with the optimal fixed step
//!
//! Both implement [`EquationSolver`] through the shared four-phase
//! skeleton in [`engine`]: convergence check, a-priori estimate,
//! iteration loop, result assembly.
//!
//! ## Configuration
//!
//! [`SolverConfig`] sets:
//! - `max_iterations`: iteration cap (default: 1000)
//! - `derivative_tolerance`: smallest `|f'|` either method steps from (default: 1e-12)
//!
//! ## Examples
//!
//! ```
//! use solver_core::math::equation::Equation;
//! use solver_core::math::solvers::{default_solvers, EquationSolver};
//! use solver_core::types::ProblemDefinition;
//!
//! let problem = ProblemDefinition::new("Root near 1", 0.5, 2.0)
//!     .with_relaxation_guess(1.5)
//!     .with_newton_guess(1.5);
//!
//! for solver in default_solvers() {
//!     let result = solver.solve(&Equation::cubic(), &problem, 1e-6).unwrap();
//!     assert!((result.root - 1.0).abs() < 1e-5, "{}", solver.method_name());
//! }
//! ```

mod config;
pub mod engine;
mod newton_raphson;
mod relaxation;

pub use config::{SolverConfig, DEFAULT_DERIVATIVE_TOLERANCE, DEFAULT_MAX_ITERATIONS};
pub use engine::{EquationSolver, IterationOutcome};
pub use newton_raphson::NewtonSolver;
pub use relaxation::RelaxationSolver;

/// The two methods in display order: relaxation, then Newton.
pub fn default_solvers() -> Vec<Box<dyn EquationSolver>> {
    solvers_with_config(SolverConfig::default())
}

/// Both methods sharing one configuration.
pub fn solvers_with_config(config: SolverConfig) -> Vec<Box<dyn EquationSolver>> {
    vec![
        Box::new(RelaxationSolver::new(config)),
        Box::new(NewtonSolver::new(config)),
    ]
}
