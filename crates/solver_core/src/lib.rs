//! # solver_core: Iterative Root Finding for a Single Nonlinear Equation
//!
//! ## Role
//!
//! solver_core is the computational kernel of the workspace. It provides:
//! - An injectable equation capability with analytic derivatives (`math::equation`)
//! - Tight derivative bounds over an interval (`math::analysis`)
//! - Newton and relaxation (simple-iteration) solvers sharing one
//!   four-phase skeleton (`math::solvers`)
//! - Value records exchanged with drivers: `ProblemDefinition`,
//!   `SolverResult`, `AprioriEstimate` (`types`)
//! - Concurrent batch solving over many problems (`batch`)
//!
//! ## Purity
//!
//! Every `solve` call is a pure function of `(equation, problem, epsilon)`.
//! No solver holds mutable state, so calls may run on any thread in any
//! order. The only safeguard against non-convergence is the iteration cap.
//!
//! ## Usage Examples
//!
//! ```rust
//! use solver_core::math::equation::Equation;
//! use solver_core::math::solvers::{EquationSolver, NewtonSolver};
//! use solver_core::types::{ProblemDefinition, SolveStatus};
//!
//! let equation = Equation::cubic();
//! let problem = ProblemDefinition::new("Root near 1", 1.0, 2.0).with_newton_guess(1.5);
//!
//! let result = NewtonSolver::with_defaults()
//!     .solve(&equation, &problem, 1e-6)
//!     .unwrap();
//!
//! assert_eq!(result.status, SolveStatus::Converged);
//! assert!((result.root - 1.0).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod batch;
pub mod math;
pub mod types;
