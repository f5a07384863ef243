//! Solving many problems with several methods at once.
//!
//! Solver calls share no mutable state, so every (problem, method) pair
//! runs independently on the rayon thread pool. Output order always
//! matches input order: problems as given, methods as given.
//!
//! # Examples
//!
//! ```
//! use solver_core::batch::solve_batch;
//! use solver_core::math::equation::Equation;
//! use solver_core::math::solvers::default_solvers;
//! use solver_core::types::ProblemDefinition;
//!
//! let problems = vec![
//!     ProblemDefinition::new("Root near -3", -4.0, -2.5)
//!         .with_relaxation_guess(-3.5)
//!         .with_newton_guess(-3.5),
//!     ProblemDefinition::new("Root near 1", 0.5, 2.0)
//!         .with_relaxation_guess(1.5)
//!         .with_newton_guess(1.5),
//! ];
//!
//! let reports = solve_batch(&Equation::cubic(), &problems, &default_solvers(), 1e-6);
//! assert_eq!(reports.len(), 2);
//! assert_eq!(reports[1].outcomes.len(), 2);
//! ```

use rayon::prelude::*;
use tracing::info;

use crate::math::equation::Equation;
use crate::math::solvers::EquationSolver;
use crate::types::{ProblemDefinition, SolverError, SolverResult};

/// One method's outcome on one problem.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodOutcome {
    /// Method that ran
    pub method_name: &'static str,
    /// Result, or the precondition that stopped it
    pub result: Result<SolverResult, SolverError>,
}

/// All methods' outcomes on one problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemReport {
    /// The problem as supplied
    pub problem: ProblemDefinition,
    /// One entry per solver, in solver order
    pub outcomes: Vec<MethodOutcome>,
}

impl ProblemReport {
    /// Successful results only.
    pub fn results(&self) -> impl Iterator<Item = &SolverResult> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }
}

/// Solve every problem with every solver on the rayon pool.
pub fn solve_batch(
    equation: &Equation,
    problems: &[ProblemDefinition],
    solvers: &[Box<dyn EquationSolver>],
    epsilon: f64,
) -> Vec<ProblemReport> {
    info!(
        problems = problems.len(),
        solvers = solvers.len(),
        epsilon,
        "solving batch in parallel"
    );

    problems
        .par_iter()
        .map(|problem| ProblemReport {
            problem: problem.clone(),
            outcomes: solvers
                .par_iter()
                .map(|solver| run_one(solver.as_ref(), equation, problem, epsilon))
                .collect(),
        })
        .collect()
}

/// Same output as [`solve_batch`], computed on the calling thread.
pub fn solve_batch_sequential(
    equation: &Equation,
    problems: &[ProblemDefinition],
    solvers: &[Box<dyn EquationSolver>],
    epsilon: f64,
) -> Vec<ProblemReport> {
    info!(
        problems = problems.len(),
        solvers = solvers.len(),
        epsilon,
        "solving batch sequentially"
    );

    problems
        .iter()
        .map(|problem| ProblemReport {
            problem: problem.clone(),
            outcomes: solvers
                .iter()
                .map(|solver| run_one(solver.as_ref(), equation, problem, epsilon))
                .collect(),
        })
        .collect()
}

fn run_one(
    solver: &dyn EquationSolver,
    equation: &Equation,
    problem: &ProblemDefinition,
    epsilon: f64,
) -> MethodOutcome {
    MethodOutcome {
        method_name: solver.method_name(),
        result: solver.solve(equation, problem, epsilon),
    }
}
