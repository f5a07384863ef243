//! The four-phase skeleton shared by every iterative method.
//!
//! A call to [`EquationSolver::solve`] runs, in order and exactly once:
//!
//! 1. a convergence-condition check that only produces diagnostics,
//! 2. an a-priori iteration estimate,
//! 3. the iteration loop, bounded by `SolverConfig::max_iterations`,
//! 4. assembly of a [`SolverResult`].
//!
//! Methods plug in through [`IterativeMethod`]; any such method is an
//! [`EquationSolver`] through the blanket implementation below.

use std::fmt;

use tracing::{debug, trace, warn};

use super::SolverConfig;
use crate::math::equation::Equation;
use crate::types::{AprioriEstimate, ProblemDefinition, SolveStatus, SolverError, SolverResult};

/// Message reported when every convergence condition holds.
pub const CONDITIONS_SATISFIED: &str = "Convergence conditions satisfied.";

/// Message reported when the iteration cap is reached.
pub const MAX_ITERATIONS_MESSAGE: &str = "Maximum iterations reached without convergence";

/// Diagnostics from the convergence-condition phase.
///
/// Collects one message per violated condition. It never stops the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergenceCheck {
    violations: Vec<String>,
}

impl ConvergenceCheck {
    /// A check with no violations yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violated condition.
    pub fn flag(&mut self, message: impl Into<String>) {
        self.violations.push(message.into());
    }

    /// Whether every condition holds.
    pub fn is_satisfied(&self) -> bool {
        self.violations.is_empty()
    }

    /// Recorded violations, in check order.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl fmt::Display for ConvergenceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            f.write_str(CONDITIONS_SATISFIED)
        } else {
            f.write_str(&self.violations.join("; "))
        }
    }
}

/// Terminal state of the iteration loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationOutcome {
    /// Two successive iterates differed by less than epsilon.
    Converged {
        /// Last iterate
        root: f64,
        /// Steps taken
        iterations: usize,
    },
    /// The cap was reached first.
    ExhaustedIterations {
        /// Steps taken (the cap)
        iterations: usize,
    },
    /// The update was undefined because `|f'(x)|` was below tolerance.
    DerivativeTooSmall {
        /// Iterate where the derivative vanished
        x: f64,
        /// Updates completed before the failing one
        iterations: usize,
    },
    /// An iterate became NaN or infinite.
    Diverged {
        /// Step at which it happened
        iterations: usize,
    },
}

impl IterationOutcome {
    /// Number of loop iterations executed.
    pub fn iterations(&self) -> usize {
        match *self {
            IterationOutcome::Converged { iterations, .. }
            | IterationOutcome::ExhaustedIterations { iterations }
            | IterationOutcome::DerivativeTooSmall { iterations, .. }
            | IterationOutcome::Diverged { iterations } => iterations,
        }
    }

    /// Root if the loop converged, NaN otherwise.
    pub fn root(&self) -> f64 {
        match *self {
            IterationOutcome::Converged { root, .. } => root,
            _ => f64::NAN,
        }
    }

    /// Matching result status.
    pub fn status(&self) -> SolveStatus {
        match self {
            IterationOutcome::Converged { .. } => SolveStatus::Converged,
            IterationOutcome::ExhaustedIterations { .. } => SolveStatus::MaxIterations,
            IterationOutcome::DerivativeTooSmall { .. } => SolveStatus::DerivativeTooSmall,
            IterationOutcome::Diverged { .. } => SolveStatus::Diverged,
        }
    }
}

/// Run `x_{n+1} = step(x_n)` from `x0` until `|x_{n+1} - x_n| < epsilon`.
///
/// `step` returns `None` when the update is undefined at `x` (a derivative
/// below tolerance). Non-finite iterates end the loop as
/// [`IterationOutcome::Diverged`].
pub fn run_iterations<S>(
    x0: f64,
    epsilon: f64,
    max_iterations: usize,
    mut step: S,
) -> IterationOutcome
where
    S: FnMut(f64) -> Option<f64>,
{
    let mut x_prev = x0;

    for iteration in 1..=max_iterations {
        let Some(x_next) = step(x_prev) else {
            return IterationOutcome::DerivativeTooSmall {
                x: x_prev,
                iterations: iteration - 1,
            };
        };

        if !x_next.is_finite() {
            return IterationOutcome::Diverged {
                iterations: iteration,
            };
        }

        let delta = (x_next - x_prev).abs();
        trace!(iteration, x = x_next, delta, "iterate");

        if delta < epsilon {
            return IterationOutcome::Converged {
                root: x_next,
                iterations: iteration,
            };
        }

        x_prev = x_next;
    }

    IterationOutcome::ExhaustedIterations {
        iterations: max_iterations,
    }
}

/// The method-specific pieces of the skeleton.
pub trait IterativeMethod: Send + Sync {
    /// Display name of the method.
    const NAME: &'static str;

    /// Active configuration.
    fn config(&self) -> &SolverConfig;

    /// This method's initial guess from the problem.
    fn initial_guess(&self, problem: &ProblemDefinition) -> Option<f64>;

    /// Phase 1: evaluate the convergence conditions.
    fn check_convergence(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        x0: f64,
    ) -> ConvergenceCheck;

    /// Phase 2: theoretical iteration bound.
    fn estimate_apriori(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        x0: f64,
        epsilon: f64,
    ) -> AprioriEstimate;

    /// Phase 3: the iteration loop.
    fn iterate(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        x0: f64,
        epsilon: f64,
    ) -> IterationOutcome;
}

/// A root-finding method usable by drivers.
///
/// Object safe, so drivers can hold `Box<dyn EquationSolver>` lists.
pub trait EquationSolver: Send + Sync {
    /// Display name of the method.
    fn method_name(&self) -> &'static str;

    /// Solve `equation` on `problem` to precision `epsilon`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] only for precondition violations: an
    /// invalid interval, a non-positive epsilon, or a missing or
    /// non-finite initial guess. Non-convergence and numeric degeneracy
    /// are reported in the returned [`SolverResult`].
    fn solve(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        epsilon: f64,
    ) -> Result<SolverResult, SolverError>;
}

impl<M: IterativeMethod> EquationSolver for M {
    fn method_name(&self) -> &'static str {
        M::NAME
    }

    fn solve(
        &self,
        equation: &Equation,
        problem: &ProblemDefinition,
        epsilon: f64,
    ) -> Result<SolverResult, SolverError> {
        let span = tracing::debug_span!(
            "solve",
            method = M::NAME,
            problem = %problem.description,
            max_iterations = self.config().max_iterations,
        );
        let _guard = span.enter();

        let x0 = validate_inputs::<M>(self.initial_guess(problem), problem, epsilon)?;

        let check = self.check_convergence(equation, problem, x0);
        debug!(satisfied = check.is_satisfied(), diagnostics = %check, "conditions checked");

        let apriori = self.estimate_apriori(equation, problem, x0, epsilon);
        debug!(%apriori, "a-priori estimate computed");

        let outcome = self.iterate(equation, problem, x0, epsilon);
        match outcome {
            IterationOutcome::Converged { root, iterations } => {
                debug!(root, iterations, "converged")
            }
            other => warn!(
                status = %other.status(),
                iterations = other.iterations(),
                "no root found"
            ),
        }

        Ok(assemble(M::NAME, outcome, apriori, epsilon, &check))
    }
}

fn validate_inputs<M: IterativeMethod>(
    x0: Option<f64>,
    problem: &ProblemDefinition,
    epsilon: f64,
) -> Result<f64, SolverError> {
    problem.validate_interval()?;

    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(SolverError::InvalidEpsilon { epsilon });
    }

    let x0 = x0.ok_or(SolverError::MissingInitialGuess { method: M::NAME })?;
    if !x0.is_finite() {
        return Err(SolverError::NonFiniteInitialGuess {
            method: M::NAME,
            x0,
        });
    }

    Ok(x0)
}

/// Phase 4: package the loop outcome.
fn assemble(
    method_name: &str,
    outcome: IterationOutcome,
    apriori: AprioriEstimate,
    epsilon: f64,
    check: &ConvergenceCheck,
) -> SolverResult {
    let diagnostics = check.to_string();
    let comments = match outcome {
        IterationOutcome::Converged { .. } => diagnostics.clone(),
        IterationOutcome::ExhaustedIterations { .. } => MAX_ITERATIONS_MESSAGE.to_string(),
        IterationOutcome::DerivativeTooSmall { x, .. } => {
            format!("Derivative too small at x = {}, method fails", x)
        }
        IterationOutcome::Diverged { .. } => {
            "Iteration produced a non-finite value, method diverged".to_string()
        }
    };

    SolverResult {
        method_name: method_name.to_string(),
        root: outcome.root(),
        aposteriori_iterations: outcome.iterations(),
        apriori_iterations: apriori,
        epsilon,
        comments,
        convergence_check: diagnostics,
        status: outcome.status(),
    }
}
