//! Result records produced once per (problem, method) pair.

use serde::Serialize;
use std::fmt;

/// Theoretical iteration bound computed before the loop runs.
///
/// `Unavailable` is returned whenever the estimator's preconditions fail
/// (contraction ratio outside `(0, 1)`, vanishing derivative bound, or a
/// formula value that is not a finite count of at least one). It renders
/// as `N/A` and serialises as `null`, so it can never be confused with a
/// real iteration count.
///
/// # Examples
///
/// ```
/// use solver_core::types::AprioriEstimate;
///
/// assert_eq!(AprioriEstimate::from_raw(4.0), AprioriEstimate::Iterations(4));
/// assert_eq!(AprioriEstimate::from_raw(f64::NAN), AprioriEstimate::Unavailable);
/// assert_eq!(AprioriEstimate::Unavailable.to_string(), "N/A");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AprioriEstimate {
    /// Expected number of iterations
    Iterations(usize),
    /// The bound's preconditions do not hold
    Unavailable,
}

impl AprioriEstimate {
    /// Convert a raw formula value into an estimate.
    ///
    /// Values that are non-finite or below one are treated as unavailable.
    pub fn from_raw(value: f64) -> Self {
        if value.is_finite() && value >= 1.0 && value <= usize::MAX as f64 {
            AprioriEstimate::Iterations(value as usize)
        } else {
            AprioriEstimate::Unavailable
        }
    }

    /// Iteration count, if available.
    pub fn iterations(&self) -> Option<usize> {
        match self {
            AprioriEstimate::Iterations(n) => Some(*n),
            AprioriEstimate::Unavailable => None,
        }
    }

    /// Whether the estimate carries a real count.
    pub fn is_available(&self) -> bool {
        matches!(self, AprioriEstimate::Iterations(_))
    }
}

impl fmt::Display for AprioriEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AprioriEstimate::Iterations(n) => write!(f, "{}", n),
            AprioriEstimate::Unavailable => write!(f, "N/A"),
        }
    }
}

/// Terminal state of one solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Successive iterates differed by less than epsilon
    Converged,
    /// The iteration cap was hit first
    MaxIterations,
    /// Newton's update hit a near-zero derivative
    DerivativeTooSmall,
    /// An iterate became NaN or infinite
    Diverged,
}

impl SolveStatus {
    /// Whether the run produced a root.
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveStatus::Converged)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolveStatus::Converged => "converged",
            SolveStatus::MaxIterations => "max iterations",
            SolveStatus::DerivativeTooSmall => "derivative too small",
            SolveStatus::Diverged => "diverged",
        };
        f.write_str(label)
    }
}

/// Outcome of solving one problem with one method.
///
/// `root` is NaN whenever `status` is not [`SolveStatus::Converged`].
/// `comments` holds the convergence diagnostic for converged runs and the
/// failure message otherwise; `convergence_check` always keeps the
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverResult {
    /// Name of the method that produced this result
    pub method_name: String,
    /// Root found, or NaN
    pub root: f64,
    /// Iterations actually executed
    pub aposteriori_iterations: usize,
    /// Theoretical bound computed before iterating
    pub apriori_iterations: AprioriEstimate,
    /// Precision the run was asked for
    pub epsilon: f64,
    /// Display message for this result
    pub comments: String,
    /// Convergence-condition diagnostic, independent of the outcome
    pub convergence_check: String,
    /// Terminal state
    pub status: SolveStatus,
}

impl SolverResult {
    /// Whether a root was found.
    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }
}
