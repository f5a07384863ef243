//! Error types for structured error handling.
//!
//! Only caller mistakes surface as [`SolverError`]. Numeric edge cases
//! (non-convergence, vanishing derivatives, ill-conditioned estimates) are
//! reported in-band through [`SolverResult`](crate::types::SolverResult).

use thiserror::Error;

/// Precondition violations detected before any iteration begins.
///
/// # Variants
/// - `InvalidInterval`: Bounds are non-finite or not strictly ordered
/// - `InvalidEpsilon`: Precision is non-finite or not positive
/// - `MissingInitialGuess`: The problem carries no guess for this method
/// - `NonFiniteInitialGuess`: The guess is NaN or infinite
///
/// # Examples
/// ```
/// use solver_core::types::SolverError;
///
/// let err = SolverError::InvalidInterval { a: 2.0, b: 1.0 };
/// assert!(format!("{}", err).contains("[2, 1]"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Interval bounds are non-finite or `a >= b`.
    #[error("Invalid interval [{a}, {b}]: bounds must be finite with a < b")]
    InvalidInterval {
        /// Left bound
        a: f64,
        /// Right bound
        b: f64,
    },

    /// Precision must be finite and strictly positive.
    #[error("Invalid epsilon {epsilon}: must be finite and positive")]
    InvalidEpsilon {
        /// The rejected precision
        epsilon: f64,
    },

    /// The problem has no initial guess for the requested method.
    #[error("No initial guess supplied for {method}")]
    MissingInitialGuess {
        /// Method name
        method: &'static str,
    },

    /// The initial guess is NaN or infinite.
    #[error("Initial guess {x0} for {method} is not finite")]
    NonFiniteInitialGuess {
        /// Method name
        method: &'static str,
        /// The rejected guess
        x0: f64,
    },
}
