//! Problem definitions supplied by drivers.

use serde::{Deserialize, Serialize};

use super::SolverError;

/// One root-finding problem: a bracketing interval `[a, b]` and the
/// initial guesses for each method.
///
/// A missing guess means the corresponding method cannot run on this
/// problem; solvers report it as [`SolverError::MissingInitialGuess`].
///
/// # Examples
///
/// ```
/// use solver_core::types::ProblemDefinition;
///
/// let problem = ProblemDefinition::new("Root near -3", -4.0, -2.5)
///     .with_relaxation_guess(-3.5)
///     .with_newton_guess(-3.5);
///
/// assert!(problem.validate_interval().is_ok());
/// assert_eq!(problem.newton_initial_guess, Some(-3.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDefinition {
    /// Human-readable label
    pub description: String,
    /// Left end of the bracketing interval
    pub a: f64,
    /// Right end of the bracketing interval
    pub b: f64,
    /// Starting point for the relaxation method
    #[serde(default)]
    pub relaxation_initial_guess: Option<f64>,
    /// Starting point for Newton's method
    #[serde(default)]
    pub newton_initial_guess: Option<f64>,
}

impl ProblemDefinition {
    /// Create a problem on `[a, b]` without initial guesses.
    pub fn new(description: impl Into<String>, a: f64, b: f64) -> Self {
        Self {
            description: description.into(),
            a,
            b,
            relaxation_initial_guess: None,
            newton_initial_guess: None,
        }
    }

    /// Set the relaxation method's initial guess.
    pub fn with_relaxation_guess(mut self, x0: f64) -> Self {
        self.relaxation_initial_guess = Some(x0);
        self
    }

    /// Set Newton's method initial guess.
    pub fn with_newton_guess(mut self, x0: f64) -> Self {
        self.newton_initial_guess = Some(x0);
        self
    }

    /// Width of the interval, `b - a`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    /// Largest distance from `x0` to either end of the interval.
    ///
    /// Both a-priori estimators use this as the initial error bound.
    #[inline]
    pub fn max_distance_to_bounds(&self, x0: f64) -> f64 {
        (x0 - self.a).abs().max((x0 - self.b).abs())
    }

    /// Check that both bounds are finite and `a < b`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidInterval`] otherwise.
    pub fn validate_interval(&self) -> Result<(), SolverError> {
        if self.a.is_finite() && self.b.is_finite() && self.a < self.b {
            Ok(())
        } else {
            Err(SolverError::InvalidInterval {
                a: self.a,
                b: self.b,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builder_sets_guesses() {
        let problem = ProblemDefinition::new("p", 0.0, 1.0)
            .with_relaxation_guess(0.25)
            .with_newton_guess(0.75);

        assert_eq!(problem.relaxation_initial_guess, Some(0.25));
        assert_eq!(problem.newton_initial_guess, Some(0.75));
    }

    #[test]
    fn test_max_distance_to_bounds() {
        let problem = ProblemDefinition::new("p", 1.0, 2.0);
        assert_relative_eq!(problem.max_distance_to_bounds(1.5), 0.5);
        assert_relative_eq!(problem.max_distance_to_bounds(1.2), 0.8);
        assert_relative_eq!(problem.width(), 1.0);
    }

    #[test]
    fn test_validate_rejects_reversed_interval() {
        let problem = ProblemDefinition::new("p", 2.0, 1.0);
        assert_eq!(
            problem.validate_interval(),
            Err(SolverError::InvalidInterval { a: 2.0, b: 1.0 })
        );
    }

    #[test]
    fn test_validate_rejects_degenerate_and_non_finite() {
        assert!(ProblemDefinition::new("p", 1.0, 1.0)
            .validate_interval()
            .is_err());
        assert!(ProblemDefinition::new("p", f64::NEG_INFINITY, 1.0)
            .validate_interval()
            .is_err());
        assert!(ProblemDefinition::new("p", 0.0, f64::NAN)
            .validate_interval()
            .is_err());
    }
}
