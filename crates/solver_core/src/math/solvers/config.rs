//! Solver configuration types.

use serde::{Deserialize, Serialize};

/// Default iteration cap shared by both methods.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Default threshold below which `|f'(x)|` makes Newton's update undefined.
pub const DEFAULT_DERIVATIVE_TOLERANCE: f64 = 1e-12;

/// Configuration shared by the iterative solvers.
///
/// The convergence precision is not part of the configuration; it is
/// passed to every `solve` call so that one solver instance can serve
/// many precisions.
///
/// # Example
///
/// ```
/// use solver_core::math::solvers::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.max_iterations, 1000);
///
/// let custom = SolverConfig {
///     max_iterations: 50,
///     ..SolverConfig::default()
/// };
/// assert_eq!(custom.max_iterations, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Hard cap on loop iterations.
    ///
    /// Reaching it ends the run with `SolveStatus::MaxIterations`.
    pub max_iterations: usize,

    /// Smallest `|f'(x)|` a step may start from.
    ///
    /// Below it Newton's update divides by almost zero and the relaxation
    /// update has no direction; both end with
    /// `SolveStatus::DerivativeTooSmall`.
    pub derivative_tolerance: f64,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `max_iterations`: 1000
    /// - `derivative_tolerance`: 1e-12
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative_tolerance: DEFAULT_DERIVATIVE_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `max_iterations == 0` or `derivative_tolerance` is not a
    /// positive finite number.
    ///
    /// # Example
    ///
    /// ```
    /// use solver_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(200, 1e-10);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(max_iterations: usize, derivative_tolerance: f64) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        assert!(
            derivative_tolerance.is_finite() && derivative_tolerance > 0.0,
            "derivative_tolerance must be positive"
        );
        Self {
            max_iterations,
            derivative_tolerance,
        }
    }

    /// Same configuration with a different iteration cap.
    ///
    /// # Panics
    ///
    /// Panics if `max_iterations == 0`.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self::new(max_iterations, self.derivative_tolerance)
    }
}
