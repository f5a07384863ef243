//! Scalar equations `f(x) = 0` with analytic first and second derivatives.

use std::fmt;
use std::sync::Arc;

/// Shared scalar function `ℝ → ℝ`.
pub type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// An equation `f(x) = 0` supplied as three analytic functions.
///
/// The derivatives are trusted: `f'' = d/dx f'` and `f' = d/dx f` are not
/// checked at runtime. Besides the functions, an equation records the
/// stationary points of `f'` (the zeros of `f''`). Derivative analysis
/// relies on `f'` and `f''` being monotone between consecutive stationary
/// points, which holds for any cubic.
///
/// Cloning is cheap; the functions are reference counted and may be
/// called from any thread.
///
/// # Examples
///
/// ```
/// use solver_core::math::equation::Equation;
///
/// // x^2 - 2 = 0
/// let eq = Equation::new("x^2 - 2 = 0", |x| x * x - 2.0, |x| 2.0 * x, |_| 2.0);
/// assert_eq!(eq.f(2.0), 2.0);
/// assert_eq!(eq.derivative(2.0), 4.0);
/// assert!(eq.stationary_points().is_empty());
/// ```
#[derive(Clone)]
pub struct Equation {
    definition: String,
    function: ScalarFn,
    derivative: ScalarFn,
    second_derivative: ScalarFn,
    stationary_points: Vec<f64>,
}

impl Equation {
    /// Create an equation from `f`, `f'` and `f''`.
    pub fn new<F, D1, D2>(
        definition: impl Into<String>,
        function: F,
        derivative: D1,
        second_derivative: D2,
    ) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        D1: Fn(f64) -> f64 + Send + Sync + 'static,
        D2: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            definition: definition.into(),
            function: Arc::new(function),
            derivative: Arc::new(derivative),
            second_derivative: Arc::new(second_derivative),
            stationary_points: Vec::new(),
        }
    }

    /// Record the points where `f''` vanishes.
    ///
    /// Points are kept sorted; non-finite values are dropped.
    pub fn with_stationary_points(mut self, points: impl IntoIterator<Item = f64>) -> Self {
        let mut points: Vec<f64> = points.into_iter().filter(|p| p.is_finite()).collect();
        points.sort_by(f64::total_cmp);
        points.dedup();
        self.stationary_points = points;
        self
    }

    /// The cubic `x^3 + 3x^2 - x - 3 = 0`.
    ///
    /// Its roots are -3, -1 and 1. The derivative `3x^2 + 6x - 1` is a
    /// parabola with vertex at `x = -1`.
    pub fn cubic() -> Self {
        Self::new(
            "x^3 + 3x^2 - x - 3 = 0",
            |x| x.powi(3) + 3.0 * x.powi(2) - x - 3.0,
            |x| 3.0 * x.powi(2) + 6.0 * x - 1.0,
            |x| 6.0 * x + 6.0,
        )
        .with_stationary_points([-1.0])
    }

    /// Display form of the equation.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Evaluate `f(x)`.
    #[inline]
    pub fn f(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    /// Evaluate `f'(x)`.
    #[inline]
    pub fn derivative(&self, x: f64) -> f64 {
        (self.derivative)(x)
    }

    /// Evaluate `f''(x)`.
    #[inline]
    pub fn second_derivative(&self, x: f64) -> f64 {
        (self.second_derivative)(x)
    }

    /// Sorted points where `f''` vanishes.
    pub fn stationary_points(&self) -> &[f64] {
        &self.stationary_points
    }
}

impl Default for Equation {
    fn default() -> Self {
        Self::cubic()
    }
}

impl fmt::Debug for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equation")
            .field("definition", &self.definition)
            .field("stationary_points", &self.stationary_points)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_roots() {
        let eq = Equation::cubic();
        for root in [-3.0, -1.0, 1.0] {
            assert_relative_eq!(eq.f(root), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cubic_derivatives() {
        let eq = Equation::cubic();
        assert_relative_eq!(eq.derivative(-1.0), -4.0);
        assert_relative_eq!(eq.derivative(1.0), 8.0);
        assert_relative_eq!(eq.second_derivative(-1.0), 0.0);
        assert_relative_eq!(eq.second_derivative(2.0), 18.0);
    }

    #[test]
    fn test_cubic_vertex() {
        assert_eq!(Equation::cubic().stationary_points(), &[-1.0]);
    }

    #[test]
    fn test_stationary_points_sorted_and_filtered() {
        let eq = Equation::new("x", |x| x, |_| 1.0, |_| 0.0)
            .with_stationary_points([2.0, f64::NAN, -1.0, 2.0]);
        assert_eq!(eq.stationary_points(), &[-1.0, 2.0]);
    }

    #[test]
    fn test_display_and_debug() {
        let eq = Equation::cubic();
        assert_eq!(eq.to_string(), "x^3 + 3x^2 - x - 3 = 0");
        let debug_str = format!("{:?}", eq);
        assert!(debug_str.contains("Equation"));
        assert!(debug_str.contains("x^3"));
    }

    #[test]
    fn test_clone_shares_functions() {
        let eq = Equation::cubic();
        let cloned = eq.clone();
        assert_eq!(eq.f(0.5), cloned.f(0.5));
    }
}
