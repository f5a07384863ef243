//! Derivative bounds over an interval.
//!
//! Both a-priori estimators and the relaxation step size depend on
//! `m1 = min |f'|`, `M1 = max |f'|` and `M2 = max |f''|` over `[a, b]`.
//! The bounds here are exact for equations whose derivatives are monotone
//! between the recorded stationary points of `f'`:
//!
//! - the extrema of `f'` lie at the endpoints or at an interior
//!   stationary point, so those are the only candidates;
//! - when the derivative changes sign between two adjacent candidates it
//!   crosses zero, so the minimum of its absolute value is 0.

use serde::Serialize;

use super::equation::Equation;

/// Minimum and maximum of a non-negative quantity over an interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivativeBounds {
    /// Smallest attained value
    pub min: f64,
    /// Largest attained value
    pub max: f64,
}

/// Bounds on `|f'(x)|` for `x` in `[a, b]`.
///
/// Candidates are `a`, `b` and every stationary point of `f'` strictly
/// inside `(a, b)`.
///
/// # Examples
///
/// ```
/// use solver_core::math::analysis::bounds_abs_first_derivative;
/// use solver_core::math::equation::Equation;
///
/// // f'(x) = 3x^2 + 6x - 1, vertex at -1 where |f'| = 4
/// let bounds = bounds_abs_first_derivative(&Equation::cubic(), -1.5, -0.5);
/// assert_eq!(bounds.min, 3.25);
/// assert_eq!(bounds.max, 4.0);
/// ```
pub fn bounds_abs_first_derivative(equation: &Equation, a: f64, b: f64) -> DerivativeBounds {
    abs_bounds(|x| equation.derivative(x), equation.stationary_points(), a, b)
}

/// Bounds on `|f''(x)|` for `x` in `[a, b]`.
///
/// For a linear `f''` the maximum is always at an endpoint; the minimum
/// drops to 0 when `f''` vanishes inside the interval.
pub fn bounds_abs_second_derivative(equation: &Equation, a: f64, b: f64) -> DerivativeBounds {
    abs_bounds(
        |x| equation.second_derivative(x),
        equation.stationary_points(),
        a,
        b,
    )
}

fn abs_bounds<G>(g: G, interior: &[f64], a: f64, b: f64) -> DerivativeBounds
where
    G: Fn(f64) -> f64,
{
    // `interior` is sorted, so the candidate list stays ordered.
    let values: Vec<f64> = std::iter::once(a)
        .chain(interior.iter().copied().filter(|&p| a < p && p < b))
        .chain(std::iter::once(b))
        .map(g)
        .collect();

    let mut min = f64::INFINITY;
    let mut max = 0.0_f64;
    for v in &values {
        min = min.min(v.abs());
        max = max.max(v.abs());
    }

    let crosses_zero = values
        .windows(2)
        .any(|w| (w[0] < 0.0 && w[1] > 0.0) || (w[0] > 0.0 && w[1] < 0.0));
    if crosses_zero {
        min = 0.0;
    }

    DerivativeBounds { min, max }
}
