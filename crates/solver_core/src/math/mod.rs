//! Numerical building blocks.
//!
//! - `equation`: the injected scalar equation with analytic derivatives
//! - `analysis`: bounds on `|f'|` and `|f''|` over an interval
//! - `solvers`: Newton and relaxation solvers on a shared skeleton

pub mod analysis;
pub mod equation;
pub mod solvers;
