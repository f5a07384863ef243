//! Value records and error types exchanged with drivers.
//!
//! This module provides:
//! - `problem`: [`ProblemDefinition`], one bracketing interval plus per-method initial guesses
//! - `result`: [`SolverResult`], [`AprioriEstimate`], [`SolveStatus`]
//! - `error`: [`SolverError`] for precondition violations
//!
//! # Re-exports
//!
//! All public types are re-exported at this module level.

pub mod error;
pub mod problem;
pub mod result;

pub use error::SolverError;
pub use problem::ProblemDefinition;
pub use result::{AprioriEstimate, SolveStatus, SolverResult};
