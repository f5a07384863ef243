//! Interactive precision prompt.

use std::io::{BufRead, Write};
use tracing::warn;

use crate::Result;

/// Precision used when the user's answer cannot be parsed.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Parse a user-supplied precision. Only positive finite numbers pass.
pub fn parse_epsilon(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|epsilon| epsilon.is_finite() && *epsilon > 0.0)
}

/// Ask for a precision on `output` and read one line from `input`.
///
/// Anything unparsable, including end of input, falls back to
/// [`DEFAULT_EPSILON`].
pub fn prompt_epsilon<R, W>(input: &mut R, output: &mut W) -> Result<f64>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Enter precision: ")?;
    output.flush()?;

    let mut raw = Vec::new();
    input.read_until(b'\n', &mut raw)?;
    let line = String::from_utf8_lossy(&raw);

    match parse_epsilon(&line) {
        Some(epsilon) => {
            writeln!(output, "Using precision epsilon = {}", epsilon)?;
            Ok(epsilon)
        }
        None => {
            warn!(input = line.trim(), "rejected precision input");
            writeln!(output, "Invalid input. Using default precision epsilon = 1e-3")?;
            Ok(DEFAULT_EPSILON)
        }
    }
}
