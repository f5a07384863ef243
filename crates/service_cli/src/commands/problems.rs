//! Problems command implementation
//!
//! Lists the equation and the configured problem set without solving.

use solver_core::math::equation::Equation;
use std::io::Write;

use crate::config::AppConfig;
use crate::Result;

/// Run the problems command
pub fn run(config: &AppConfig) -> Result<()> {
    let stdout = std::io::stdout();
    write_listing(&mut stdout.lock(), &Equation::cubic(), config)
}

fn guess_label(guess: Option<f64>) -> String {
    guess.map_or_else(|| "-".to_string(), |x| x.to_string())
}

fn write_listing<W: Write>(out: &mut W, equation: &Equation, config: &AppConfig) -> Result<()> {
    writeln!(out, "Equation: {}", equation.definition())?;
    writeln!(out, "Problems: {}", config.problems.len())?;

    for (index, problem) in config.problems.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} on [{}, {}] (relaxation x0 = {}, Newton x0 = {})",
            index + 1,
            problem.description,
            problem.a,
            problem.b,
            guess_label(problem.relaxation_initial_guess),
            guess_label(problem.newton_initial_guess),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solver_core::types::ProblemDefinition;

    #[test]
    fn test_listing_shows_every_problem() {
        let config = AppConfig {
            problems: vec![
                ProblemDefinition::new("first", -4.0, -2.5).with_newton_guess(-3.5),
                ProblemDefinition::new("second", 0.5, 2.0),
            ],
            ..Default::default()
        };

        let mut buffer = Vec::new();
        write_listing(&mut buffer, &Equation::cubic(), &config).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("Equation: x^3 + 3x^2 - x - 3 = 0\n"));
        assert!(text.contains("Problems: 2"));
        assert!(text.contains("1. first on [-4, -2.5] (relaxation x0 = -, Newton x0 = -3.5)"));
        assert!(text.contains("2. second on [0.5, 2]"));
    }
}
