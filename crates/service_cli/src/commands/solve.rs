//! Solve command implementation
//!
//! Runs both methods over every configured problem and prints the results.

use clap::ValueEnum;
use solver_core::batch::{solve_batch, solve_batch_sequential};
use solver_core::math::equation::Equation;
use solver_core::math::solvers::{solvers_with_config, SolverConfig};
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::output::{problem_header, write_json, write_table};
use crate::precision::prompt_epsilon;
use crate::Result;

const SEPARATOR: &str = "------------------------------------------------------------";

/// Output format for the solve command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One boxed table per problem
    #[default]
    Table,
    /// A single JSON document
    Json,
}

/// Run the solve command
pub fn run(config: &AppConfig, format: OutputFormat, sequential: bool) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    // The prompt must not interleave with a JSON document on stdout.
    match format {
        OutputFormat::Table => execute(
            config,
            format,
            sequential,
            &mut input,
            &mut std::io::stdout(),
            &mut output,
        ),
        OutputFormat::Json => execute(
            config,
            format,
            sequential,
            &mut input,
            &mut std::io::stderr(),
            &mut output,
        ),
    }
}

fn execute<R, P, W>(
    config: &AppConfig,
    format: OutputFormat,
    sequential: bool,
    input: &mut R,
    prompt: &mut P,
    output: &mut W,
) -> Result<()>
where
    R: BufRead,
    P: Write,
    W: Write,
{
    let equation = Equation::cubic();

    if format == OutputFormat::Table {
        writeln!(output, "Solving the equation: {}", equation)?;
        writeln!(output, "{}\n", SEPARATOR)?;
        output.flush()?;
    }

    let epsilon = match config.epsilon {
        Some(epsilon) => epsilon,
        None => prompt_epsilon(input, prompt)?,
    };

    if config.problems.is_empty() {
        warn!("no problems configured");
    }

    let solver_config = SolverConfig::default().with_max_iterations(config.max_iterations);
    let solvers = solvers_with_config(solver_config);
    let reports = if sequential {
        solve_batch_sequential(&equation, &config.problems, &solvers, epsilon)
    } else {
        solve_batch(&equation, &config.problems, &solvers, epsilon)
    };

    match format {
        OutputFormat::Table => {
            for report in &reports {
                writeln!(output, "\n{}", problem_header(&report.problem))?;
                write_table(output, &report.outcomes)?;
            }
        }
        OutputFormat::Json => write_json(output, equation.definition(), epsilon, &reports)?,
    }

    let converged = reports
        .iter()
        .flat_map(|report| report.results())
        .filter(|result| result.is_converged())
        .count();
    info!(problems = reports.len(), converged, "solve finished");

    Ok(())
}
