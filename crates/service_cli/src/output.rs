//! Result rendering: fixed-width tables and JSON documents.

use serde::Serialize;
use solver_core::batch::{MethodOutcome, ProblemReport};
use solver_core::types::{ProblemDefinition, SolverResult};
use std::io::Write;

const BORDER: &str = "+-------------------+----------------------+------------+--------------------+-----------------------------------+";

/// Line printed before each problem's table.
pub fn problem_header(problem: &ProblemDefinition) -> String {
    format!(
        "===== Analyzing {} on interval [{}, {}] =====",
        problem.description, problem.a, problem.b
    )
}

/// Write one row per outcome, boxed and headed.
pub fn write_table<W: Write>(out: &mut W, outcomes: &[MethodOutcome]) -> std::io::Result<()> {
    writeln!(out, "{}", BORDER)?;
    writeln!(
        out,
        "| {:<17} | {:<20} | {:<10} | {:<18} | {:<33} |",
        "Method", "Found Root", "Iterations", "A Priori Estimate", "Comments"
    )?;
    writeln!(out, "{}", BORDER)?;

    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => writeln!(
                out,
                "| {:<17} | {:>20.10} | {:>10} | {:>18} | {:<33} |",
                result.method_name,
                result.root,
                result.aposteriori_iterations,
                result.apriori_iterations.to_string(),
                result.comments
            )?,
            Err(error) => writeln!(
                out,
                "| {:<17} | {:>20} | {:>10} | {:>18} | {:<33} |",
                outcome.method_name, "-", "-", "-", error.to_string()
            )?,
        }
    }

    writeln!(out, "{}", BORDER)
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    equation: &'a str,
    epsilon: f64,
    problems: Vec<JsonProblem<'a>>,
}

#[derive(Serialize)]
struct JsonProblem<'a> {
    #[serde(flatten)]
    problem: &'a ProblemDefinition,
    results: Vec<JsonOutcome<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonOutcome<'a> {
    Solved(&'a SolverResult),
    Failed { method_name: &'a str, error: String },
}

/// Write all reports as a single pretty-printed JSON document.
///
/// Non-finite roots serialise as `null`.
pub fn write_json<W: Write>(
    out: &mut W,
    equation: &str,
    epsilon: f64,
    reports: &[ProblemReport],
) -> serde_json::Result<()> {
    let document = JsonDocument {
        equation,
        epsilon,
        problems: reports
            .iter()
            .map(|report| JsonProblem {
                problem: &report.problem,
                results: report
                    .outcomes
                    .iter()
                    .map(|outcome| match &outcome.result {
                        Ok(result) => JsonOutcome::Solved(result),
                        Err(error) => JsonOutcome::Failed {
                            method_name: outcome.method_name,
                            error: error.to_string(),
                        },
                    })
                    .collect(),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out).map_err(serde_json::Error::io)
}
