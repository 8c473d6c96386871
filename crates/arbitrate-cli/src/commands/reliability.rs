//! Reliability command - inter-rater agreement table.

use std::path::PathBuf;

use arbitrate::project::rows_to_string;
use colored::Colorize;

use super::{open_session, output_dir, CommandResult};
use crate::cli::Inputs;

pub fn run(inputs: &Inputs, output: Option<PathBuf>, print: bool) -> CommandResult {
    let session = open_session(inputs)?;
    let report = session.reliability()?;

    let agreement = report.overall_agreement() * 100.0;
    let colored_agreement = match agreement {
        a if a >= 80.0 => format!("{:.1}%", a).green(),
        a if a >= 60.0 => format!("{:.1}%", a).yellow(),
        a => format!("{:.1}%", a).red(),
    };
    println!(
        "{} {} over {} double-coded cases and {} questions",
        "Agreement:".cyan().bold(),
        colored_agreement,
        report.cases.len(),
        report.questions.len()
    );

    if print {
        print!("{}", rows_to_string(&report.to_rows())?);
    }

    let path = session.export_reliability_to(output_dir(output, inputs))?;
    println!("{} {}", "Wrote".cyan(), path.display());
    Ok(())
}
