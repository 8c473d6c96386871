//! Resolve command - confirm every answer both coders agree on.

use std::path::PathBuf;

use colored::Colorize;

use super::{open_session, output_dir, CommandResult};
use crate::cli::Inputs;

pub fn run(inputs: &Inputs, output: Option<PathBuf>) -> CommandResult {
    let mut session = open_session(inputs)?;

    let double_coded: Vec<String> = session
        .case_summaries()
        .into_iter()
        .filter(|s| !s.is_single_coded())
        .map(|s| s.id)
        .collect();

    let mut resolved = 0;
    let mut cases_touched = 0;
    for case_id in &double_coded {
        let count = session.open_case(case_id)?.auto_resolve()?;
        if count > 0 {
            cases_touched += 1;
            resolved += count;
        }
    }

    println!(
        "{} {} answers in {} of {} double-coded cases",
        "Resolved".green().bold(),
        resolved,
        cases_touched,
        double_coded.len()
    );

    let path = session.save_to(output_dir(output, inputs))?;
    println!("{} {}", "Saved".cyan(), path.display());
    Ok(())
}
