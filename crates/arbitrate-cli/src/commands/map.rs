//! Map and unmap commands - edit question renames.

use std::path::PathBuf;

use arbitrate::Session;
use colored::Colorize;

use super::{open_session, output_dir, CommandResult};
use crate::cli::Inputs;

pub fn run_map(inputs: &Inputs, old: &str, new: &str, output: Option<PathBuf>) -> CommandResult {
    let mut session = open_session(inputs)?;
    let known_conflicts = session.arbitrator().conflicts().len();
    let rename = session.set_mapping(old, new)?;
    println!(
        "{} '{}' -> '{}'",
        "Mapped".green().bold(),
        rename.old,
        rename.new
    );

    save(&mut session, known_conflicts, inputs, output)
}

pub fn run_unmap(inputs: &Inputs, old: &str, output: Option<PathBuf>) -> CommandResult {
    let mut session = open_session(inputs)?;
    let known_conflicts = session.arbitrator().conflicts().len();
    let rename = session.remove_mapping(old)?;
    println!(
        "{} '{}' (was '{}')",
        "Unmapped".yellow().bold(),
        rename.old,
        rename.new
    );

    save(&mut session, known_conflicts, inputs, output)
}

/// Report conflicts raised by this edit, then save.
fn save(
    session: &mut Session,
    known_conflicts: usize,
    inputs: &Inputs,
    output: Option<PathBuf>,
) -> CommandResult {
    for conflict in &session.arbitrator().conflicts()[known_conflicts..] {
        eprintln!(
            "{} case {} reopened '{}'",
            "Warning:".yellow().bold(),
            conflict.case_id,
            conflict.new_key
        );
    }

    let path = session.save_to(output_dir(output, inputs))?;
    println!("{} {}", "Saved".cyan(), path.display());
    Ok(())
}
