//! Export command - write the merged dataset.

use std::path::PathBuf;

use colored::Colorize;

use super::{open_session, output_dir, CommandResult};
use crate::cli::Inputs;

pub fn run(inputs: &Inputs, only_fully_arbitrated: bool, output: Option<PathBuf>) -> CommandResult {
    let session = open_session(inputs)?;
    let rows = session.export_data(only_fully_arbitrated).len().saturating_sub(1);

    let path = session.export_csv_to(output_dir(output, inputs), only_fully_arbitrated)?;
    println!(
        "{} {} cases to {}",
        "Exported".green().bold(),
        rows,
        path.display()
    );
    Ok(())
}
