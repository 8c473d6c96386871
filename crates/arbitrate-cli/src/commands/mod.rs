//! CLI command implementations.

pub mod export;
pub mod map;
pub mod reliability;
pub mod resolve;
pub mod status;

use std::path::PathBuf;

use arbitrate::Session;
use colored::Colorize;

use crate::cli::Inputs;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Build a session from the project file, column overrides, and data files.
///
/// The project loads first so its column names and mappings apply to the
/// imports that follow.
pub fn open_session(inputs: &Inputs) -> Result<Session, Box<dyn std::error::Error>> {
    if inputs.project.is_none() && inputs.coders.is_empty() && inputs.arbitrator.is_none() {
        return Err("Nothing to open: pass --project, --coder or --arbitrator".into());
    }

    let mut session = Session::new();

    if let Some(project) = &inputs.project {
        session.load(project)?;
    }
    if let Some(key) = &inputs.case_id_key {
        session.project_mut().case_id_key = key.clone();
    }
    if let Some(key) = &inputs.coder_id_key {
        session.project_mut().coder_id_key = key.clone();
    }
    if let Some(name) = &inputs.name {
        session.project_mut().name = name.clone();
    }

    for path in &inputs.coders {
        let summary = session.import_coder_file(path)?;
        tracing::debug!(
            path = %path.display(),
            coder = %summary.coder_id,
            cases = summary.case_count,
            "imported coder file"
        );
    }
    if let Some(path) = &inputs.arbitrator {
        session.import_arbitrator_file(path)?;
    }

    for conflict in session.arbitrator().conflicts() {
        eprintln!(
            "{} case {}: '{}' -> '{}' kept {:?}, displaced {:?}",
            "Conflict:".yellow().bold(),
            conflict.case_id,
            conflict.old_key,
            conflict.new_key,
            conflict.kept_value,
            conflict.displaced_value
        );
    }

    Ok(session)
}

/// Where to write output: the explicit directory, else next to the project
/// file, else the working directory.
pub fn output_dir(output: Option<PathBuf>, inputs: &Inputs) -> PathBuf {
    output
        .or_else(|| {
            inputs
                .project
                .as_ref()
                .and_then(|p| p.parent())
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
