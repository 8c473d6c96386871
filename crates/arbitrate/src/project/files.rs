//! File names and writers for project files and exports.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::error::{ArbitrationError, Result};

/// Extension of saved project files.
pub const PROJECT_EXTENSION: &str = "arb";

/// `<name>_<yyyy-M-d H_m>`, with unpadded date and time fields.
pub fn timestamped_stem<Tz: TimeZone>(name: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}", name, at.format("%Y-%-m-%-d %-H_%-M"))
}

/// File name for a project save made now.
pub fn project_file_name(name: &str) -> String {
    format!("{}.{}", timestamped_stem(name, &Local::now()), PROJECT_EXTENSION)
}

/// File name for a merged export made now.
pub fn export_file_name(name: &str) -> String {
    format!("{}.csv", timestamped_stem(name, &Local::now()))
}

/// File name for a reliability export made now.
pub fn reliability_file_name(name: &str) -> String {
    format!("Reliability_{}.csv", timestamped_stem(name, &Local::now()))
}

/// Write text to `path`, creating parent directories.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents).map_err(|e| {
        ArbitrationError::Persistence(format!(
            "Failed to write file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Read a whole text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ArbitrationError::Persistence(format!(
            "Failed to open file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Write rows as comma-separated values.
pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| {
        ArbitrationError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(BufWriter::new(file));
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| ArbitrationError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Render rows as comma-separated text.
pub fn rows_to_string(rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ArbitrationError::Persistence(format!("Failed to render CSV: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| ArbitrationError::Persistence(format!("Rendered CSV is not UTF-8: {}", e)))
}

/// `dir` joined with `file_name`.
pub fn in_directory(dir: impl AsRef<Path>, file_name: &str) -> PathBuf {
    dir.as_ref().join(file_name)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                ArbitrationError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
