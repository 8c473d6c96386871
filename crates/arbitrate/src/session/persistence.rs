//! Saving and loading sessions as project documents, and file exports.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ArbitrationError, Result};
use crate::events::{DataSource, SessionEvent};
use crate::project::{
    export_file_name, in_directory, project_file_name, read_text, reliability_file_name,
    write_rows, write_text, ProjectMeta, ProjectMetaUpdate,
};
use crate::questions::QuestionNormalization;
use crate::store::SavedArbitration;

use super::Session;

/// Top-level key holding arbitration data.
pub const ARBITRATOR_KEY: &str = "arbitrator";
/// Top-level key holding project settings.
pub const PROJECT_META_KEY: &str = "projectMeta";
/// Top-level key holding the rename registry.
pub const QUESTION_NORMALIZATION_KEY: &str = "questionNormalization";

/// A project document as written to disk.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument<'a> {
    pub arbitrator: SavedArbitration,
    pub project_meta: &'a ProjectMeta,
    pub question_normalization: &'a QuestionNormalization,
}

/// A recognised section of a loaded document.
enum Section {
    Arbitrator(SavedArbitration),
    ProjectMeta(ProjectMetaUpdate),
    QuestionNormalization(IndexMap<String, String>),
}

impl Session {
    /// Snapshot every savable part of the session.
    pub fn document(&self) -> ProjectDocument<'_> {
        ProjectDocument {
            arbitrator: self.arbitrator.data_for_saving(),
            project_meta: &self.project,
            question_normalization: &self.normalization,
        }
    }

    /// Serialize the session and clear the dirty flag.
    pub fn save_document(&mut self) -> Result<String> {
        let text = serde_json::to_string(&self.document())?;
        self.clear_dirty();
        Ok(text)
    }

    /// Save to `<dir>/<name>_<timestamp>.arb`, returning the path written.
    pub fn save_to(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = in_directory(dir, &project_file_name(self.project.display_name()));
        self.save_as(&path)?;
        Ok(path)
    }

    /// Save to an explicit path.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string(&self.document())?;
        write_text(path, &text)?;
        self.clear_dirty();

        info!(path = %path.display(), "saved project");
        Ok(())
    }

    /// Load a project file.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = read_text(path)?;
        self.load_document(&text).map_err(|e| match e {
            ArbitrationError::Json(source) => ArbitrationError::Persistence(format!(
                "Failed to parse project '{}': {}",
                path.display(),
                source
            )),
            other => other,
        })?;

        info!(path = %path.display(), "loaded project");
        Ok(())
    }

    /// Restore a project document into this session.
    ///
    /// Sections are applied in document order. Unknown top-level keys are
    /// skipped with a warning. Nothing is changed if any known section fails
    /// to parse, the dirty flag included.
    pub fn load_document(&mut self, text: &str) -> Result<()> {
        let document: IndexMap<String, Value> = serde_json::from_str(text)?;
        let mut sections = Vec::with_capacity(document.len());
        for (key, value) in document {
            let section = match key.as_str() {
                ARBITRATOR_KEY => Section::Arbitrator(serde_json::from_value(value)?),
                PROJECT_META_KEY => Section::ProjectMeta(serde_json::from_value(value)?),
                QUESTION_NORMALIZATION_KEY => {
                    Section::QuestionNormalization(serde_json::from_value(value)?)
                }
                _ => {
                    warn!(key = %key, "skipped unknown project section");
                    continue;
                }
            };
            sections.push(section);
        }

        self.clear_dirty();
        for section in sections {
            match section {
                Section::Arbitrator(saved) => self.restore_arbitration(&saved),
                Section::ProjectMeta(update) => self.project.merge_from(update),
                Section::QuestionNormalization(mappings) => {
                    self.apply_mappings(&mappings);
                }
            }
        }

        Ok(())
    }

    fn restore_arbitration(&mut self, saved: &SavedArbitration) {
        self.arbitrator.set_data_from_loading(saved);
        let long_names = self.arbitrator.normalize_keys(&self.normalization);
        self.apply_mappings(&long_names);
        self.publish(SessionEvent::DataLoaded {
            source: DataSource::Arbitrator,
        });
    }

    /// Write the merged dataset to `<dir>/<name>_<timestamp>.csv`.
    pub fn export_csv_to(
        &self,
        dir: impl AsRef<Path>,
        only_fully_arbitrated: bool,
    ) -> Result<PathBuf> {
        let path = in_directory(dir, &export_file_name(self.project.display_name()));
        write_rows(&path, &self.export_data(only_fully_arbitrated))?;

        info!(path = %path.display(), "exported arbitrated data");
        Ok(path)
    }

    /// Write the reliability table to `<dir>/Reliability_<name>_<timestamp>.csv`.
    pub fn export_reliability_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let report = self.reliability()?;
        let path = in_directory(dir, &reliability_file_name(self.project.display_name()));
        write_rows(&path, &report.to_rows())?;

        info!(path = %path.display(), "exported reliability");
        Ok(path)
    }
}
