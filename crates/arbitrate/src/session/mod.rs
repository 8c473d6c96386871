//! The arbitration session: every store of one project and the operations
//! that keep them consistent.

mod persistence;

use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::error::Result;
use crate::events::{DataSource, EventBus, SessionEvent};
use crate::input::{ImportConfig, Parser};
use crate::project::ProjectMeta;
use crate::questions::{QuestionNormalization, Rename, RenameObserver};
use crate::review::{CaseFilter, CaseReview, CaseSummary};
use crate::store::{ArbitratorDataStore, CoderDataStore, ImportSummary, ReliabilityReport};

pub use persistence::{ProjectDocument, ARBITRATOR_KEY, PROJECT_META_KEY, QUESTION_NORMALIZATION_KEY};

/// One open project.
///
/// Owns the coder and arbitrator stores, the rename registry, and the
/// project settings. Renames registered here are pushed to both stores before
/// the call returns, and every change to arbitration data sets the dirty flag
/// until the next save or load.
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) project: ProjectMeta,
    pub(crate) coders: CoderDataStore,
    pub(crate) arbitrator: ArbitratorDataStore,
    pub(crate) normalization: QuestionNormalization,
    import_config: ImportConfig,
    events: EventBus,
    dirty: bool,
}

impl Session {
    /// Create an empty session with default project settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given project settings.
    pub fn with_project(mut self, project: ProjectMeta) -> Self {
        self.project = project;
        self
    }

    /// Use the given import configuration for every import.
    pub fn with_import_config(mut self, config: ImportConfig) -> Self {
        self.import_config = config;
        self
    }

    /// Project settings.
    pub fn project(&self) -> &ProjectMeta {
        &self.project
    }

    /// Mutable project settings. Marks the project dirty.
    pub fn project_mut(&mut self) -> &mut ProjectMeta {
        self.dirty = true;
        &mut self.project
    }

    /// Coder answers.
    pub fn coders(&self) -> &CoderDataStore {
        &self.coders
    }

    /// Arbitration decisions.
    pub fn arbitrator(&self) -> &ArbitratorDataStore {
        &self.arbitrator
    }

    /// The rename registry.
    pub fn normalization(&self) -> &QuestionNormalization {
        &self.normalization
    }

    /// Check for changes since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Receive every future [`SessionEvent`].
    pub fn subscribe(&mut self, subscriber: impl FnMut(&SessionEvent) + 'static) {
        self.events.subscribe(subscriber);
    }

    pub(crate) fn publish(&mut self, event: SessionEvent) {
        self.events.publish(event);
    }

    /// Record that a case changed and tell subscribers.
    pub(crate) fn case_changed(&mut self, case_id: &str) {
        self.dirty = true;
        self.publish(SessionEvent::CaseChanged {
            case_id: case_id.to_string(),
        });
    }

    /// Import one coder's export, keyed by the project's case and coder columns.
    pub fn import_coder_data(&mut self, text: &str) -> Result<ImportSummary> {
        let summary = self.coders.import_raw_data(
            text,
            &self.project.case_id_key,
            &self.project.coder_id_key,
            &self.normalization,
            &self.import_config,
        )?;
        self.publish(SessionEvent::DataLoaded {
            source: DataSource::Coder,
        });
        Ok(summary)
    }

    /// Read and import a coder file.
    pub fn import_coder_file(&mut self, path: impl AsRef<Path>) -> Result<ImportSummary> {
        let text = Parser::read_file(path)?;
        self.import_coder_data(&text)
    }

    /// Import an arbitrator's file, then register mappings for any truncated
    /// question labels it introduced.
    pub fn import_arbitrator_data(&mut self, text: &str) -> Result<usize> {
        let imported = self.arbitrator.import_raw_data(
            text,
            &self.project.case_id_key,
            &self.normalization,
            &self.import_config,
        )?;
        let long_names = self.arbitrator.identify_long_names(&self.normalization);
        self.apply_mappings(&long_names);

        self.dirty = true;
        self.publish(SessionEvent::DataLoaded {
            source: DataSource::Arbitrator,
        });
        Ok(imported)
    }

    /// Read and import an arbitrator file.
    pub fn import_arbitrator_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let text = Parser::read_file(path)?;
        self.import_arbitrator_data(&text)
    }

    /// Register renames and migrate existing data in both stores.
    pub fn add_mappings(&mut self, mappings: &IndexMap<String, String>) -> Vec<Rename> {
        let renames = self.apply_mappings(mappings);
        if !renames.is_empty() {
            self.dirty = true;
        }
        renames
    }

    /// Register a single rename.
    pub fn add_mapping(&mut self, old: impl Into<String>, new: impl Into<String>) -> Rename {
        let mut mapping = IndexMap::new();
        let old = old.into();
        let new = new.into();
        mapping.insert(old.clone(), new.clone());
        self.add_mappings(&mapping);
        Rename { old, new }
    }

    /// Drop a rename and move migrated data back under the old name.
    pub fn remove_mapping(&mut self, old: &str) -> Result<Rename> {
        let rename = {
            let observers: &mut [&mut dyn RenameObserver] =
                &mut [&mut self.coders, &mut self.arbitrator];
            self.normalization.remove_mapping(old, observers)?
        };
        info!(from = %rename.old, to = %rename.new, "removed question mapping");

        self.dirty = true;
        self.publish(SessionEvent::QuestionRenamed {
            old: rename.old.clone(),
            new: rename.new.clone(),
        });
        Ok(rename)
    }

    /// Point `old` at `new`, first undoing any mapping `old` already has.
    pub fn set_mapping(&mut self, old: &str, new: &str) -> Result<Rename> {
        if self.normalization.contains(old) {
            self.remove_mapping(old)?;
        }
        Ok(self.add_mapping(old, new))
    }

    /// Register renames without touching the dirty flag.
    pub(crate) fn apply_mappings(&mut self, mappings: &IndexMap<String, String>) -> Vec<Rename> {
        if mappings.is_empty() {
            return Vec::new();
        }

        let renames = {
            let observers: &mut [&mut dyn RenameObserver] =
                &mut [&mut self.coders, &mut self.arbitrator];
            self.normalization.add_mappings(mappings, observers)
        };

        for rename in &renames {
            info!(from = %rename.old, to = %rename.new, "registered question mapping");
            self.publish(SessionEvent::QuestionRenamed {
                old: rename.old.clone(),
                new: rename.new.clone(),
            });
        }
        renames
    }

    /// Open a case for arbitration.
    pub fn open_case(&mut self, case_id: &str) -> Result<CaseReview<'_>> {
        CaseReview::open(self, case_id)
    }

    /// `Case <id> | <title column values>` using the first coder's answers.
    pub fn case_title(&self, case_id: &str) -> String {
        let first_coder = self
            .coders
            .case(case_id)
            .and_then(|coders| coders.first())
            .map(|(_, answers)| answers);

        let title = self
            .project
            .invariant_headers
            .iter()
            .map(|header| {
                first_coder
                    .and_then(|answers| answers.get(header))
                    .map(String::as_str)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(" ");

        format!("Case {} | {}", case_id, title)
    }

    /// One summary per coded case, in import order.
    pub fn case_summaries(&self) -> Vec<CaseSummary> {
        self.coders
            .cases()
            .iter()
            .map(|(case_id, coders)| CaseSummary {
                id: case_id.clone(),
                coder_count: coders.len(),
                fully_arbitrated: self.arbitrator.is_fully_arbitrated(case_id),
                partially_arbitrated: self.arbitrator.is_partially_arbitrated(case_id),
                title: self.case_title(case_id),
                flag: self.project.flag(case_id),
            })
            .collect()
    }

    /// Summaries that pass `filter`.
    pub fn filtered_summaries(&self, filter: &CaseFilter) -> Vec<CaseSummary> {
        self.case_summaries()
            .into_iter()
            .filter(|summary| filter.matches(summary))
            .collect()
    }

    /// Inter-rater agreement over double-coded cases.
    pub fn reliability(&self) -> Result<ReliabilityReport> {
        self.coders.reliability()
    }

    /// Rows of the merged dataset.
    pub fn export_data(&self, only_fully_arbitrated: bool) -> Vec<Vec<String>> {
        self.arbitrator.export_data(only_fully_arbitrated)
    }
}
