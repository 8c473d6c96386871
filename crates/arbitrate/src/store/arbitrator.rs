//! Arbitration decisions per case.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::input::{ImportConfig, Parser, RecordSet};
use crate::questions::{remap_keys, sorted_keys, QuestionNormalization, RenameObserver};

use super::encoding::{generate_key_maps, SavedArbitration};
use super::entry::{ArbitratedCase, ArbitrationEntry, ArbitrationStatus};

/// Suffixes marking a truncated question label.
const ELLIPSIS_MARKERS: &[&str] = &["...", "\u{2026}"];

/// Two differing values met under one question during a rename.
///
/// The entry under the new key is kept and reopened for review; the value
/// that was under the old key is recorded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameConflict {
    pub case_id: String,
    pub old_key: String,
    pub new_key: String,
    pub kept_value: String,
    pub displaced_value: String,
}

/// Holds arbitrated values, keyed by case then question.
#[derive(Debug, Clone, Default)]
pub struct ArbitratorDataStore {
    cases: IndexMap<String, ArbitratedCase>,
    conflicts: Vec<RenameConflict>,
}

impl ArbitratorDataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and import it as an arbitrator's file.
    pub fn import_raw_data(
        &mut self,
        text: &str,
        case_id_key: &str,
        normalization: &QuestionNormalization,
        config: &ImportConfig,
    ) -> Result<usize> {
        let records = Parser::with_config(config.clone()).parse_str(text)?;
        self.import_records(&records, case_id_key, normalization)
    }

    /// Import parsed records. Every value is taken as already arbitrated and
    /// merged into the case question by question.
    pub fn import_records(
        &mut self,
        records: &RecordSet,
        case_id_key: &str,
        normalization: &QuestionNormalization,
    ) -> Result<usize> {
        records.require_column(case_id_key)?;

        let mut imported = 0;
        for record in &records.records {
            let Some(case_id) = record.get(case_id_key).filter(|id| !id.is_empty()) else {
                debug!("skipping arbitration row without a case id");
                continue;
            };

            let case = self.cases.entry(case_id.clone()).or_default();
            for (question_id, value) in remap_keys(normalization.current_map(), record) {
                case.insert(question_id, ArbitrationEntry::arbitrated(value));
            }
            imported += 1;
        }

        info!(cases = imported, "imported arbitration data");
        Ok(imported)
    }

    /// Arbitration entries of a case, if it has been opened or imported.
    pub fn case(&self, case_id: &str) -> Option<&ArbitratedCase> {
        self.cases.get(case_id)
    }

    /// Arbitration entries of a case, creating an empty case on first use.
    pub fn case_mut(&mut self, case_id: &str) -> &mut ArbitratedCase {
        self.cases.entry(case_id.to_string()).or_default()
    }

    /// Give every listed question a placeholder entry if it has none yet.
    pub fn ensure_questions<'a>(
        &mut self,
        case_id: &str,
        question_ids: impl IntoIterator<Item = &'a String>,
    ) -> &mut ArbitratedCase {
        let case = self.case_mut(case_id);
        for question_id in question_ids {
            case.entry(question_id.clone())
                .or_insert_with(ArbitrationEntry::pending);
        }
        case
    }

    /// The whole store.
    pub fn cases(&self) -> &IndexMap<String, ArbitratedCase> {
        &self.cases
    }

    /// Conflicts met while renaming questions since the store was created.
    pub fn conflicts(&self) -> &[RenameConflict] {
        &self.conflicts
    }

    /// True when the case exists and has no entry awaiting arbitration.
    ///
    /// A case never opened is not fully arbitrated, while an opened case
    /// with no questions is.
    pub fn is_fully_arbitrated(&self, case_id: &str) -> bool {
        self.cases
            .get(case_id)
            .is_some_and(|case| case.values().all(ArbitrationEntry::is_arbitrated))
    }

    /// True when the case exists and at least one entry is arbitrated.
    pub fn is_partially_arbitrated(&self, case_id: &str) -> bool {
        self.cases
            .get(case_id)
            .is_some_and(|case| case.values().any(ArbitrationEntry::is_arbitrated))
    }

    /// Rows for the merged export: the sorted question header, then each
    /// case's values in that column order.
    pub fn export_data(&self, only_fully_arbitrated: bool) -> Vec<Vec<String>> {
        let question_ids = sorted_keys(&self.cases, 1);
        let mut rows = Vec::with_capacity(self.cases.len() + 1);

        for (case_id, case) in &self.cases {
            if only_fully_arbitrated && !self.is_fully_arbitrated(case_id) {
                continue;
            }
            let row = question_ids
                .iter()
                .map(|q| case.get(q).map(|e| e.value.clone()).unwrap_or_default())
                .collect();
            rows.push(row);
        }

        rows.insert(0, question_ids);
        rows
    }

    /// Alias-encode the store for a project file.
    pub fn data_for_saving(&self) -> SavedArbitration {
        let maps = generate_key_maps(&self.cases);
        let data = self
            .cases
            .iter()
            .map(|(case_id, case)| (case_id.clone(), remap_keys(&maps.full_to_short, case)))
            .collect();

        SavedArbitration {
            data,
            key_map: maps.short_to_full,
        }
    }

    /// Replace the saved cases with their decoded contents.
    ///
    /// The caller is expected to run [`Self::normalize_keys`] afterwards so
    /// mappings registered since the save are applied.
    pub fn set_data_from_loading(&mut self, saved: &SavedArbitration) {
        for (case_id, case) in &saved.data {
            self.cases
                .insert(case_id.clone(), remap_keys(&saved.key_map, case));
        }
        debug!(cases = saved.data.len(), "restored arbitration data");
    }

    /// Apply every registered rename, then return mappings from truncated
    /// labels to their full forms that are not yet registered.
    pub fn normalize_keys(
        &mut self,
        normalization: &QuestionNormalization,
    ) -> IndexMap<String, String> {
        for (old, new) in normalization.current_map() {
            self.rename_question(old, new);
        }
        self.identify_long_names(normalization)
    }

    /// Find full labels for question ids ending in an ellipsis.
    ///
    /// Within each case, a truncated id maps to the first other id that starts
    /// with the truncated prefix. The first match across all cases wins.
    pub fn identify_long_names(
        &self,
        normalization: &QuestionNormalization,
    ) -> IndexMap<String, String> {
        let mut long_names = IndexMap::new();

        for case in self.cases.values() {
            for abbreviated in case.keys() {
                let Some(prefix) = strip_ellipsis(abbreviated) else {
                    continue;
                };
                if long_names.contains_key(abbreviated) || normalization.contains(abbreviated) {
                    continue;
                }
                if let Some(full) = case
                    .keys()
                    .find(|other| *other != abbreviated && other.starts_with(prefix))
                {
                    debug!(abbreviated = %abbreviated, full = %full, "resolved truncated label");
                    long_names.insert(abbreviated.clone(), full.clone());
                }
            }
        }

        long_names
    }

    fn rename_in_case(
        conflicts: &mut Vec<RenameConflict>,
        case_id: &str,
        case: &mut ArbitratedCase,
        old: &str,
        new: &str,
    ) {
        let Some(old_entry) = case.shift_remove(old) else {
            return;
        };

        let Some(existing) = case.get_mut(new) else {
            case.insert(new.to_string(), old_entry);
            return;
        };

        if existing.value.is_empty() {
            *existing = old_entry;
            return;
        }
        if *existing == old_entry || old_entry.value.is_empty() {
            return;
        }

        warn!(
            case_id = %case_id,
            old_key = %old,
            new_key = %new,
            kept = %existing.value,
            displaced = %old_entry.value,
            "conflicting values after question rename, reopening for review"
        );
        conflicts.push(RenameConflict {
            case_id: case_id.to_string(),
            old_key: old.to_string(),
            new_key: new.to_string(),
            kept_value: existing.value.clone(),
            displaced_value: old_entry.value,
        });
        existing.status = ArbitrationStatus::NotArbitrated;
    }
}

impl RenameObserver for ArbitratorDataStore {
    fn rename_question(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        for (case_id, case) in self.cases.iter_mut() {
            Self::rename_in_case(&mut self.conflicts, case_id, case, old, new);
        }
    }
}

fn strip_ellipsis(question_id: &str) -> Option<&str> {
    ELLIPSIS_MARKERS
        .iter()
        .find_map(|marker| question_id.strip_suffix(marker))
}
