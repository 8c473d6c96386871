//! Per-case answers from each coder.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{ArbitrationError, Result};
use crate::input::{ImportConfig, Parser, RecordSet};
use crate::questions::{remap_keys, QuestionNormalization, RenameObserver};

use super::entry::{Answers, CoderCase};
use super::reliability::ReliabilityReport;

/// Outcome of importing one coder file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Coder the file was attributed to.
    pub coder_id: String,
    /// Number of case submissions stored.
    pub case_count: usize,
}

/// Holds every coder's answers, keyed by case then coder.
#[derive(Debug, Clone, Default)]
pub struct CoderDataStore {
    cases: IndexMap<String, CoderCase>,
}

impl CoderDataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and import it as one coder's submissions.
    pub fn import_raw_data(
        &mut self,
        text: &str,
        case_id_key: &str,
        coder_id_key: &str,
        normalization: &QuestionNormalization,
        config: &ImportConfig,
    ) -> Result<ImportSummary> {
        let records = Parser::with_config(config.clone()).parse_str(text)?;
        self.import_records(&records, case_id_key, coder_id_key, normalization)
    }

    /// Import parsed records as one coder's submissions.
    ///
    /// The whole file is attributed to the coder named in the first record.
    /// Values are trimmed and question keys pass through the current
    /// normalization map. A case already holding answers from this coder has
    /// them replaced. Nothing is stored unless the whole file is valid.
    pub fn import_records(
        &mut self,
        records: &RecordSet,
        case_id_key: &str,
        coder_id_key: &str,
        normalization: &QuestionNormalization,
    ) -> Result<ImportSummary> {
        records.require_column(case_id_key)?;
        records.require_column(coder_id_key)?;

        let first = records
            .records
            .first()
            .ok_or_else(|| ArbitrationError::EmptyData("No coder submissions".to_string()))?;
        let coder_id = first
            .get(coder_id_key)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        let mut parsed: IndexMap<String, Answers> = IndexMap::new();
        for record in &records.records {
            let case_id = record
                .get(case_id_key)
                .map(|v| v.trim())
                .unwrap_or_default();
            if case_id.is_empty() {
                debug!(coder = %coder_id, "skipping submission without a case id");
                continue;
            }

            let trimmed: Answers = record
                .iter()
                .filter(|(key, _)| key.as_str() != coder_id_key)
                .map(|(key, value)| (key.clone(), value.trim().to_string()))
                .collect();
            parsed.insert(
                case_id.to_string(),
                remap_keys(normalization.current_map(), &trimmed),
            );
        }

        let case_count = parsed.len();
        for (case_id, answers) in parsed {
            self.cases
                .entry(case_id)
                .or_default()
                .insert(coder_id.clone(), answers);
        }

        info!(coder = %coder_id, cases = case_count, "imported coder data");
        Ok(ImportSummary {
            coder_id,
            case_count,
        })
    }

    /// Every coder's answers for a case.
    pub fn case(&self, case_id: &str) -> Option<&CoderCase> {
        self.cases.get(case_id)
    }

    /// The whole store.
    pub fn cases(&self) -> &IndexMap<String, CoderCase> {
        &self.cases
    }

    /// Number of coders who submitted the case.
    pub fn coder_count(&self, case_id: &str) -> usize {
        self.cases.get(case_id).map_or(0, |c| c.len())
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True when nothing has been imported.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Agreement between coders on every double-coded case.
    pub fn reliability(&self) -> Result<ReliabilityReport> {
        ReliabilityReport::compute(&self.cases)
    }
}

impl RenameObserver for CoderDataStore {
    fn rename_question(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        for coders in self.cases.values_mut() {
            for answers in coders.values_mut() {
                if let Some(value) = answers.shift_remove(old) {
                    answers.insert(new.to_string(), value);
                }
            }
        }
    }
}
