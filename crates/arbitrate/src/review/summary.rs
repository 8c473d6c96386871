//! Case list entries and filtering.

use serde::{Deserialize, Serialize};

use crate::project::Flag;

/// Overview of one coded case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: String,
    pub coder_count: usize,
    pub fully_arbitrated: bool,
    pub partially_arbitrated: bool,
    pub title: String,
    pub flag: Flag,
}

impl CaseSummary {
    /// Coded by a single coder.
    pub fn is_single_coded(&self) -> bool {
        self.coder_count == 1
    }
}

/// Which cases to list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFilter {
    /// Show cases with one coder.
    pub include_single_coded: bool,
    /// Show multi-coded cases still needing arbitration.
    pub include_double_coded: bool,
    /// Show multi-coded cases that are fully arbitrated.
    pub include_fully_arbitrated: bool,
    /// Only show cases whose title contains this text.
    pub text: String,
}

impl Default for CaseFilter {
    fn default() -> Self {
        Self {
            include_single_coded: false,
            include_double_coded: true,
            include_fully_arbitrated: false,
            text: String::new(),
        }
    }
}

impl CaseFilter {
    /// The default filter: double-coded cases still needing work.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter that shows every case.
    pub fn all() -> Self {
        Self {
            include_single_coded: true,
            include_double_coded: true,
            include_fully_arbitrated: true,
            text: String::new(),
        }
    }

    /// Restrict to titles containing `text`.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Check whether a case should be listed.
    pub fn matches(&self, summary: &CaseSummary) -> bool {
        let by_state = if summary.is_single_coded() {
            self.include_single_coded
        } else if summary.fully_arbitrated {
            self.include_fully_arbitrated
        } else {
            self.include_double_coded
        };

        by_state && (self.text.is_empty() || summary.title.contains(&self.text))
    }
}
