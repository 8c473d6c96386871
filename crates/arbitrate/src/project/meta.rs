//! Project configuration and per-case annotations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default project name, also used when the name is blank.
pub const DEFAULT_PROJECT_NAME: &str = "Arbitration";

/// Number of distinct flag values, including "no flag".
pub const FLAG_COUNT: u8 = 4;

/// A case marker cycling through `0..FLAG_COUNT`; `0` means unflagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Flag(u8);

impl Flag {
    /// Create a flag, rejecting values outside `0..FLAG_COUNT`.
    pub fn new(value: u8) -> Option<Self> {
        (value < FLAG_COUNT).then_some(Self(value))
    }

    /// Numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Check whether any flag is set.
    pub fn is_set(&self) -> bool {
        self.0 != 0
    }

    /// The next flag, wrapping back to unflagged.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % FLAG_COUNT)
    }
}

impl From<Flag> for u8 {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

impl TryFrom<u8> for Flag {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Flag::new(value).ok_or_else(|| format!("flag {value} out of range 0..{FLAG_COUNT}"))
    }
}

/// Notes and flag attached to a case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInfo {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub flag: Flag,
}

/// Project-wide settings, persisted with the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    /// Free-text project name, used in file names.
    pub name: String,
    /// Column identifying the case in imported files.
    pub case_id_key: String,
    /// Column identifying the coder in coder files.
    pub coder_id_key: String,
    /// Questions whose first-coder values make up a case title.
    #[serde(alias = "invariateHeaders")]
    pub invariant_headers: Vec<String>,
    /// Annotations per case.
    #[serde(default)]
    pub case_info: IndexMap<String, CaseInfo>,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROJECT_NAME.to_string(),
            case_id_key: "Q38 Case ID (from spreadsheet)".to_string(),
            coder_id_key: "Q39 Coder:".to_string(),
            invariant_headers: vec![
                "Q57 Country Name (from spreadsheet)".to_string(),
                "Q56 Year (from spreadsheet)".to_string(),
            ],
            case_info: IndexMap::new(),
        }
    }
}

impl ProjectMeta {
    /// Create project settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the case id column.
    pub fn with_case_id_key(mut self, key: impl Into<String>) -> Self {
        self.case_id_key = key.into();
        self
    }

    /// Set the coder id column.
    pub fn with_coder_id_key(mut self, key: impl Into<String>) -> Self {
        self.coder_id_key = key.into();
        self
    }

    /// Set the title columns.
    pub fn with_invariant_headers(mut self, headers: Vec<String>) -> Self {
        self.invariant_headers = headers;
        self
    }

    /// Name for file names, falling back to the default when blank.
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_PROJECT_NAME
        } else {
            trimmed
        }
    }

    /// Flag of a case, unflagged if the case has no annotations.
    pub fn flag(&self, case_id: &str) -> Flag {
        self.case_info
            .get(case_id)
            .map(|info| info.flag)
            .unwrap_or_default()
    }

    /// Annotations of a case, created on first access.
    pub fn case_info_mut(&mut self, case_id: &str) -> &mut CaseInfo {
        self.case_info.entry(case_id.to_string()).or_default()
    }

    /// Overlay saved settings: present fields replace the current ones and
    /// case annotations merge per case.
    pub fn merge_from(&mut self, update: ProjectMetaUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(key) = update.case_id_key {
            self.case_id_key = key;
        }
        if let Some(key) = update.coder_id_key {
            self.coder_id_key = key;
        }
        if let Some(headers) = update.invariant_headers {
            self.invariant_headers = headers;
        }
        for (case_id, info) in update.case_info {
            self.case_info.insert(case_id, info);
        }
    }
}

/// Partially specified project settings, as read from a project file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetaUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub case_id_key: Option<String>,
    #[serde(default)]
    pub coder_id_key: Option<String>,
    #[serde(default, alias = "invariateHeaders")]
    pub invariant_headers: Option<Vec<String>>,
    #[serde(default)]
    pub case_info: IndexMap<String, CaseInfo>,
}
