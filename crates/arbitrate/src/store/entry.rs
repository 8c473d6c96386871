//! Arbitration entries and their status.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::questions::KeyTree;

/// Answers of one coder for one case, keyed by question identifier.
pub type Answers = IndexMap<String, String>;

/// Answer sets of every coder for one case, in import order.
pub type CoderCase = IndexMap<String, Answers>;

/// Arbitration decisions for one case, keyed by question identifier.
pub type ArbitratedCase = IndexMap<String, ArbitrationEntry>;

/// Whether a question's final value has been decided.
///
/// Stored as `0`/`1` in project files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ArbitrationStatus {
    /// Still needs a decision.
    #[default]
    NotArbitrated,
    /// Final value confirmed.
    Arbitrated,
}

impl ArbitrationStatus {
    /// Check whether the value is final.
    pub fn is_arbitrated(&self) -> bool {
        matches!(self, ArbitrationStatus::Arbitrated)
    }

    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            ArbitrationStatus::NotArbitrated => ArbitrationStatus::Arbitrated,
            ArbitrationStatus::Arbitrated => ArbitrationStatus::NotArbitrated,
        }
    }
}

impl From<ArbitrationStatus> for u8 {
    fn from(status: ArbitrationStatus) -> Self {
        match status {
            ArbitrationStatus::NotArbitrated => 0,
            ArbitrationStatus::Arbitrated => 1,
        }
    }
}

impl TryFrom<u8> for ArbitrationStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ArbitrationStatus::NotArbitrated),
            1 => Ok(ArbitrationStatus::Arbitrated),
            other => Err(format!("invalid arbitration status {other}")),
        }
    }
}

/// The arbitrated value of one question in one case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrationEntry {
    pub value: String,
    pub status: ArbitrationStatus,
}

impl ArbitrationEntry {
    /// An entry taken from an arbitrator's file, already decided.
    pub fn arbitrated(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            status: ArbitrationStatus::Arbitrated,
        }
    }

    /// The placeholder created when a case is first opened.
    pub fn pending() -> Self {
        Self::default()
    }

    /// Check whether the value is final.
    pub fn is_arbitrated(&self) -> bool {
        self.status.is_arbitrated()
    }
}

impl KeyTree for ArbitrationEntry {
    fn collect_keys(&self, _depth: usize, _out: &mut IndexSet<String>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_number() {
        let entry = ArbitrationEntry::arbitrated("Yes");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"value":"Yes","status":1}"#);

        let back: ArbitrationEntry = serde_json::from_str(r#"{"value":"","status":0}"#).unwrap();
        assert_eq!(back, ArbitrationEntry::pending());
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let result: Result<ArbitrationEntry, _> =
            serde_json::from_str(r#"{"value":"x","status":7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_toggle() {
        assert_eq!(
            ArbitrationStatus::NotArbitrated.toggled(),
            ArbitrationStatus::Arbitrated
        );
        assert!(!ArbitrationStatus::Arbitrated.toggled().is_arbitrated());
    }
}
