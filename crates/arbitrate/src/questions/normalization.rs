//! Registry of question renames.
//!
//! Survey exports rename questions between waves. The registry maps every
//! known old identifier to its canonical identifier and pushes each change to
//! the stores holding data, so imported answers are migrated the moment a
//! mapping is added or removed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ArbitrationError, Result};

use super::sorter::sorted_keys;

/// Receives rename notifications from [`QuestionNormalization`].
pub trait RenameObserver {
    /// Move data stored under `old` to `new`.
    fn rename_question(&mut self, old: &str, new: &str);
}

/// A single rename that was dispatched to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub old: String,
    pub new: String,
}

/// One row of the mapping table, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub old_name: String,
    pub new_name: String,
}

/// Old identifier to canonical identifier mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionNormalization {
    key_map: IndexMap<String, String>,
}

impl QuestionNormalization {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `mappings` into the registry, then notify every observer of each
    /// pair in the order supplied.
    pub fn add_mappings(
        &mut self,
        mappings: &IndexMap<String, String>,
        observers: &mut [&mut dyn RenameObserver],
    ) -> Vec<Rename> {
        for (old, new) in mappings {
            self.key_map.insert(old.clone(), new.clone());
        }

        let mut renames = Vec::with_capacity(mappings.len());
        for (old, new) in mappings {
            for observer in observers.iter_mut() {
                observer.rename_question(old, new);
            }
            renames.push(Rename {
                old: old.clone(),
                new: new.clone(),
            });
        }
        renames
    }

    /// Undo a mapping: observers see the reversed rename `new -> old` before
    /// the entry is dropped.
    pub fn remove_mapping(
        &mut self,
        old: &str,
        observers: &mut [&mut dyn RenameObserver],
    ) -> Result<Rename> {
        let new = self
            .key_map
            .get(old)
            .cloned()
            .ok_or_else(|| ArbitrationError::UnknownMapping(old.to_string()))?;

        for observer in observers.iter_mut() {
            observer.rename_question(&new, old);
        }
        self.key_map.shift_remove(old);

        Ok(Rename {
            old: new,
            new: old.to_string(),
        })
    }

    /// The live mapping.
    pub fn current_map(&self) -> &IndexMap<String, String> {
        &self.key_map
    }

    /// Canonical name for `question_id`, if one is registered.
    pub fn canonical(&self, question_id: &str) -> Option<&str> {
        self.key_map.get(question_id).map(String::as_str)
    }

    /// Check whether `old` has a mapping.
    pub fn contains(&self, old: &str) -> bool {
        self.key_map.contains_key(old)
    }

    /// Mappings ordered by the old question identifier.
    pub fn sorted_map(&self) -> Vec<MappingEntry> {
        sorted_keys(&self.key_map, 0)
            .into_iter()
            .map(|old_name| MappingEntry {
                new_name: self.key_map[&old_name].clone(),
                old_name,
            })
            .collect()
    }

    /// Number of registered mappings.
    pub fn len(&self) -> usize {
        self.key_map.len()
    }

    /// True when no mappings are registered.
    pub fn is_empty(&self) -> bool {
        self.key_map.is_empty()
    }
}
