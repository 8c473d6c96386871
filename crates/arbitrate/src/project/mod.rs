//! Project settings, case annotations, and project files.
//!
//! A saved project is a single JSON document with three top-level keys:
//!
//! ```text
//! {
//!   "arbitrator":            { "data": {...}, "keyMap": {...} },
//!   "projectMeta":           { "name": ..., "caseIdKey": ..., ... },
//!   "questionNormalization": { "<old question>": "<canonical question>" }
//! }
//! ```
//!
//! Coder answers are not saved; they are re-imported from the coders' files.

mod files;
mod meta;

pub use files::{
    export_file_name, in_directory, project_file_name, read_text, reliability_file_name,
    rows_to_string, timestamped_stem, write_rows, write_text, PROJECT_EXTENSION,
};
pub use meta::{CaseInfo, Flag, ProjectMeta, ProjectMetaUpdate, DEFAULT_PROJECT_NAME, FLAG_COUNT};
