//! Question identifiers: ordering, key substitution, and normalization.

mod normalization;
mod remap;
mod sorter;

pub use normalization::{MappingEntry, QuestionNormalization, Rename, RenameObserver};
pub use remap::{invert, remap_keys};
pub use sorter::{compare_questions, question_order, sorted_keys, KeyTree, UNPARSEABLE_ORDER};
