//! Delimited-text import.

mod parser;

pub use parser::{ImportConfig, Parser, Record, RecordSet};
