//! CSV/TSV parser with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{ArbitrationError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// One parsed row, keyed by column header in file order.
pub type Record = IndexMap<String, String>;

/// Import configuration.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

impl ImportConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a delimiter instead of detecting it.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }
}

/// Parsed header-bearing text.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    /// Column headers in file order.
    pub headers: Vec<String>,
    /// One record per data row.
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Check whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Fail with [`ArbitrationError::MissingColumn`] unless the column exists.
    pub fn require_column(&self, name: &str) -> Result<()> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(ArbitrationError::MissingColumn {
                column: name.to_string(),
            })
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records were parsed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Turns delimited text into string-keyed records.
pub struct Parser {
    config: ImportConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ImportConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Read a file into a string, mapping failures to [`ArbitrationError::Io`].
    pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|e| ArbitrationError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parse a file from disk.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<RecordSet> {
        let contents = Self::read_file(path)?;
        self.parse_str(&contents)
    }

    /// Parse text with a header row into records.
    pub fn parse_str(&self, text: &str) -> Result<RecordSet> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let bytes = text.as_bytes();

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        if delimiter == self.config.quote {
            return Err(ArbitrationError::Config(format!(
                "Delimiter and quote are both '{}'",
                char::from(delimiter)
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ArbitrationError::EmptyData("No columns found".to_string()));
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let mut record = Record::with_capacity(headers.len());
            for (index, header) in headers.iter().enumerate() {
                // Short rows are padded with empty values.
                let value = row.get(index).unwrap_or("");
                record.insert(header.clone(), value.to_string());
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(ArbitrationError::EmptyData("No data rows found".to_string()));
        }

        Ok(RecordSet { headers, records })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ArbitrationError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines beat a higher but ragged count.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
