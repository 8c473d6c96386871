//! Ordering for survey-export question identifiers.
//!
//! Identifiers look like `Q12_3 How many ...`: a one-character prefix, a
//! major number, an optional `_`-separated minor number, and free text after
//! the first space. They sort by `major + minor / 100`.

use std::cmp::Ordering;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;

/// Order key for identifiers that do not have the expected shape.
pub const UNPARSEABLE_ORDER: f64 = -1.0;

static QUESTION_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.([0-9]+)(?:_([0-9]+)(?:_\S*)?)?$").expect("question number pattern is valid")
});

/// Derive the numeric order key of a question identifier.
///
/// Malformed identifiers get [`UNPARSEABLE_ORDER`], which places them before
/// every well-formed identifier.
pub fn question_order(question_id: &str) -> f64 {
    let token = question_id.split(' ').next().unwrap_or_default();
    let Some(caps) = QUESTION_NUMBER.captures(token) else {
        return UNPARSEABLE_ORDER;
    };

    let Ok(major) = caps[1].parse::<u32>() else {
        return UNPARSEABLE_ORDER;
    };
    match caps.get(2) {
        None => f64::from(major),
        Some(minor) => match minor.as_str().parse::<u32>() {
            Ok(minor) => f64::from(major) + f64::from(minor) / 100.0,
            Err(_) => UNPARSEABLE_ORDER,
        },
    }
}

/// Compare two question identifiers by their order keys.
pub fn compare_questions(a: &str, b: &str) -> Ordering {
    question_order(a).total_cmp(&question_order(b))
}

/// Nested string-keyed containers whose keys can be collected at a depth.
pub trait KeyTree {
    /// Add the keys found `depth` levels below this node to `out`.
    fn collect_keys(&self, depth: usize, out: &mut IndexSet<String>);
}

impl<V: KeyTree> KeyTree for IndexMap<String, V> {
    fn collect_keys(&self, depth: usize, out: &mut IndexSet<String>) {
        match depth {
            0 => {
                for key in self.keys() {
                    if !out.contains(key) {
                        out.insert(key.clone());
                    }
                }
            }
            _ => {
                for value in self.values() {
                    value.collect_keys(depth - 1, out);
                }
            }
        }
    }
}

impl KeyTree for String {
    fn collect_keys(&self, _depth: usize, _out: &mut IndexSet<String>) {}
}

/// Collect the unique keys `depth` levels into `container`, sorted by
/// [`compare_questions`].
///
/// The sort is stable, so identifiers with equal order keys keep the order in
/// which they were first encountered.
pub fn sorted_keys<T: KeyTree + ?Sized>(container: &T, depth: usize) -> Vec<String> {
    let mut unique = IndexSet::new();
    container.collect_keys(depth, &mut unique);

    let mut keys: Vec<String> = unique.into_iter().collect();
    keys.sort_by(|a, b| compare_questions(a, b));
    keys
}
