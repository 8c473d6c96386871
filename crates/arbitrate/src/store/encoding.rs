//! Compact save format for arbitration data.
//!
//! Question identifiers are long free-text labels repeated in every case, so
//! saved data replaces each one with a short base-36 alias and stores the
//! alias table once.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::entry::ArbitratedCase;

/// Arbitration data as written to a project file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedArbitration {
    /// Case id to alias-keyed entries.
    pub data: IndexMap<String, ArbitratedCase>,
    /// Alias to full question identifier.
    pub key_map: IndexMap<String, String>,
}

/// Forward and reverse alias tables for one save.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyMaps {
    pub full_to_short: IndexMap<String, String>,
    pub short_to_full: IndexMap<String, String>,
}

/// Mint an alias for every distinct question, in first-seen order.
pub(crate) fn generate_key_maps(cases: &IndexMap<String, ArbitratedCase>) -> KeyMaps {
    let mut maps = KeyMaps::default();
    let mut counter: u64 = 0;

    for question_id in cases.values().flat_map(|case| case.keys()) {
        if maps.full_to_short.contains_key(question_id) {
            continue;
        }
        counter += 1;
        let alias = to_base36(counter);
        maps.full_to_short.insert(question_id.clone(), alias.clone());
        maps.short_to_full.insert(alias, question_id.clone());
    }

    maps
}

/// Lowercase base-36 rendering of `n`.
pub(crate) fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ArbitrationEntry;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(9), "9");
        assert_eq!(to_base36(10), "a");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }

    #[test]
    fn test_aliases_are_shared_across_cases() {
        let mut cases = IndexMap::new();
        let mut first = ArbitratedCase::new();
        first.insert("Q1 long".to_string(), ArbitrationEntry::arbitrated("a"));
        first.insert("Q2 long".to_string(), ArbitrationEntry::arbitrated("b"));
        let mut second = ArbitratedCase::new();
        second.insert("Q2 long".to_string(), ArbitrationEntry::pending());
        second.insert("Q3 long".to_string(), ArbitrationEntry::pending());
        cases.insert("c1".to_string(), first);
        cases.insert("c2".to_string(), second);

        let maps = generate_key_maps(&cases);

        assert_eq!(maps.full_to_short["Q1 long"], "1");
        assert_eq!(maps.full_to_short["Q2 long"], "2");
        assert_eq!(maps.full_to_short["Q3 long"], "3");
        assert_eq!(maps.short_to_full.len(), 3);
        assert_eq!(maps.short_to_full["2"], "Q2 long");
    }
}
