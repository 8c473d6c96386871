//! Key substitution for string-keyed records.

use std::hash::Hash;

use indexmap::IndexMap;

/// Rename the keys of `record` through `key_map`.
///
/// Keys without an entry in `key_map` pass through unchanged. Output order
/// follows the input order; if two keys land on the same name the later
/// value wins.
pub fn remap_keys<V: Clone>(
    key_map: &IndexMap<String, String>,
    record: &IndexMap<String, V>,
) -> IndexMap<String, V> {
    let mut remapped = IndexMap::with_capacity(record.len());
    for (key, value) in record {
        let updated = key_map.get(key).unwrap_or(key);
        remapped.insert(updated.clone(), value.clone());
    }
    remapped
}

/// Swap keys and values of a mapping.
pub fn invert<K, V>(map: &IndexMap<K, V>) -> IndexMap<V, K>
where
    K: Clone,
    V: Clone + Hash + Eq,
{
    map.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_known_keys_are_replaced() {
        let key_map = map(&[("Q1 old", "Q1 new")]);
        let record = map(&[("Q1 old", "yes"), ("Q2", "no")]);

        let remapped = remap_keys(&key_map, &record);

        assert_eq!(remapped.get("Q1 new").map(String::as_str), Some("yes"));
        assert_eq!(remapped.get("Q2").map(String::as_str), Some("no"));
        assert!(!remapped.contains_key("Q1 old"));
    }

    #[test]
    fn test_empty_map_is_identity() {
        let record = map(&[("b", "1"), ("a", "2")]);
        assert_eq!(remap_keys(&IndexMap::new(), &record), record);
    }

    #[test]
    fn test_inverse_restores_bijection() {
        let key_map = map(&[("long question", "1"), ("other question", "2")]);
        let record = map(&[("long question", "x"), ("other question", "y")]);

        let short = remap_keys(&key_map, &record);
        let restored = remap_keys(&invert(&key_map), &short);

        assert_eq!(restored, record);
    }
}
