//! Case-insensitive column name handling
//!
//! Column names are compared without regard to case and without any
//! locale-specific rules: both sides are folded with Unicode lowercase
//! mapping. An empty name never matches anything.

use indexmap::IndexMap;

/// Fold a name to its lookup key, one char at a time
pub(crate) fn fold(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Compare two names ignoring case
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Strip `prefix` from the start of `name`, ignoring case.
///
/// Returns the remainder of `name` (original casing) when it starts with
/// the prefix.
pub fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = name.char_indices();
    for p in prefix.chars() {
        let (_, c) = rest.next()?;
        if !c.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    Some(rest.as_str())
}

/// An insertion-ordered map keyed by case-insensitive names
#[derive(Debug, Clone)]
pub struct NameMap<V> {
    /// folded name -> (name as inserted, value)
    entries: IndexMap<String, (String, V)>,
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> NameMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a name unless an equal name is already present.
    ///
    /// Returns false (and leaves the map unchanged) on a collision.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> bool {
        let name = name.into();
        let key = fold(&name);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, (name, value));
        true
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        if name.is_empty() {
            return None;
        }
        self.entries.get(&fold(name)).map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names in insertion order, with their original casing
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for NameMap<V> {
    /// Later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = NameMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let mut map = NameMap::new();
        assert!(map.insert("col1", 0));
        assert_eq!(map.get("COL1"), Some(&0));
        assert_eq!(map.get("Col1"), Some(&0));
        assert_eq!(map.get("col2"), None);
    }

    #[test]
    fn test_final_sigma_folds_like_other_comparisons() {
        let mut map = NameMap::new();
        assert!(map.insert("οδοσ", 0));

        assert!(eq_ignore_case("ΟΔΟΣ", "οδοσ"));
        assert_eq!(map.get("ΟΔΟΣ"), Some(&0));
        assert!(!map.insert("ΟΔΟΣ", 1));
        assert_eq!(strip_prefix_ignore_case("ΟΔΟΣ.x", "οδοσ."), Some("x"));
    }

    #[test]
    fn test_insert_rejects_case_variant() {
        let mut map = NameMap::new();
        assert!(map.insert("Key", 0));
        assert!(!map.insert("key", 1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["Key"]);
    }

    #[test]
    fn test_empty_name_never_found() {
        let mut map = NameMap::new();
        map.insert("", 0);
        assert!(!map.contains(""));
    }

    #[test]
    fn test_names_keep_insertion_order() {
        let map: NameMap<usize> = [("b", 0), ("a", 1), ("c", 2)].into_iter().collect();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_strip_prefix_ignore_case() {
        assert_eq!(strip_prefix_ignore_case("Item.Key", "item."), Some("Key"));
        assert_eq!(strip_prefix_ignore_case("item.", "ITEM."), Some(""));
        assert_eq!(strip_prefix_ignore_case("no.item", "item."), None);
        assert_eq!(strip_prefix_ignore_case("it", "item."), None);
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("Other", "oTHER"));
        assert!(!eq_ignore_case("Other", "Others"));
    }
}
