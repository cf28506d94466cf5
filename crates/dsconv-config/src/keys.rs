//! Case-insensitive field lookup.
//!
//! The documents this crate converts were historically decoded by a
//! case-insensitive struct decoder, so `NoSync`, `nosync` and `NOSYNC` all
//! name the same field. [`KeyIndex`] maps each lowercased key to the casing
//! actually present in a given object.
//!
//! If two keys of the same object collapse to the same lowercase form, only
//! one of them is resolvable and which one is unspecified.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Lowercase-to-original key index over one JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyIndex {
    from_lower: HashMap<String, String>,
}

impl KeyIndex {
    /// Index the keys of `map`.
    #[must_use]
    pub fn build(map: &Map<String, Value>) -> Self {
        let from_lower = map
            .keys()
            .map(|key| (key.to_lowercase(), key.clone()))
            .collect();
        Self { from_lower }
    }

    /// Original casing of the key whose lowercase form is `lower`.
    #[must_use]
    pub fn get(&self, lower: &str) -> Option<&str> {
        self.from_lower.get(lower).map(String::as_str)
    }

    /// Value stored under the key whose lowercase form is `lower`.
    #[must_use]
    pub fn value<'a>(&self, map: &'a Map<String, Value>, lower: &str) -> Option<&'a Value> {
        self.get(lower).and_then(|key| map.get(key))
    }

    /// Remove the key whose lowercase form is `lower`, returning its value.
    /// Removing an absent key is a no-op.
    pub fn remove(&self, map: &mut Map<String, Value>, lower: &str) -> Option<Value> {
        self.get(lower).and_then(|key| map.remove(key))
    }
}
