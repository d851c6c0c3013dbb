use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selected filter values keyed by criterion key.
///
/// Serialises as a flat JSON/query object, e.g. `{"specialty":"Cardiología","q":"gon"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Selection::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Union of the two key sets. On a shared key the value from `other` replaces this one, so the
    /// result only matches "apply `self`, then apply `other`" when the keys are disjoint.
    pub fn merge(mut self, other: Selection) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_right_side_wins_on_shared_key() {
        let left = Selection::new().with("status", "pendiente").with("q", "ana");
        let right = Selection::new().with("q", "luis").with("type", "virtual");

        let merged = left.merge(right);
        assert_eq!(merged.get("status"), Some("pendiente"));
        assert_eq!(merged.get("q"), Some("luis"));
        assert_eq!(merged.get("type"), Some("virtual"));
    }

    #[test]
    fn test_serialises_as_flat_object() {
        let selection = Selection::new().with("specialty", "Cardiología");
        let json = serde_json::to_string(&selection).expect("should serialise");
        assert_eq!(json, r#"{"specialty":"Cardiología"}"#);

        let back: Selection = serde_json::from_str(&json).expect("should deserialise");
        assert_eq!(back, selection);
    }
}
