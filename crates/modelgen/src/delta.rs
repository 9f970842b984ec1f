//! Diff and patch over flat JSON documents.
//!
//! A [`Document`] is a JSON object. Only its top-level keys take part in a
//! [`Delta`]; values are compared by deep structural equality, so nested
//! objects and arrays are replaced wholesale. Numbers compare by value (`1`
//! equals `1.0`); no other types are coerced.
//!
//! The three buckets of a delta computed by [`compute_delta`] never share a
//! key, so [`apply_delta`] gives the same result whichever order its passes
//! run in.
//!
//! # Example
//!
//! ```
//! use modelgen::delta::{Document, apply_delta, compute_delta};
//! use serde_json::json;
//!
//! let original: Document = serde_json::from_value(json!({"a": 1, "b": 2})).unwrap();
//! let patched: Document = serde_json::from_value(json!({"b": 3, "c": 4})).unwrap();
//!
//! let delta = compute_delta(&original, &patched);
//! assert_eq!(delta.deletions(), &["a".to_string()]);
//! assert_eq!(apply_delta(&original, &delta), patched);
//! ```

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A flat key/value document with its key order preserved.
pub type Document = Map<String, Value>;

/// A key present only in the patched document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addition {
    key: String,
    value: Value,
}

impl Addition {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A key present in both documents with different values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    key: String,
    from: Value,
    to: Value,
}

impl Update {
    pub fn new(key: impl Into<String>, from: Value, to: Value) -> Self {
        Self {
            key: key.into(),
            from,
            to,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value in the original document.
    pub fn from(&self) -> &Value {
        &self.from
    }

    /// Value in the patched document.
    pub fn to(&self) -> &Value {
        &self.to
    }
}

/// Changes that turn one flat document into another.
///
/// Serializes as an object with exactly the keys `additions`, `deletions`
/// and `updates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    additions: Vec<Addition>,
    deletions: Vec<String>,
    updates: Vec<Update>,
}

impl Delta {
    pub fn new(additions: Vec<Addition>, deletions: Vec<String>, updates: Vec<Update>) -> Self {
        Self {
            additions,
            deletions,
            updates,
        }
    }

    /// Keys only in the patched document, in patched order.
    pub fn additions(&self) -> &[Addition] {
        &self.additions
    }

    /// Keys only in the original document, in original order.
    pub fn deletions(&self) -> &[String] {
        &self.deletions
    }

    /// Keys whose value changed, in original order.
    pub fn updates(&self) -> &[Update] {
        &self.updates
    }

    /// Returns `true` if the documents were equal.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty() && self.updates.is_empty()
    }
}

/// Computes the delta from `original` to `patched`.
pub fn compute_delta(original: &Document, patched: &Document) -> Delta {
    let additions: Vec<_> = patched
        .iter()
        .filter(|(key, _)| !original.contains_key(key.as_str()))
        .map(|(key, value)| Addition::new(key.clone(), value.clone()))
        .collect();

    let deletions: Vec<_> = original
        .keys()
        .filter(|key| !patched.contains_key(key.as_str()))
        .cloned()
        .collect();

    let updates: Vec<_> = original
        .iter()
        .filter_map(|(key, from)| match patched.get(key) {
            Some(to) if !values_equal(from, to) => Some(Update::new(key.clone(), from.clone(), to.clone())),
            _ => None,
        })
        .collect();

    debug!(
        additions = additions.len(),
        deletions = deletions.len(),
        updates = updates.len();
        "Delta computed"
    );
    Delta::new(additions, deletions, updates)
}

/// Deep equality where numbers compare by value.
///
/// Integers compare exactly; a float equals an integer or float with the
/// same `f64` value. Booleans, strings and numbers never equal each other.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| values_equal(value, other)))
        }
        _ => a == b,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a == b;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Applies `delta` to a copy of `original`.
///
/// Deleted keys are dropped, updated keys keep their position with the new
/// value, and added keys are appended in delta order.
pub fn apply_delta(original: &Document, delta: &Delta) -> Document {
    let deleted: HashSet<&str> = delta.deletions.iter().map(String::as_str).collect();

    let mut result: Document = original
        .iter()
        .filter(|(key, _)| !deleted.contains(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for update in &delta.updates {
        result.insert(update.key.clone(), update.to.clone());
    }
    for addition in &delta.additions {
        result.insert(addition.key.clone(), addition.value.clone());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("Expected object, got {other}"),
        }
    }

    #[test]
    fn test_compute_delta() {
        let original = document(json!({"a": 1, "b": 2}));
        let patched = document(json!({"b": 3, "c": 4}));

        let delta = compute_delta(&original, &patched);

        assert_eq!(delta.additions(), &[Addition::new("c", json!(4))]);
        assert_eq!(delta.deletions(), &["a".to_string()]);
        assert_eq!(delta.updates(), &[Update::new("b", json!(2), json!(3))]);
    }

    #[test]
    fn test_apply_delta() {
        let original = document(json!({"a": 1, "b": 2}));
        let patched = document(json!({"b": 3, "c": 4}));

        let result = apply_delta(&original, &compute_delta(&original, &patched));

        assert_eq!(result, patched);
        let keys: Vec<_> = result.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_delta_serialization() {
        let original = document(json!({"a": 1, "b": 2}));
        let patched = document(json!({"b": 3, "c": 4}));

        let value = serde_json::to_value(compute_delta(&original, &patched)).unwrap();

        assert_eq!(
            value,
            json!({
                "additions": [{"key": "c", "value": 4}],
                "deletions": ["a"],
                "updates": [{"key": "b", "from": 2, "to": 3}]
            })
        );
    }

    #[test]
    fn test_identical_documents() {
        let doc = document(json!({"x": {"nested": [1, 2]}, "y": null}));

        let delta = compute_delta(&doc, &doc);

        assert!(delta.is_empty());
        assert_eq!(apply_delta(&doc, &delta), doc);
    }

    #[test]
    fn test_empty_documents() {
        let empty = Document::new();
        let full = document(json!({"k": "v"}));

        assert!(compute_delta(&empty, &empty).is_empty());
        assert_eq!(compute_delta(&empty, &full).additions().len(), 1);
        assert_eq!(compute_delta(&full, &empty).deletions().len(), 1);
    }

    #[test]
    fn test_deep_equality() {
        let original = document(json!({"same": {"a": [1, {"b": true}]}, "changed": [1, 2]}));
        let patched = document(json!({"same": {"a": [1, {"b": true}]}, "changed": [2, 1]}));

        let delta = compute_delta(&original, &patched);

        assert_eq!(delta.updates().len(), 1);
        assert_eq!(delta.updates()[0].key(), "changed");
    }

    #[test]
    fn test_no_type_coercion() {
        let original = document(json!({"n": 1, "s": "1", "b": false}));
        let patched = document(json!({"n": "1", "s": 1, "b": 0}));

        assert_eq!(compute_delta(&original, &patched).updates().len(), 3);
    }

    #[test]
    fn test_numbers_compare_by_value() {
        let original = document(json!({"int": 1, "float": 2.5, "nested": {"n": [3]}, "big": u64::MAX}));
        let patched = document(json!({"int": 1.0, "float": 2.5, "nested": {"n": [3.0]}, "big": 1}));

        let delta = compute_delta(&original, &patched);

        assert_eq!(delta.updates().len(), 1);
        assert_eq!(delta.updates()[0].key(), "big");
        assert!(values_equal(&json!(-4), &json!(-4.0)));
        assert!(!values_equal(&json!(1), &json!(1.5)));
        assert!(!values_equal(&json!(1), &json!(true)));
    }

    #[test]
    fn test_update_keeps_key_position() {
        let original = document(json!({"first": 1, "second": 2, "third": 3}));
        let patched = document(json!({"first": 1, "second": 20, "third": 3}));

        let result = apply_delta(&original, &compute_delta(&original, &patched));

        let keys: Vec<_> = result.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
        assert_eq!(result["second"], json!(20));
    }

    #[test]
    fn test_deletion_keeps_remaining_order() {
        let original = document(json!({"a": 1, "b": 2, "c": 3, "d": 4}));
        let patched = document(json!({"a": 1, "c": 3, "d": 4}));

        let result = apply_delta(&original, &compute_delta(&original, &patched));

        let keys: Vec<_> = result.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_deserialize_delta() {
        let delta: Delta = serde_json::from_value(json!({
            "additions": [{"key": "new", "value": [1]}],
            "deletions": ["old"],
            "updates": []
        }))
        .unwrap();

        let original = document(json!({"old": true, "kept": 1}));
        let result = apply_delta(&original, &delta);

        assert_eq!(result, document(json!({"kept": 1, "new": [1]})));
    }
}
