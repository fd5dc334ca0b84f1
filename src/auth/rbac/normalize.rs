//! Normalization boundary for multi-valued association fields
//!
//! Stored documents carry multi-valued associations (role sets, professor
//! ids, lab-assistant ids) either as a JSON array of strings or as a single
//! comma-joined string, and older records omit the field entirely. Guards
//! only ever see the canonical form produced by [`normalize`].

use serde::{Deserialize, Serialize};

/// A multi-valued field as it appears in stored documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultiValued {
    /// Canonical array form
    Many(Vec<String>),
    /// Legacy comma-joined form
    One(String),
    /// Anything else found in the wild (numbers, objects); treated as empty
    Other(serde_json::Value),
}

impl MultiValued {
    /// True only for the array form. `can_modify_lab` relies on this to
    /// reproduce the legacy behavior of ignoring comma-joined owner lists.
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            MultiValued::Many(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Vec<String>> for MultiValued {
    fn from(items: Vec<String>) -> Self {
        MultiValued::Many(items)
    }
}

impl From<&[&str]> for MultiValued {
    fn from(items: &[&str]) -> Self {
        MultiValued::Many(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&str> for MultiValued {
    fn from(joined: &str) -> Self {
        MultiValued::One(joined.to_string())
    }
}

/// Convert a multi-valued field into a canonical ordered sequence.
///
/// An array is returned as-is; a string is split on `,`; an absent field
/// yields an empty sequence. No trimming or deduplication is performed, so
/// `"a, b"` yields `["a", " b"]`, which is deliberately not equivalent to
/// `["a", "b"]`.
pub fn normalize(value: Option<&MultiValued>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(MultiValued::Many(items)) => items.clone(),
        Some(MultiValued::One(joined)) => joined.split(',').map(str::to_string).collect(),
        Some(MultiValued::Other(_)) => Vec::new(),
    }
}

/// Membership test against the normalized form of a field
pub(super) fn normalized_contains(value: Option<&MultiValued>, needle: &str) -> bool {
    normalize(value).iter().any(|item| item == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_passes_through() {
        let field = MultiValued::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(normalize(Some(&field)), vec!["a", "b"]);
    }

    #[test]
    fn test_comma_string_splits() {
        let field = MultiValued::from("a,b");
        assert_eq!(normalize(Some(&field)), vec!["a", "b"]);
    }

    #[test]
    fn test_single_string_yields_one_element() {
        let field = MultiValued::from("a");
        assert_eq!(normalize(Some(&field)), vec!["a"]);
    }

    #[test]
    fn test_absent_yields_empty() {
        assert!(normalize(None).is_empty());
    }

    #[test]
    fn test_spaces_are_preserved() {
        // "a, b" is NOT equivalent to ["a", "b"]
        let field = MultiValued::from("a, b");
        assert_eq!(normalize(Some(&field)), vec!["a", " b"]);
        assert!(!normalized_contains(Some(&field), "b"));
    }

    #[test]
    fn test_no_deduplication() {
        let field = MultiValued::from("a,a");
        assert_eq!(normalize(Some(&field)), vec!["a", "a"]);
    }

    #[test]
    fn test_malformed_value_treated_as_empty() {
        let field: MultiValued = serde_json::from_value(json!(42)).unwrap();
        assert!(matches!(field, MultiValued::Other(_)));
        assert!(normalize(Some(&field)).is_empty());
    }

    #[test]
    fn test_deserialization_shapes() {
        let many: MultiValued = serde_json::from_value(json!(["x", "y"])).unwrap();
        assert_eq!(normalize(Some(&many)), vec!["x", "y"]);

        let one: MultiValued = serde_json::from_value(json!("x,y")).unwrap();
        assert_eq!(normalize(Some(&one)), vec!["x", "y"]);
    }
}
