//! Wire text helpers

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// First candidate that is present and non-empty, or the placeholder.
pub(crate) fn label_or(candidates: [Option<String>; 2], placeholder: &str) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

/// Accepts a string, a number or null for display-only fields.
///
/// Timestamps come back as formatted strings from most endpoints and as epoch
/// numbers from a few older ones.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Like [`lenient_text`] for fields shown as-is: null and missing become "".
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_fallback_order() {
        assert_eq!(label_or([Some("a".into()), Some("b".into())], "x"), "a");
        assert_eq!(label_or([Some(String::new()), Some("b".into())], "x"), "b");
        assert_eq!(label_or([None, None], "x"), "x");
    }
}
