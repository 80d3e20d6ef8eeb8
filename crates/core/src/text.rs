//! Serde helpers for free-text form fields.
//!
//! Form fields such as reference numbers arrive as strings most of the time but
//! occasionally as bare numbers. Both are accepted and kept as text.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::numeric::value_text;

/// Deserialize an optional text field; `null` and absence are `None`.
///
/// Use together with `#[serde(default)]`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(v) => Some(value_text(&v)),
    })
}

/// `Some` only for values that are not blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "optional_text")]
        no: Option<String>,
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let f: Form = serde_json::from_str(r#"{"no": "PL-1"}"#).unwrap();
        assert_eq!(f.no.as_deref(), Some("PL-1"));
        let f: Form = serde_json::from_str(r#"{"no": 42}"#).unwrap();
        assert_eq!(f.no.as_deref(), Some("42"));
    }

    #[test]
    fn null_and_missing_are_none() {
        let f: Form = serde_json::from_str(r#"{"no": null}"#).unwrap();
        assert_eq!(f.no, None);
        let f: Form = serde_json::from_str("{}").unwrap();
        assert_eq!(f.no, None);
    }

    #[test]
    fn blank_is_not_a_value() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" x ")), Some("x"));
        assert_eq!(non_blank(None), None);
    }
}
