//! Field access on loosely-typed JSON objects.

use serde_json::{Map, Value};

use tradedocs_core::value_text;

pub(crate) fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a Value {
    obj.get(key).unwrap_or(&Value::Null)
}

/// Text of the first key holding a non-blank value.
pub(crate) fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| value_text(field(obj, k)))
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}
