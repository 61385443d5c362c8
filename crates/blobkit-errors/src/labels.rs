use crate::model::ErrorObj;
use std::collections::BTreeMap;

/// Stable key/value pairs for structured log fields.
pub fn labels(err: &ErrorObj) -> BTreeMap<&'static str, String> {
    let mut map = BTreeMap::new();
    map.insert("code", err.code.0.to_string());
    map.insert("kind", err.kind.as_str().to_string());
    map.insert("retryable", err.retryable.as_str().to_string());
    map.insert("severity", err.severity.as_str().to_string());

    for key in ["provider", "container", "blob"] {
        if let Some(value) = err.meta.get(key).and_then(|v| v.as_str()) {
            map.insert(key, value.to_string());
        }
    }

    map
}
