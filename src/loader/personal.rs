use serde_json::Value;

/// Whole-record personal-information predicate.
///
/// Visits every string leaf of the record (maps by value, sequences by
/// element) and returns true on the first case-sensitive substring match of
/// any term. Non-string scalars are ignored. A match anywhere excludes the
/// entire record, not just the matching field.
pub fn contains_match(record: &Value, terms: &[String]) -> bool {
    if terms.is_empty() {
        return false;
    }

    match record {
        Value::String(text) => terms.iter().any(|term| text.contains(term.as_str())),
        Value::Object(map) => map.values().any(|value| contains_match(value, terms)),
        Value::Array(items) => items.iter().any(|item| contains_match(item, terms)),
        _ => false,
    }
}
