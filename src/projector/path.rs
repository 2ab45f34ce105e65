use serde_json::Value;

/// Resolve a dotted field path against a record.
///
/// The path is split on `.` and walked one segment at a time. If any
/// intermediate value is not an object, or a segment key is absent, the
/// result is the empty string; this function is total and never fails.
/// Leaf values are returned as-is, including containers, with no coercion.
pub fn resolve(record: &Value, path: &str) -> Value {
    let mut current = record;

    for segment in path.split('.') {
        match current {
            Value::Object(map) => match map.get(segment) {
                Some(next) => current = next,
                None => return Value::String(String::new()),
            },
            _ => return Value::String(String::new()),
        }
    }

    current.clone()
}
