use crate::error::{ExportError, Result};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A source model entry. Records are read once and never mutated afterwards.
pub type Record = Value;

/// Load the input document and require a top-level JSON array.
///
/// Any other top-level shape is a fatal input error; individual records are
/// not validated beyond being JSON, since the export tolerates heterogeneous
/// and partially-populated entries.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ExportError::InputFormat {
            message: format!("Input file not found: {}", path.display()),
        });
    }

    let file = File::open(path).map_err(ExportError::Io)?;
    let reader = BufReader::new(file);

    let document: Value = serde_json::from_reader(reader).map_err(|e| ExportError::InputFormat {
        message: format!("{} is not valid JSON: {}", path.display(), e),
    })?;

    match document {
        Value::Array(records) => Ok(records),
        other => Err(ExportError::InputFormat {
            message: format!(
                "Expected a JSON array at the top level, but got {}",
                json_type_name(&other)
            ),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
