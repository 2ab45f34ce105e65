use crate::error::{ExportError, Result};
use crate::projector::resolve;
use crate::renderer::value_to_cell;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const FALLBACK_NAME: &str = "Unknown Model";

/// Derive the per-record document filename from a model name: lowercased,
/// spaces and path separators replaced with `-`, everything outside
/// `[a-z0-9_-]` stripped, `.md` appended. Two records normalizing to the
/// same filename are not deduplicated; the last one written wins.
pub fn document_filename(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());

    for ch in lowered.chars() {
        match ch {
            ' ' | '/' | '\\' => slug.push('-'),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => slug.push(c),
            _ => {}
        }
    }

    format!("{}.md", slug)
}

/// Write the per-record Markdown document for one surviving record.
///
/// The name, description and system prompt are resolved from the record
/// itself so the document is complete regardless of the field selection;
/// unresolved values degrade to the empty string.
pub fn write_document(record: &Value, directory: &Path) -> Result<PathBuf> {
    let name = match value_to_cell(&resolve(record, "name")) {
        text if text.is_empty() => FALLBACK_NAME.to_string(),
        text => text,
    };
    let description = value_to_cell(&resolve(record, "info.meta.description"));
    let system_prompt = value_to_cell(&resolve(record, "info.params.system"));

    let path = directory.join(document_filename(&name));
    let file = File::create(&path).map_err(ExportError::Io)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "## {}", name)?;
    writeln!(writer)?;
    writeln!(writer, "## Description")?;
    writeln!(writer)?;
    writeln!(writer, "{}", description)?;
    writeln!(writer)?;
    writeln!(writer, "## System Prompt")?;
    writeln!(writer)?;
    writeln!(writer, "{}", system_prompt)?;

    writer.flush().map_err(ExportError::Io)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_filename_derivation() {
        assert_eq!(document_filename("GPT 4 / Test"), "gpt-4-test.md");
        assert_eq!(document_filename("Helper"), "helper.md");
        assert_eq!(document_filename("Bot (v2)!"), "bot-v2.md");
        assert_eq!(document_filename("back\\slash"), "back-slash.md");
        assert_eq!(document_filename("under_score-dash"), "under_score-dash.md");
    }

    #[test]
    fn test_document_body_sections() {
        let temp_dir = TempDir::new().unwrap();
        let record = json!({
            "name": "Helper",
            "info": {
                "meta": {"description": "A helpful bot"},
                "params": {"system": "You are helpful."}
            }
        });

        let path = write_document(&record, temp_dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "helper.md");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("## Helper\n"));
        assert!(content.contains("## Description\n\nA helpful bot\n"));
        assert!(content.contains("## System Prompt\n\nYou are helpful.\n"));
    }

    #[test]
    fn test_missing_fields_degrade_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let record = json!({"name": "Bare"});

        let path = write_document(&record, temp_dir.path()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("## Description\n\n\n"));
        assert!(content.contains("## System Prompt\n\n\n"));
    }

    #[test]
    fn test_nameless_record_uses_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let record = json!({"id": "abc"});

        let path = write_document(&record, temp_dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "unknown-model.md");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("## Unknown Model\n"));
    }

    #[test]
    fn test_colliding_names_last_write_wins() {
        let temp_dir = TempDir::new().unwrap();
        write_document(&json!({"name": "Same Name", "id": "1"}), temp_dir.path()).unwrap();
        write_document(
            &json!({"name": "same/name", "info": {"meta": {"description": "second"}}}),
            temp_dir.path(),
        )
        .unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let content = fs::read_to_string(temp_dir.path().join("same-name.md")).unwrap();
        assert!(content.contains("second"));
    }
}
