use crate::error::{ExportError, Result};
use crate::projector::{ColumnOrder, ProjectedItem};
use crate::renderer::{ExportFormat, Renderer};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// YAML output: the same logical content as the JSON renderer, original keys,
/// no column ordering applied.
pub struct YamlRenderer;

impl Renderer for YamlRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Yaml
    }

    fn render(&self, _columns: &ColumnOrder, items: &[ProjectedItem], path: &Path) -> Result<()> {
        let file = File::create(path).map_err(ExportError::Io)?;
        let writer = BufWriter::new(file);

        serde_yaml::to_writer(writer, items)
            .map_err(|e| ExportError::render(self.format().name(), e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::project_record;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn selection(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.yaml");

        let items = vec![project_record(
            &json!({"name": "one", "info": {"meta": {"description": "d1"}}}),
            &selection(&["name", "info.meta.description"]),
        )];
        let columns = ColumnOrder::derive(&items, &[], &BTreeMap::new());

        YamlRenderer.render(&columns, &items, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let reparsed: Vec<ProjectedItem> = serde_yaml::from_str(&content).unwrap();
        assert_eq!(reparsed, items);
    }

    #[test]
    fn test_yaml_renders_sequence_of_mappings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.yaml");

        let items = vec![project_record(&json!({"name": "one"}), &selection(&["name"]))];
        let columns = ColumnOrder::derive(&items, &[], &BTreeMap::new());

        YamlRenderer.render(&columns, &items, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("- name: one"));
    }
}
