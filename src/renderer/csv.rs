use crate::error::{ExportError, Result};
use crate::projector::{ColumnOrder, ProjectedItem};
use crate::renderer::{require_records, value_to_cell, ExportFormat, Renderer};
use serde_json::Value;
use std::path::Path;

/// Delimited-text output: one header row of display names, one row per item,
/// quoting and escaping handled by the csv crate.
pub struct CsvRenderer;

impl Renderer for CsvRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, columns: &ColumnOrder, items: &[ProjectedItem], path: &Path) -> Result<()> {
        require_records(self.format(), items)?;

        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            ExportError::render(self.format().name(), e.to_string())
        })?;

        writer
            .write_record(columns.display_names())
            .map_err(|e| ExportError::render(self.format().name(), e.to_string()))?;

        for item in items {
            let row: Vec<String> = columns
                .keys()
                .iter()
                .map(|key| value_to_cell(item.get(key).unwrap_or(&Value::Null)))
                .collect();
            writer
                .write_record(&row)
                .map_err(|e| ExportError::render(self.format().name(), e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| ExportError::render(self.format().name(), e.to_string()))?;

        Ok(())
    }
}
