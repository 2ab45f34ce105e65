use crate::error::{ExportError, Result};
use crate::projector::{ColumnOrder, ProjectedItem};
use crate::renderer::{require_records, value_to_cell, ExportFormat, Renderer};
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use std::path::Path;

/// Spreadsheet output: one worksheet, display-name header row, then data
/// rows. Numbers and booleans become native typed cells; everything else is
/// written as a string.
pub struct ExcelRenderer;

impl Renderer for ExcelRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Excel
    }

    fn render(&self, columns: &ColumnOrder, items: &[ProjectedItem], path: &Path) -> Result<()> {
        require_records(self.format(), items)?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, name) in columns.display_names().iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *name)
                .map_err(|e| ExportError::render(self.format().name(), e.to_string()))?;
        }

        for (row, item) in items.iter().enumerate() {
            let row = (row + 1) as u32;
            for (col, key) in columns.keys().iter().enumerate() {
                let col = col as u16;
                let value = item.get(key).unwrap_or(&Value::Null);

                let write_result = match value {
                    Value::Number(number) if number.as_f64().is_some() => worksheet
                        .write_number(row, col, number.as_f64().unwrap_or(0.0)),
                    Value::Bool(flag) => worksheet.write_boolean(row, col, *flag),
                    other => worksheet.write_string(row, col, value_to_cell(other)),
                };
                write_result
                    .map_err(|e| ExportError::render(self.format().name(), e.to_string()))?;
            }
        }

        workbook
            .save(path)
            .map_err(|e| ExportError::render(self.format().name(), e.to_string()))?;

        Ok(())
    }
}
