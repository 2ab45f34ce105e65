use crate::error::{ExportError, Result};
use crate::projector::{ColumnOrder, ProjectedItem};
use crate::renderer::{require_records, value_to_cell, ExportFormat, Renderer};
use chrono::Local;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Human-readable markup output: a Markdown table with display names in the
/// header row. Pipes and newlines inside cells are escaped so the table
/// structure survives.
pub struct MarkdownRenderer;

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

impl Renderer for MarkdownRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn render(&self, columns: &ColumnOrder, items: &[ProjectedItem], path: &Path) -> Result<()> {
        require_records(self.format(), items)?;

        let file = File::create(path).map_err(ExportError::Io)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "# Model Export")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "Generated on: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(writer)?;

        writeln!(writer, "| {} |", columns.display_names().join(" | "))?;
        writeln!(
            writer,
            "| {} |",
            vec!["---"; columns.len()].join(" | ")
        )?;

        for item in items {
            let row: Vec<String> = columns
                .keys()
                .iter()
                .map(|key| escape_cell(&value_to_cell(item.get(key).unwrap_or(&Value::Null))))
                .collect();
            writeln!(writer, "| {} |", row.join(" | "))?;
        }

        writer.flush().map_err(ExportError::Io)?;

        Ok(())
    }
}
