pub mod csv;
pub mod docs;
pub mod excel;
pub mod json;
pub mod markdown;
pub mod xml;
pub mod yaml;

pub use docs::{document_filename, write_document};

use crate::error::{ExportError, Result};
use crate::projector::{ColumnOrder, ProjectedItem};
use serde_json::Value;
use std::path::Path;

/// The bulk output formats. Per-record documents are produced on every run
/// and are not part of this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
    Yaml,
    Xml,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Excel,
        ExportFormat::Yaml,
        ExportFormat::Xml,
        ExportFormat::Markdown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "excel",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Xml => "xml",
            ExportFormat::Markdown => "markdown",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Xml => "xml",
            ExportFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One renderer per bulk format. All renderers consume the same shared
/// column order and projected items; only the encoding differs.
pub trait Renderer {
    fn format(&self) -> ExportFormat;

    fn render(&self, columns: &ColumnOrder, items: &[ProjectedItem], path: &Path) -> Result<()>;
}

pub fn renderer_for(format: ExportFormat) -> Box<dyn Renderer> {
    match format {
        ExportFormat::Csv => Box::new(csv::CsvRenderer),
        ExportFormat::Json => Box::new(json::JsonRenderer),
        ExportFormat::Excel => Box::new(excel::ExcelRenderer),
        ExportFormat::Yaml => Box::new(yaml::YamlRenderer),
        ExportFormat::Xml => Box::new(xml::XmlRenderer),
        ExportFormat::Markdown => Box::new(markdown::MarkdownRenderer),
    }
}

/// String form of a projected value for flat (cell-oriented) outputs.
/// Null renders empty, scalars render plainly, containers render as JSON.
pub(crate) fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Uniform empty-input guard for renderers that need at least one row to
/// establish their layout.
pub(crate) fn require_records(format: ExportFormat, items: &[ProjectedItem]) -> Result<()> {
    if items.is_empty() {
        Err(ExportError::render(
            format.name(),
            "no records to export",
        ))
    } else {
        Ok(())
    }
}
