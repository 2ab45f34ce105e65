use crate::error::{ExportError, Result};
use crate::projector::{ColumnOrder, ProjectedItem};
use crate::renderer::{ExportFormat, Renderer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Structured-text output: the projected items serialized verbatim with
/// their original keys, pretty-printed. Column ordering is deliberately not
/// applied; consumers must not read meaning into field order here.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, _columns: &ColumnOrder, items: &[ProjectedItem], path: &Path) -> Result<()> {
        let file = File::create(path).map_err(ExportError::Io)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, items)
            .map_err(|e| ExportError::render(self.format().name(), e.to_string()))?;
        writer.write_all(b"\n").map_err(ExportError::Io)?;
        writer.flush().map_err(ExportError::Io)?;

        Ok(())
    }
}
