//! Export orchestration: load, filter, project, and render in one pass,
//! reporting progress through an optional callback.

pub mod output;
pub mod progress;

pub use output::OutputManager;
pub use progress::{ExportProgress, ProgressReporter};

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::loader::{contains_match, load_records};
use crate::projector::{project_record, ColumnOrder, ProjectedItem};
use crate::renderer::{self, ExportFormat};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Everything one export run needs beyond the configuration: the input
/// file, the selected field paths, whether the personal-info filter is
/// active, and which bulk formats to render. An empty `formats` list is
/// valid and produces only the individual documents.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub input: PathBuf,
    pub selection: Vec<String>,
    pub filter_personal: bool,
    pub formats: Vec<ExportFormat>,
}

/// What a completed run produced, for reporting and for tests.
#[derive(Debug, Clone, Serialize)]
pub struct ExportManifest {
    pub run_directory: PathBuf,
    pub files: Vec<PathBuf>,
    pub individual_directory: PathBuf,
    pub individual_documents: usize,
    pub records_exported: usize,
    pub records_skipped: usize,
    pub started_at: DateTime<Utc>,
}

pub struct ExportPipeline {
    config: Config,
}

impl ExportPipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one export into a fresh timestamped directory under the
    /// configured base directory.
    pub fn run(
        &self,
        request: &ExportRequest,
        callback: Option<&dyn Fn(&ExportProgress)>,
    ) -> Result<ExportManifest> {
        let manager = OutputManager::new(self.config.output.base_directory.clone())?;
        self.run_with_manager(request, &manager, callback)
    }

    /// Same as [`run`](Self::run) but with a caller-supplied output
    /// manager, so tests can pin the timestamp.
    pub fn run_with_manager(
        &self,
        request: &ExportRequest,
        manager: &OutputManager,
        callback: Option<&dyn Fn(&ExportProgress)>,
    ) -> Result<ExportManifest> {
        let started_at = Utc::now();
        let reporter = ProgressReporter::new(callback);

        self.validate_selection(&request.selection)?;

        reporter.emit("Reading input file...", 5.0);
        let records = load_records(&request.input)?;

        let mut kept: Vec<_> = Vec::with_capacity(records.len());
        let mut skipped = 0usize;
        if request.filter_personal {
            reporter.emit("Filtering personal information...", 10.0);
            let terms = &self.config.filter.personal_terms;
            let total = records.len().max(1);
            for (index, record) in records.into_iter().enumerate() {
                if contains_match(&record, terms) {
                    skipped += 1;
                } else {
                    kept.push(record);
                }
                reporter.emit(
                    format!("Filtering records: {}/{}", index + 1, total),
                    10.0 + (index + 1) as f64 * 20.0 / total as f64,
                );
            }
        } else {
            kept = records;
        }

        // Refuse to write an empty export in any format.
        if kept.is_empty() {
            return Err(ExportError::render(
                "export",
                "no records to export (input is empty or every record was filtered out)",
            ));
        }

        reporter.emit("Extracting selected fields...", 30.0);
        let total = kept.len();
        let mut items: Vec<ProjectedItem> = Vec::with_capacity(total);
        for (index, record) in kept.iter().enumerate() {
            items.push(project_record(record, &request.selection));
            reporter.emit(
                format!("Extracting fields: {}/{}", index + 1, total),
                30.0 + (index + 1) as f64 * 30.0 / total as f64,
            );
        }

        reporter.emit("Computing column order...", 60.0);
        let columns = ColumnOrder::derive(
            &items,
            &self.config.fields.primary,
            &self.config.fields.headers,
        );

        manager.initialize()?;

        reporter.emit("Writing individual model documents...", 60.0);
        let individual_directory = manager.individual_directory();
        for (index, record) in kept.iter().enumerate() {
            renderer::write_document(record, &individual_directory)?;
            reporter.emit(
                format!("Writing documents: {}/{}", index + 1, total),
                60.0 + (index + 1) as f64 * 10.0 / total as f64,
            );
        }

        let mut files = Vec::with_capacity(request.formats.len());
        let format_count = request.formats.len().max(1);
        for (index, format) in request.formats.iter().enumerate() {
            reporter.emit(
                format!(
                    "Exporting to {} ({}/{})...",
                    format.name().to_uppercase(),
                    index + 1,
                    request.formats.len()
                ),
                70.0 + index as f64 * 30.0 / format_count as f64,
            );

            let path = manager.format_path(*format);
            renderer::renderer_for(*format).render(&columns, &items, &path)?;
            files.push(path);

            reporter.emit(
                format!("Finished {} export", format.name().to_uppercase()),
                70.0 + (index + 1) as f64 * 30.0 / format_count as f64,
            );
        }

        reporter.emit("Export completed successfully", 100.0);

        Ok(ExportManifest {
            run_directory: manager.run_directory().to_path_buf(),
            files,
            individual_directory,
            individual_documents: total,
            records_exported: total,
            records_skipped: skipped,
            started_at,
        })
    }

    fn validate_selection(&self, selection: &[String]) -> Result<()> {
        if selection.is_empty() {
            return Err(ExportError::Selection {
                message: "no fields selected for export".to_string(),
            });
        }

        let unknown: Vec<&str> = selection
            .iter()
            .filter(|path| !self.config.fields.contains_path(path))
            .map(|path| path.as_str())
            .collect();
        if !unknown.is_empty() {
            return Err(ExportError::Selection {
                message: format!("unknown field path(s): {}", unknown.join(", ")),
            });
        }

        Ok(())
    }
}

/// Run an export on a worker thread, streaming progress updates over a
/// channel. Updates are fire-and-forget; a dropped receiver never stalls
/// or fails the run. The final result comes from joining the handle.
pub fn run_in_background(
    config: Config,
    request: ExportRequest,
) -> (
    mpsc::Receiver<ExportProgress>,
    thread::JoinHandle<Result<ExportManifest>>,
) {
    let (sender, receiver) = mpsc::channel();

    let handle = thread::spawn(move || {
        let pipeline = ExportPipeline::new(config);
        let callback = move |update: &ExportProgress| {
            let _ = sender.send(update.clone());
        };
        pipeline.run(&request, Some(&callback))
    });

    (receiver, handle)
}
