pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod projector;
pub mod renderer;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, FormatArg, OutputFormat};
pub use config::{CliOverrides, Config, FieldSpec, FieldsConfig, FilterConfig, OutputConfig};
pub use error::{ExportError, Result, UserFriendlyError};

// Core functionality re-exports
pub use loader::{contains_match, load_records, Record};
pub use pipeline::{
    run_in_background, ExportManifest, ExportPipeline, ExportProgress, ExportRequest,
    OutputManager,
};
pub use projector::{project_record, resolve, ColumnOrder, ProjectedItem};
pub use renderer::ExportFormat;
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;
use std::time::Instant;

/// Main library interface for ModelExport functionality
pub struct ModelExport {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl ModelExport {
    /// Create a new ModelExport instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create ModelExport instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Run one export end to end, driving a progress bar from the
    /// pipeline's updates and printing the summary when it completes.
    pub fn run_export(&self, request: &ExportRequest) -> Result<ExportManifest> {
        let start_time = Instant::now();

        self.output_formatter.start_operation("Starting model export");
        self.output_formatter.debug(&format!(
            "Input: {}, fields: {}, formats: {}",
            request.input.display(),
            request.selection.len(),
            request.formats.len()
        ));

        let progress_bar = self.progress_manager.create_export_progress();
        let callback = {
            let pb = progress_bar.clone();
            move |update: &ExportProgress| {
                ui::progress::update_export_progress(&pb, update);
            }
        };

        let pipeline = ExportPipeline::new(self.config.clone());
        let result = pipeline.run(request, Some(&callback));

        match result {
            Ok(manifest) => {
                ui::progress::finish_progress_with_summary(
                    &progress_bar,
                    &format!("Exported {} records", manifest.records_exported),
                    start_time.elapsed(),
                );
                self.output_formatter
                    .print_export_summary(&manifest, start_time.elapsed());
                Ok(manifest)
            }
            Err(error) => {
                progress_bar.finish_and_clear();
                Err(error)
            }
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(ExportError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Get progress manager reference
    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ExportError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to run an export with minimal setup
pub fn export_simple(
    input: &Path,
    output_dir: Option<&Path>,
    formats: Vec<ExportFormat>,
) -> Result<ExportManifest> {
    let mut config = Config::default();

    if let Some(output_path) = output_dir {
        config.output.base_directory = output_path.to_path_buf();
    }

    let selection = config.fields.default_selection();
    let pipeline = ExportPipeline::new(config);
    let request = ExportRequest {
        input: input.to_path_buf(),
        selection,
        filter_personal: true,
        formats,
    };

    pipeline.run(&request, None)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
