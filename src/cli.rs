use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::pipeline::ExportRequest;
use crate::renderer::ExportFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modelexport")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export model records from a JSON export into spreadsheet and document formats")]
#[command(
    long_about = "ModelExport reads a JSON array of model records, filters out entries that \
                       mention personal information, extracts a configurable set of fields, and \
                       writes the result as CSV, JSON, Excel, YAML, XML or Markdown, plus one \
                       Markdown document per model."
)]
#[command(after_help = "EXAMPLES:\n  \
    modelexport models.json\n  \
    modelexport models.json --format all --output ~/exports\n  \
    modelexport models.json --format excel --fields name,info.meta.description\n  \
    modelexport models.json --no-filter --format json\n  \
    modelexport --list-fields")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input JSON file (an array of model records)
    #[arg(required_unless_present_any = ["generate_config", "list_fields"])]
    pub input: Option<PathBuf>,

    /// Base output directory (a timestamped subdirectory is created per run)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format to produce
    #[arg(short, long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Field paths to export (comma-separated; defaults to the configured selection)
    #[arg(long, value_delimiter = ',', help = "Dotted field paths (e.g., name,info.meta.description)")]
    pub fields: Option<Vec<String>>,

    /// Disable the personal-information filter
    #[arg(long)]
    pub no_filter: bool,

    /// Extra terms for the personal-information filter
    #[arg(long, value_delimiter = ',', help = "Additional terms to filter on (comma-separated)")]
    pub redact: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List the available field paths and exit
    #[arg(long, help = "List the field catalog grouped by category")]
    pub list_fields: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show what would be exported without writing any files")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum FormatArg {
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON array
    Json,
    /// Excel workbook (.xlsx)
    Excel,
    /// YAML sequence
    Yaml,
    /// Nested XML document
    Xml,
    /// Markdown table
    Markdown,
    /// Individual Markdown documents only
    Docs,
    /// Every bulk format at once
    All,
}

impl FormatArg {
    /// The bulk formats this argument selects. Individual documents are
    /// written on every run, so `Docs` maps to no bulk formats at all.
    pub fn to_formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Csv => vec![ExportFormat::Csv],
            FormatArg::Json => vec![ExportFormat::Json],
            FormatArg::Excel => vec![ExportFormat::Excel],
            FormatArg::Yaml => vec![ExportFormat::Yaml],
            FormatArg::Xml => vec![ExportFormat::Xml],
            FormatArg::Markdown => vec![ExportFormat::Markdown],
            FormatArg::Docs => Vec::new(),
            FormatArg::All => ExportFormat::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_dir(self.output.clone())
            .with_redact_terms(self.redact.clone())
    }

    /// The field paths this run exports: `--fields` when given, the
    /// configured default selection otherwise.
    pub fn selection(&self, config: &Config) -> Vec<String> {
        match &self.fields {
            Some(fields) => fields.clone(),
            None => config.fields.default_selection(),
        }
    }

    pub fn build_request(&self, config: &Config) -> Option<ExportRequest> {
        let input = self.input.clone()?;
        Some(ExportRequest {
            input,
            selection: self.selection(config),
            filter_personal: !self.no_filter,
            formats: self.format.to_formats(),
        })
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_format_is_csv() {
        let cli = parse(&["modelexport", "models.json"]);
        assert_eq!(cli.format, FormatArg::Csv);
        assert_eq!(cli.format.to_formats(), vec![ExportFormat::Csv]);
    }

    #[test]
    fn test_all_expands_to_every_bulk_format() {
        let cli = parse(&["modelexport", "models.json", "--format", "all"]);
        assert_eq!(cli.format.to_formats().len(), 6);
    }

    #[test]
    fn test_docs_selects_no_bulk_formats() {
        let cli = parse(&["modelexport", "models.json", "--format", "docs"]);
        assert!(cli.format.to_formats().is_empty());
    }

    #[test]
    fn test_fields_are_comma_separated() {
        let cli = parse(&[
            "modelexport",
            "models.json",
            "--fields",
            "name,info.meta.description",
        ]);
        assert_eq!(
            cli.fields,
            Some(vec![
                "name".to_string(),
                "info.meta.description".to_string()
            ])
        );
    }

    #[test]
    fn test_selection_falls_back_to_config_defaults() {
        let cli = parse(&["modelexport", "models.json"]);
        let config = Config::default();
        assert_eq!(cli.selection(&config), config.fields.default_selection());
    }

    #[test]
    fn test_input_optional_with_list_fields() {
        let cli = parse(&["modelexport", "--list-fields"]);
        assert!(cli.input.is_none());
        assert!(cli.list_fields);
    }

    #[test]
    fn test_input_optional_with_generate_config() {
        let cli = parse(&["modelexport", "--generate-config"]);
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_input_required_otherwise() {
        assert!(Cli::try_parse_from(["modelexport", "--format", "csv"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["modelexport", "models.json", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_build_request_honors_no_filter() {
        let cli = parse(&["modelexport", "models.json", "--no-filter"]);
        let request = cli.build_request(&Config::default()).unwrap();
        assert!(!request.filter_personal);
        assert_eq!(request.input, PathBuf::from("models.json"));
    }

    #[test]
    fn test_verbosity_level_zero_when_quiet() {
        let cli = parse(&["modelexport", "models.json", "-q"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
