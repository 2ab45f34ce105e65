use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub fields: FieldsConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
}

/// The field catalog plus the ordering/naming rules derived from it.
///
/// The catalog is plain configuration data: callers pass the relevant pieces
/// into the projector and column-order code explicitly instead of reading a
/// process-wide global.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldsConfig {
    /// Paths emitted first, in this order, by every tabular renderer.
    pub primary: Vec<String>,
    /// Field path -> column header remapping; unlisted paths keep the raw path.
    pub headers: BTreeMap<String, String>,
    /// Every exportable field path, grouped by category label.
    pub catalog: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldSpec {
    pub path: String,
    pub label: String,
    pub category: String,
    pub default: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Substrings whose presence anywhere in a record excludes it when
    /// personal-information filtering is enabled.
    pub personal_terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub base_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields: FieldsConfig::default(),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        let spec = |path: &str, label: &str, category: &str, default: bool| FieldSpec {
            path: path.to_string(),
            label: label.to_string(),
            category: category.to_string(),
            default,
        };

        let catalog = vec![
            spec("name", "Name", "Primary Fields", true),
            spec("info.meta.description", "Description", "Primary Fields", true),
            spec("info.params.system", "System Prompt", "Primary Fields", true),
            spec("id", "Model ID", "Basic", false),
            spec("object", "Object Type", "Basic", false),
            spec("created", "Creation Timestamp", "Basic", false),
            spec("owned_by", "Owner", "Basic", false),
            spec("info.id", "Info ID", "Info", false),
            spec("info.base_model_id", "Base Model", "Info", true),
            spec("info.name", "Info Name", "Info", false),
            spec("info.is_active", "Is Active", "Info", false),
            spec("info.created_at", "Info Created At", "Info", false),
            spec("info.updated_at", "Info Updated At", "Info", false),
            spec(
                "info.meta.profile_image_url",
                "Profile Image URL",
                "Meta",
                false,
            ),
            spec(
                "info.meta.capabilities.usage",
                "Usage Capability",
                "Meta",
                false,
            ),
            spec(
                "info.meta.capabilities.vision",
                "Vision Capability",
                "Meta",
                false,
            ),
            spec(
                "info.meta.capabilities.citations",
                "Citations Capability",
                "Meta",
                false,
            ),
            spec("info.meta.tags", "Tags", "Meta", false),
            spec("preset", "Is Preset", "Other", false),
            spec("actions", "Actions", "Other", false),
        ];

        let primary = vec![
            "name".to_string(),
            "info.meta.description".to_string(),
            "info.params.system".to_string(),
        ];

        let mut headers = BTreeMap::new();
        headers.insert("name".to_string(), "name".to_string());
        headers.insert(
            "info.meta.description".to_string(),
            "description".to_string(),
        );
        headers.insert("info.params.system".to_string(), "system_prompt".to_string());

        Self {
            primary,
            headers,
            catalog,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            personal_terms: vec![
                "Daniel".to_string(),
                "Rosehill".to_string(),
                "daniel".to_string(),
                "rosehill".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_directory: std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("exports"),
        }
    }
}

impl FieldsConfig {
    /// Paths selected by default (the catalog's default-on entries).
    pub fn default_selection(&self) -> Vec<String> {
        self.catalog
            .iter()
            .filter(|spec| spec.default)
            .map(|spec| spec.path.clone())
            .collect()
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.catalog.iter().any(|spec| spec.path == path)
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for spec in &self.catalog {
            if !seen.contains(&spec.category.as_str()) {
                seen.push(spec.category.as_str());
            }
        }
        seen
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExportError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExportError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExportError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["modelexport.toml", ".modelexport.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, overrides: &CliOverrides) {
        if let Some(ref output_dir) = overrides.output_dir {
            self.output.base_directory = output_dir.clone();
        }

        if let Some(ref terms) = overrides.redact_terms {
            self.filter.personal_terms.extend(terms.clone());
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ExportError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ExportError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.catalog.is_empty() {
            return Err(ExportError::Config {
                message: "The field catalog must contain at least one field".to_string(),
            });
        }

        // Catalog paths must be unique.
        let mut seen = HashSet::new();
        for spec in &self.fields.catalog {
            if !seen.insert(spec.path.as_str()) {
                return Err(ExportError::Config {
                    message: format!("Duplicate field path in catalog: {}", spec.path),
                });
            }
            if spec.path.is_empty() {
                return Err(ExportError::Config {
                    message: "Field paths must be non-empty".to_string(),
                });
            }
        }

        for primary in &self.fields.primary {
            if !self.fields.contains_path(primary) {
                return Err(ExportError::Config {
                    message: format!("Primary field is not in the catalog: {}", primary),
                });
            }
        }

        if let Some(parent) = self.output.base_directory.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ExportError::Config {
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub redact_terms: Option<Vec<String>>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_redact_terms(mut self, terms: Option<Vec<String>>) -> Self {
        self.redact_terms = terms;
        self
    }
}
