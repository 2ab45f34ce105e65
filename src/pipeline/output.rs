use crate::error::{ExportError, Result};
use crate::renderer::ExportFormat;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

const INDIVIDUAL_DIR: &str = "individual-configs";

/// Owns the run-specific output location.
///
/// Each run writes into `<base>/export_<yymmdd_hhmmss>/`, named from the
/// run's start time. The second-granularity timestamp separates
/// user-initiated runs naturally; two runs started within the same second
/// share a directory and are not protected against each other.
pub struct OutputManager {
    base_path: PathBuf,
    timestamp: String,
    run_directory: PathBuf,
}

impl OutputManager {
    pub fn new(base_path: PathBuf) -> Result<Self> {
        let timestamp = Local::now().format("%y%m%d_%H%M%S").to_string();
        let run_directory = base_path.join(format!("export_{}", timestamp));

        let manager = Self {
            base_path,
            timestamp,
            run_directory,
        };

        manager.validate_paths()?;
        Ok(manager)
    }

    /// Replace the start-time timestamp, mainly to make test output
    /// locations deterministic.
    pub fn with_timestamp<S: Into<String>>(mut self, timestamp: S) -> Self {
        self.timestamp = timestamp.into();
        self.run_directory = self.base_path.join(format!("export_{}", self.timestamp));
        self
    }

    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.run_directory).map_err(ExportError::Io)?;
        fs::create_dir_all(self.individual_directory()).map_err(ExportError::Io)?;
        Ok(())
    }

    pub fn run_directory(&self) -> &Path {
        &self.run_directory
    }

    pub fn individual_directory(&self) -> PathBuf {
        self.run_directory.join(INDIVIDUAL_DIR)
    }

    pub fn format_path(&self, format: ExportFormat) -> PathBuf {
        self.run_directory
            .join(format!("export_{}.{}", self.timestamp, format.extension()))
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn validate_paths(&self) -> Result<()> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path).map_err(|e| ExportError::Permission {
                path: format!(
                    "Cannot create base directory {}: {}",
                    self.base_path.display(),
                    e
                ),
            })?;
        }

        // Probe for write permission before the pipeline does any work.
        let test_file = self.base_path.join(".modelexport_write_test");
        match fs::File::create(&test_file) {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                return Err(ExportError::Permission {
                    path: format!(
                        "No write permission for directory {}: {}",
                        self.base_path.display(),
                        e
                    ),
                });
            }
        }

        Ok(())
    }
}
