use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid input: {message}")]
    InputFormat { message: String },

    #[error("Invalid selection: {message}")]
    Selection { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render {format} output: {message}")]
    Render { format: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },
}

impl ExportError {
    pub fn render<F: Into<String>, M: Into<String>>(format: F, message: M) -> Self {
        ExportError::Render {
            format: format.into(),
            message: message.into(),
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExportError {
    fn user_message(&self) -> String {
        match self {
            ExportError::InputFormat { message } => {
                format!("Invalid input file: {}", message)
            }
            ExportError::Selection { message } => {
                format!("Invalid field selection: {}", message)
            }
            ExportError::Render { format, message } => {
                format!("Could not render {} output: {}", format, message)
            }
            ExportError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ExportError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExportError::InputFormat { .. } => Some(
                "The input must be a JSON file whose top-level value is an array of model records, e.g. an OpenWebUI model export.".to_string(),
            ),
            ExportError::Selection { .. } => Some(
                "Select at least one field with --fields, or run with --list-fields to see the available field paths.".to_string(),
            ),
            ExportError::Render { .. } => Some(
                "If every record was filtered out, rerun with --no-filter or adjust the redaction terms in the configuration file.".to_string(),
            ),
            ExportError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string(),
            ),
            ExportError::Permission { .. } => Some(
                "Ensure you have write permission for the output directory, or choose another with --output.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(error: serde_json::Error) -> Self {
        ExportError::InputFormat {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ExportError {
    fn from(error: toml::de::Error) -> Self {
        ExportError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = ExportError::Selection {
            message: "no fields selected".to_string(),
        };
        assert!(error.user_message().contains("Invalid field selection"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_render_constructor() {
        let error = ExportError::render("csv", "no records to export");
        assert!(error.to_string().contains("csv"));
        assert!(error.to_string().contains("no records to export"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let export_error = ExportError::from(json_error);
        assert!(matches!(export_error, ExportError::InputFormat { .. }));
    }
}
