//! Errors raised while locating, reading or writing `config.yml`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called before `load` resolved a location
    #[error("Configuration file path not set")]
    FilePathNotSet,

    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    #[error("Failed to read configuration {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to write configuration {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode configuration as YAML: {0}")]
    SerializationFailed(String),

    #[error("Malformed configuration: {0}")]
    DeserializationFailed(String),

    /// A timing or threshold outside its allowed range
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_names_the_field() {
        let error = ConfigError::InvalidValue {
            field: "reveal_threshold".to_string(),
            message: "must be within 0.0..=1.0".to_string(),
        };
        let text = error.to_string();
        assert!(text.starts_with("Invalid value for reveal_threshold"));
        assert!(text.contains("0.0..=1.0"));
    }

    #[test]
    fn io_failures_carry_the_path() {
        let error = ConfigError::CreateDirectoryFailed {
            path: PathBuf::from("/home/someone/.config/folio-tui"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = error.to_string();
        assert!(text.contains(".config/folio-tui"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn yaml_errors_are_labelled() {
        let error = ConfigError::DeserializationFailed("line 3: bad indentation".to_string());
        assert_eq!(
            error.to_string(),
            "Malformed configuration: line 3: bad indentation"
        );
    }
}
