//! Content-specific error types.

use std::path::PathBuf;

/// Errors that can occur while loading portfolio content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Failed to read the content file
    #[error("Failed to read content from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Content file could not be parsed
    #[error("Failed to parse content from {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// File extension is neither YAML nor JSON
    #[error("Unsupported content format: {0}")]
    UnsupportedFormat(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_error_display() {
        let error = ContentError::ParseFailed {
            path: PathBuf::from("/tmp/content.yml"),
            message: "bad indent".to_string(),
        };
        assert!(error.to_string().contains("/tmp/content.yml"));
        assert!(error.to_string().contains("bad indent"));

        let error = ContentError::UnsupportedFormat(PathBuf::from("content.toml"));
        assert!(error.to_string().contains("content.toml"));
    }
}
