//! Top-level error type.
//!
//! Each module keeps its own `thiserror` enum; `AppError` folds them together
//! so start-up code can use `?` across configuration, content and logging.

pub use crate::config::ConfigError;
pub use crate::content::ContentError;
pub use crate::state::StateError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The global logger was already installed
    #[error("Logger error: {0}")]
    Logger(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_errors_fold_in() {
        let error: AppError = ConfigError::HomeDirectoryNotFound.into();
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Failed to find home directory"
        );
    }

    #[test]
    fn content_errors_keep_the_file_name() {
        let error: AppError = ContentError::UnsupportedFormat(PathBuf::from("site.toml")).into();
        assert!(matches!(error, AppError::Content(_)));
        assert!(error.to_string().contains("site.toml"));
    }

    #[test]
    fn state_errors_fold_in() {
        let error: AppError = StateError::LinkOutOfRange(9).into();
        assert!(matches!(error, AppError::State(_)));
        assert!(error.to_string().starts_with("State error"));
    }

    #[test]
    fn question_mark_converts_io_errors() {
        fn read() -> AppResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/a/real/folio/file")?)
        }
        assert!(matches!(read(), Err(AppError::Io(_))));
    }
}
