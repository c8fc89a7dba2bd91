//! Error types for QueryLens.
//!
//! Library crates use [`QueryLensError`] via `thiserror`.
//! The TUI binary wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for QueryLens operations.
#[derive(Debug, thiserror::Error)]
pub enum QueryLensError {
    /// Configuration loading or parsing error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A config value parsed but is out of range or unknown.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, QueryLensError>;

impl QueryLensError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = QueryLensError::config("could not determine home directory");
        assert_eq!(
            err.to_string(),
            "config error: could not determine home directory"
        );

        let err = QueryLensError::validation("tick_rate_ms must be between 1 and 10000");
        assert!(err.to_string().starts_with("validation error:"));
        assert!(err.to_string().contains("tick_rate_ms"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = QueryLensError::io("/tmp/querylens.toml", source);
        let msg = err.to_string();
        assert!(msg.contains("/tmp/querylens.toml"));
        assert!(msg.contains("gone"));
    }
}
