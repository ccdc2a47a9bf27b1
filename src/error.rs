//! Conversion errors.

use std::path::PathBuf;

/// Errors that can occur while converting a recording.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Cast file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to parse line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Failed to write {path}: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn encoding(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Encoding {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Line number for parse errors, `None` otherwise.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
