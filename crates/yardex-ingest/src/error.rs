//! Error types for rule ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// A syntax error in rule source text. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Errors that can occur while locating, reading, or parsing rule files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("rule file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Rule text does not conform to the rule language.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/rules/apt.yar"),
        };
        assert_eq!(err.to_string(), "rule file not found: /rules/apt.yar");
    }

    #[test]
    fn test_parse_error_display() {
        let err = IngestError::Parse {
            path: PathBuf::from("apt.yar"),
            source: ParseError::new(3, 7, "unterminated string"),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse apt.yar: line 3, column 7: unterminated string"
        );
    }
}
