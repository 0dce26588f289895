//! Error types for numsift
//!
//! This module defines the error hierarchy for a generate-and-handle run:
//! - Configuration errors (invalid or missing ranges)
//! - Missing root directory
//! - Malformed data lines
//! - I/O failures with the path that caused them
//!
//! Nothing here is recovered locally. Every error aborts the current
//! operation and is surfaced to the top-level caller.

use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::str::Utf8Error;
use thiserror::Error;

/// Top-level error type for numsift
#[derive(Error, Debug)]
pub enum NumsiftError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Root directory for handling does not exist
    #[error("Directory not found: '{}'", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// A data line could not be parsed as an integer
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// I/O errors (read, write, create, delete)
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Broad classification of a [`NumsiftError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    DirectoryNotFound,
    Format,
    Io,
}

impl NumsiftError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NumsiftError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NumsiftError::Config(_) => ErrorKind::Configuration,
            NumsiftError::DirectoryNotFound { .. } => ErrorKind::DirectoryNotFound,
            NumsiftError::Format(_) => ErrorKind::Format,
            NumsiftError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns the offending path, if the error is tied to one
    pub fn path(&self) -> Option<&Path> {
        match self {
            NumsiftError::Config(_) => None,
            NumsiftError::DirectoryNotFound { path } => Some(path),
            NumsiftError::Format(e) => Some(&e.path),
            NumsiftError::Io { path, .. } => Some(path),
        }
    }
}

/// A line in a data file that is not a base-10 integer
#[derive(Error, Debug, Clone)]
#[error("'{}' line {line}: cannot parse '{content}' as an integer: {source}", path.display())]
pub struct FormatError {
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// Offending text, lossily decoded when not valid UTF-8
    pub content: String,
    #[source]
    pub source: LineError,
}

/// Why a data line is malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("{0}")]
    Int(#[from] ParseIntError),
}

/// Configuration errors, detected before any I/O
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Lower bound above upper bound
    #[error("Invalid {name} range: min {min} exceeds max {max}")]
    InvalidRange {
        name: &'static str,
        min: i64,
        max: i64,
    },

    /// Number counts cannot be negative
    #[error("Invalid {name} range: bound {value} is negative")]
    NegativeCount { name: &'static str, value: i64 },

    /// A required range was not supplied
    #[error("Missing {name} range: both min and max must be set")]
    MissingRange { name: &'static str },

    /// Modulus of zero makes the residue predicate undefined
    #[error("Invalid modulus {0}: must be non-zero")]
    InvalidModulus(i64),

    /// Data file extension is empty or contains a separator
    #[error("Invalid data file extension '{0}'")]
    InvalidExtension(String),

    /// Result file name is empty or not a plain file name
    #[error("Invalid result file name '{0}': must be a plain file name")]
    InvalidResultName(String),

    /// Exclude pattern failed to compile
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidExcludePattern { pattern: String, reason: String },
}

/// Result type alias for NumsiftError
pub type Result<T> = std::result::Result<T, NumsiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_and_path() {
        let err = NumsiftError::DirectoryNotFound {
            path: "/missing".into(),
        };
        assert_eq!(err.kind(), ErrorKind::DirectoryNotFound);
        assert_eq!(err.path(), Some(Path::new("/missing")));

        let err: NumsiftError = ConfigError::MissingRange { name: "count" }.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.path().is_none());
    }

    #[test]
    fn test_format_error_message() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err: NumsiftError = FormatError {
            path: "/data/a.txt".into(),
            line: 3,
            content: "abc".into(),
            source: source.into(),
        }
        .into();

        assert_eq!(err.kind(), ErrorKind::Format);
        let msg = err.to_string();
        assert!(msg.contains("/data/a.txt"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("'abc'"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = NumsiftError::io(
            "/data/result.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
