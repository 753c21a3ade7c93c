//! Error types for tree building.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::ProviderError;

/// Fatal errors that abort building a tree.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Directory walk failed without an underlying I/O error.
    #[error("Walk failed at {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// The directory record provider failed.
    #[error("Directory record provider failed: {source}")]
    Provider {
        #[source]
        source: ProviderError,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl BuildError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Wrap a directory record provider failure.
    pub fn provider(source: ProviderError) -> Self {
        Self::Provider { source }
    }
}

/// Kind of build warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// The item provider failed for one directory.
    ItemListing,
    /// Two items in the same directory share a title.
    DuplicateTitle,
}

/// Non-fatal warning encountered while building a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildWarning {
    /// Record path where the warning occurred.
    pub path: String,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl BuildWarning {
    /// Create a new build warning.
    pub fn new(path: impl Into<String>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create an item listing warning.
    pub fn item_listing(path: impl Into<String>, error: &dyn std::error::Error) -> Self {
        Self {
            path: path.into(),
            message: format!("Item listing failed: {error}"),
            kind: WarningKind::ItemListing,
        }
    }

    /// Create a duplicate title warning.
    pub fn duplicate_title(path: impl Into<String>, title: &str) -> Self {
        Self {
            path: path.into(),
            message: format!("Duplicate item title: {title}"),
            kind: WarningKind::DuplicateTitle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_io() {
        let err = BuildError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, BuildError::PermissionDenied { .. }));

        let err = BuildError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, BuildError::NotFound { .. }));
    }

    #[test]
    fn test_provider_error_message() {
        let err = BuildError::provider("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_build_warning_creation() {
        let io = std::io::Error::other("timeout");
        let warning = BuildWarning::item_listing("movies/2020", &io);
        assert_eq!(warning.kind, WarningKind::ItemListing);
        assert!(warning.message.contains("timeout"));
        assert_eq!(warning.path, "movies/2020");
    }
}
