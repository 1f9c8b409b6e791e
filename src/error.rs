//! Error types for doxyref

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading Doxygen XML or writing references.
#[derive(Error, Debug)]
pub enum DocsError {
    /// The index or a compound document does not exist.
    #[error("Document not found: {}", .path.display())]
    DocumentNotFound { path: PathBuf },

    /// A document is not well-formed, or a required field is missing.
    #[error("Malformed input in {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },

    /// An output file or its parent directory could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    OutputWriteFailure { path: PathBuf, source: io::Error },

    /// A document exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// Invalid configuration file or exclude pattern.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DocsError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DocsError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Map a read failure, keeping "not found" distinct
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            DocsError::DocumentNotFound { path }
        } else {
            DocsError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_read_not_found() {
        let err = DocsError::from_read("xml/index.xml", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, DocsError::DocumentNotFound { .. }));
        assert!(err.to_string().contains("index.xml"));
    }

    #[test]
    fn test_from_read_other() {
        let err = DocsError::from_read(
            "xml/index.xml",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, DocsError::Io { .. }));
    }

    #[test]
    fn test_malformed_message() {
        let err = DocsError::malformed("a.xml", "function add_1 is missing <name>");
        assert_eq!(
            err.to_string(),
            "Malformed input in a.xml: function add_1 is missing <name>"
        );
    }
}
