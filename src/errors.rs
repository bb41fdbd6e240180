//! Error types
//!
//! `IndexError` covers the index codec and the staging operations.
//! `RepositoryError` covers repository discovery and the object database.
//! Command code works with `anyhow::Error` and downcasts to these when it
//! needs to pick an exit status.

use std::path::PathBuf;

/// Errors raised while decoding, encoding or mutating the index
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Truncated or corrupt record bytes
    #[error("malformed index record: {0}")]
    MalformedRecord(String),

    /// The file does not start with the `DIRC` magic
    #[error("invalid index file signature")]
    InvalidSignature,

    #[error("unsupported index file version: {0}")]
    UnsupportedVersion(u32),

    /// Only ever surfaced as a warning, never returned from a load
    #[error("index checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: String, computed: String },

    /// Semantic misuse of a staging operation
    #[error("{0}")]
    Staging(String),

    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("invalid file mode: {0}")]
    InvalidMode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IndexError {
    pub fn staging(message: impl Into<String>) -> Self {
        IndexError::Staging(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        IndexError::MalformedRecord(message.into())
    }

    /// Format-level errors abort a whole load
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            IndexError::MalformedRecord(_)
                | IndexError::InvalidSignature
                | IndexError::UnsupportedVersion(_)
        )
    }
}

/// Errors raised by repository discovery and the object database
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not a git repository (or any of the parent directories): .git")]
    NotARepository,

    #[error("git repo {} already exists!", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("not a valid object name: {0}")]
    ObjectNotFound(String),

    #[error("invalid object {0}")]
    InvalidObject(String),
}

pub type IndexResult<T> = Result<T, IndexError>;
