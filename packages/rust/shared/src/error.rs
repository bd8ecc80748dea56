//! Error types for paddockdocs.
//!
//! Library crates use [`PaddockError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all paddockdocs operations.
#[derive(Debug, thiserror::Error)]
pub enum PaddockError {
    /// Configuration loading/validation error, including a missing credential.
    #[error("config error: {message}")]
    Config { message: String },

    /// HTTP non-success status or transport failure. Never retried.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// An expected markup element is missing; the portal's HTML changed.
    #[error("page structure error: {message}")]
    PageStructure { message: String },

    /// Indexing produced zero usable chunks from a non-empty document set.
    #[error("empty corpus: {message}")]
    EmptyCorpus { message: String },

    /// Embedding or answer capability failure (API or response parsing).
    #[error("model error: {0}")]
    Model(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PaddockError>;

impl PaddockError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a page structure error from any displayable message.
    pub fn page_structure(msg: impl Into<String>) -> Self {
        Self::PageStructure {
            message: msg.into(),
        }
    }

    /// Create an empty corpus error from any displayable message.
    pub fn empty_corpus(msg: impl Into<String>) -> Self {
        Self::EmptyCorpus {
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
