//! Shared types, error model, and configuration for paddockdocs.
//!
//! This crate is the foundation depended on by all other paddockdocs crates.
//! It provides:
//! - [`PaddockError`], the unified error type
//! - Domain types ([`Season`], [`DocumentRef`], [`DocumentClass`], [`QuestionAnswer`])
//! - Configuration ([`AppConfig`], config loading, credential validation)
//! - Filesystem path component sanitization

pub mod config;
pub mod error;
pub mod paths;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DownloadsConfig, OpenAiConfig, PortalConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, validate_api_key,
};
pub use error::{PaddockError, Result};
pub use paths::sanitize_component;
pub use types::{DocumentClass, DocumentRef, QuestionAnswer, Season, TokenUsage};
