//! Application configuration for paddockdocs.
//!
//! User config lives at `~/.paddockdocs/paddockdocs.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PaddockError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "paddockdocs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".paddockdocs";

// ---------------------------------------------------------------------------
// Config structs (matching paddockdocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document portal settings.
    #[serde(default)]
    pub portal: PortalConfig,

    /// OpenAI-compatible model settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Local download settings.
    #[serde(default)]
    pub downloads: DownloadsConfig,
}

/// `[portal]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Portal origin, used to absolutize relative links.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the championship documents listing under the portal origin.
    #[serde(default = "default_documents_path")]
    pub documents_path: String,
}

impl PortalConfig {
    /// Full URL of the season listing page.
    pub fn documents_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.documents_path
        )
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            documents_path: default_documents_path(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.fia.com".into()
}
fn default_documents_path() -> String {
    "/documents/championships/fia-formula-one-world-championship-14/".into()
}

/// `[openai]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Chat model used to answer questions.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Embedding model used to vectorize chunks.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// USD per 1M prompt tokens, for cost accounting.
    #[serde(default = "default_prompt_price")]
    pub prompt_usd_per_million: f64,

    /// USD per 1M completion tokens, for cost accounting.
    #[serde(default = "default_completion_price")]
    pub completion_usd_per_million: f64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_openai_base_url(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            prompt_usd_per_million: default_prompt_price(),
            completion_usd_per_million: default_completion_price(),
        }
    }
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_chat_model() -> String {
    "gpt-4o".into()
}
fn default_embedding_model() -> String {
    "text-embedding-3-small".into()
}
fn default_prompt_price() -> f64 {
    2.50
}
fn default_completion_price() -> f64 {
    10.00
}

/// `[downloads]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadsConfig {
    /// Root directory for downloaded PDFs.
    #[serde(default = "default_download_dir")]
    pub dir: String,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
        }
    }
}

fn default_download_dir() -> String {
    "data/raw_pdfs".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.paddockdocs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PaddockError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.paddockdocs/paddockdocs.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PaddockError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| PaddockError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PaddockError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PaddockError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PaddockError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the model API key env var is set and non-empty.
///
/// Called eagerly on the summarization path, before any document fetch.
pub fn validate_api_key(config: &AppConfig) -> Result<()> {
    let var_name = &config.openai.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(()),
        _ => Err(PaddockError::config(format!(
            "model API key not found. Set the {var_name} environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("OPENAI_API_KEY"));
        assert!(toml_str.contains("raw_pdfs"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(parsed.openai.chat_model, "gpt-4o");
        assert_eq!(parsed.downloads.dir, "data/raw_pdfs");
    }

    #[test]
    fn documents_url_joins_origin_and_path() {
        let portal = PortalConfig::default();
        assert_eq!(
            portal.documents_url(),
            "https://www.fia.com/documents/championships/fia-formula-one-world-championship-14/"
        );

        let portal = PortalConfig {
            base_url: "https://portal.example/".into(),
            documents_path: "/docs/".into(),
        };
        assert_eq!(portal.documents_url(), "https://portal.example/docs/");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[openai]
chat_model = "gpt-4o-mini"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.openai.chat_model, "gpt-4o-mini");
        assert_eq!(config.openai.embedding_model, "text-embedding-3-small");
        assert_eq!(config.portal.base_url, "https://www.fia.com");
    }

    #[test]
    fn api_key_validation() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.openai.api_key_env = "PD_TEST_NONEXISTENT_KEY_12345".into();
        let result = validate_api_key(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key not found"));
    }
}
