//! Bot configuration stored in `config.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BotError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Bot configuration (TOML).
///
/// `output_root`, `project_name` and `model_identifier` are required; the
/// remaining fields tune the completion client and default when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotConfig {
    /// Directory under which project folders are created.
    pub output_root: PathBuf,

    /// Project folder name below `output_root`.
    pub project_name: String,

    /// Model passed to the completion service.
    pub model_identifier: String,

    /// Chat-completions base URL (without `/chat/completions`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Environment variable holding the API credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Client-side timeout for a single completion request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl BotConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.output_root.as_os_str().is_empty() {
            return Err("output_root must not be empty".to_string());
        }
        if self.project_name.trim().is_empty() {
            return Err("project_name must not be empty".to_string());
        }
        if self.model_identifier.trim().is_empty() {
            return Err("model_identifier must not be empty".to_string());
        }
        if self.api_base_url.trim().is_empty() {
            return Err("api_base_url must not be empty".to_string());
        }
        if self.api_key_env.trim().is_empty() {
            return Err("api_key_env must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be > 0".to_string());
        }
        Ok(())
    }

    /// Folder that receives dated artifact subfolders.
    ///
    /// A relative `output_root` is resolved against `root`.
    pub fn project_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.output_root).join(&self.project_name)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load config from a TOML file.
///
/// Unlike state, a missing config is an error: there are no usable defaults
/// for the required keys.
pub fn load_config(path: &Path) -> Result<BotConfig> {
    debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => BotError::config(path, "file not found"),
        _ => BotError::config(path, err.to_string()),
    })?;
    let cfg: BotConfig =
        toml::from_str(&contents).map_err(|err| BotError::config(path, err.to_string()))?;
    cfg.validate()
        .map_err(|message| BotError::config(path, message))?;
    Ok(cfg)
}
