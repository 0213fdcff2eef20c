//! Engine configuration, loaded from a TOML file.
//!
//! ```toml
//! database = "symbols.bin"
//!
//! [fallback]
//! enabled = true
//! endpoint = "https://api.openai.com/v1/chat/completions"
//! model = "gpt-4o-mini"
//! api_key_env = "OPENAI_API_KEY"
//! timeout_secs = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{FallbackError, Result};

/// Settings for the generative fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub enabled: bool,

    /// Chat-completions URL of an OpenAI-compatible service.
    pub endpoint: String,

    pub model: String,

    /// Name of the environment variable holding the API key. The key itself
    /// never lives in the file.
    pub api_key_env: String,

    /// Upper bound on one fallback call, in seconds.
    pub timeout_secs: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl FallbackConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key from the environment, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Compiled symbol database.
    pub database: PathBuf,

    pub fallback: FallbackConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("symbols.bin"),
            fallback: FallbackConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FallbackError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let fallback = &self.fallback;
        if fallback.timeout_secs == 0 {
            return Err(FallbackError::Config(
                "fallback.timeout_secs must be positive".to_string(),
            ));
        }
        if fallback.enabled && (fallback.endpoint.trim().is_empty() || fallback.model.trim().is_empty()) {
            return Err(FallbackError::Config(
                "fallback.endpoint and fallback.model are required when the fallback is enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
