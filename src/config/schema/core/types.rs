use super::super::cache::DEFAULT_CACHE_FILE;
use super::super::{CacheConfig, SealConfig};
use crate::error::ConfigError;
use crate::seal::{Sealer, UnsealPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub seal: SealConfig,

    #[serde(default)]
    pub secrets: SecretsConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    #[serde(default = "default_true")]
    pub encrypt: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self { encrypt: true }
    }
}

impl Config {
    /// Directory holding config.toml and its sidecar files.
    pub fn config_dir(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Build a [`Sealer`] from the configured secret, used verbatim.
    pub fn sealer(&self) -> Result<Sealer, ConfigError> {
        let secret = self
            .seal
            .secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;
        Sealer::new(secret).map_err(|e| ConfigError::Validation(e.to_string()))
    }

    pub fn unseal_policy(&self) -> UnsealPolicy {
        self.seal.unseal_policy()
    }

    pub fn cache_path(&self) -> PathBuf {
        self.cache
            .path
            .clone()
            .unwrap_or_else(|| self.config_dir().join(DEFAULT_CACHE_FILE))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seal.max_age_secs == Some(0) {
            return Err(ConfigError::Validation(
                "seal.max_age_secs must be greater than zero".into(),
            ));
        }
        if let Some(secret) = self.seal.secret.as_deref()
            && !secret.is_empty()
            && secret.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "seal.secret must not be blank".into(),
            ));
        }
        Ok(())
    }
}
