//! Top-level Palate configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ModelConfig, RetrainConfig, StorageConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`PALATE_*`)
/// 2. Config file (`palate.toml` or an explicit path)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PalateConfig {
    pub storage: StorageConfig,
    pub model: ModelConfig,
    pub retrain: RetrainConfig,
}

impl PalateConfig {
    /// Default config file name looked up in the working directory.
    pub const FILE_NAME: &'static str = "palate.toml";

    /// Load configuration with layered resolution.
    ///
    /// An explicit `path` must exist. Without one, `palate.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = PathBuf::from(Self::FILE_NAME);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `PALATE_*` overrides read through `lookup`.
    ///
    /// Recognized keys: `PALATE_DB_PATH`, `PALATE_READ_POOL_SIZE`,
    /// `PALATE_MODEL_TREES`, `PALATE_MODEL_MAX_DEPTH`, `PALATE_MODEL_SEED`,
    /// `PALATE_RETRAIN_JOIN`, `PALATE_RETRAIN_MIN_INTERVAL_SECS`,
    /// `PALATE_RETRAIN_BACKGROUND`.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("PALATE_DB_PATH") {
            self.storage.db_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("PALATE_READ_POOL_SIZE") {
            self.storage.read_pool_size = parse_env("PALATE_READ_POOL_SIZE", &raw)?;
        }
        if let Some(raw) = lookup("PALATE_MODEL_TREES") {
            self.model.n_trees = parse_env("PALATE_MODEL_TREES", &raw)?;
        }
        if let Some(raw) = lookup("PALATE_MODEL_MAX_DEPTH") {
            self.model.max_depth = Some(parse_env("PALATE_MODEL_MAX_DEPTH", &raw)?);
        }
        if let Some(raw) = lookup("PALATE_MODEL_SEED") {
            self.model.seed = parse_env("PALATE_MODEL_SEED", &raw)?;
        }
        if let Some(raw) = lookup("PALATE_RETRAIN_JOIN") {
            self.retrain.join_strategy = raw.parse()?;
        }
        if let Some(raw) = lookup("PALATE_RETRAIN_MIN_INTERVAL_SECS") {
            self.retrain.min_interval_secs = parse_env("PALATE_RETRAIN_MIN_INTERVAL_SECS", &raw)?;
        }
        if let Some(raw) = lookup("PALATE_RETRAIN_BACKGROUND") {
            self.retrain.background = parse_env("PALATE_RETRAIN_BACKGROUND", &raw)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.n_trees == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "model.n_trees".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.model.max_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "model.max_depth".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }
        if self.model.min_samples_split < 2 {
            return Err(ConfigError::ValidationFailed {
                field: "model.min_samples_split".to_string(),
                message: "must be at least 2".to_string(),
            });
        }
        if self.storage.read_pool_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: key.to_string(),
        message: format!("cannot parse {raw:?}"),
    })
}
