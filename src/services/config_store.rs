// Configuration Storage Service
// Handles config file read/write and version backup

use crate::services::detection::weights::ScoringConfig;
use crate::services::input_policy::InputPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const CONFIG_VERSION: &str = "1.0.0";
const BACKUPS_TO_KEEP: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Weight '{name}' must be a non-negative number, got {value}")]
    InvalidWeight { name: String, value: f64 },
    #[error("Weights must sum to 1.0, got {0}")]
    WeightSum(f64),
    #[error("Band '{0}' needs distinct, finite ai/human ends")]
    DegenerateBand(String),
    #[error("Invalid confidence damping: {0}")]
    InvalidDamping(String),
    #[error("Invalid input policy: {0}")]
    InvalidPolicy(String),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub input_policy: InputPolicy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            scoring: ScoringConfig::default(),
            input_policy: InputPolicy::default(),
        }
    }
}

fn default_version() -> String { CONFIG_VERSION.to_string() }

impl DetectorConfig {
    /// Validate both tables. The policy's "below recommended" warning and
    /// the confidence damping must agree on where short text ends.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.input_policy.validate_settings()?;

        let policy_words = self.input_policy.recommended_words;
        let damping_words = self.scoring.damping.recommended_words;
        if policy_words != damping_words {
            return Err(ConfigError::InvalidPolicy(format!(
                "inputPolicy.recommendedWords ({}) must match scoring.damping.recommendedWords ({})",
                policy_words, damping_words
            )));
        }
        Ok(())
    }

    /// Read and validate a config file at an explicit path
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: DetectorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ai-text-detector"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(|e| ConfigError::io(&self.config_dir, e))
    }

    /// Load configuration from file; a missing file yields the defaults
    pub fn load(&self) -> Result<DetectorConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(DetectorConfig::default());
        }

        let config = DetectorConfig::from_file(&self.config_file)?;
        info!(path = %self.config_file.display(), version = %config.version, "config.loaded");
        Ok(config)
    }

    /// Validate and save configuration to file
    pub fn save(&self, config: &DetectorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content).map_err(|e| ConfigError::io(&self.config_file, e))
    }

    fn backup_dir(&self) -> PathBuf {
        self.config_dir.join("backups")
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.backup_dir();
        fs::create_dir_all(&backup_dir).map_err(|e| ConfigError::io(&backup_dir, e))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%.3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(|e| ConfigError::io(&backup_file, e))?;

        self.cleanup_old_backups(&backup_dir, BACKUPS_TO_KEEP)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|e| ConfigError::io(backup_dir, e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Timestamped names sort oldest first
        entries.sort_by_key(|e| e.file_name());

        let remove_count = entries.len() - keep;
        for entry in entries.iter().take(remove_count) {
            if let Err(e) = fs::remove_file(entry.path()) {
                warn!(path = %entry.path().display(), error = %e, "config.backup_cleanup_failed");
            }
        }

        Ok(())
    }
}
