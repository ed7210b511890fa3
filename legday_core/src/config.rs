//! Configuration file support for Legday.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/legday/config.toml`.

use crate::types::{Difficulty, Speed};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub advice: AdviceConfig,

    #[serde(default)]
    pub training: TrainingConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Advice relay configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdviceConfig {
    #[serde(default = "default_advice_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_advice_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_advice_endpoint(),
            timeout_seconds: default_advice_timeout_seconds(),
        }
    }
}

impl AdviceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Default timer settings for a new training session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_speed")]
    pub speed: Speed,

    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,

    /// Body weight used for the calorie estimate; unset leaves the
    /// estimate at zero
    #[serde(default)]
    pub body_weight_kg: Option<f64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            difficulty: default_difficulty(),
            body_weight_kg: None,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("legday")
}

fn default_advice_endpoint() -> String {
    "http://localhost:3000/api/advice".into()
}

fn default_advice_timeout_seconds() -> u64 {
    30
}

fn default_speed() -> Speed {
    Speed::Slow
}

fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("legday").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.advice.endpoint.ends_with("/api/advice"));
        assert_eq!(config.advice.timeout_seconds, 30);
        assert_eq!(config.training.speed, Speed::Slow);
        assert_eq!(config.training.difficulty, Difficulty::Easy);
        assert!(config.training.body_weight_kg.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.training.body_weight_kg = Some(72.5);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.advice.endpoint, parsed.advice.endpoint);
        assert_eq!(config.training.speed, parsed.training.speed);
        assert_eq!(config.training.body_weight_kg, parsed.training.body_weight_kg);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[training]
speed = "fast"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.training.speed, Speed::Fast);
        assert_eq!(config.training.difficulty, Difficulty::Easy); // default
        assert_eq!(config.advice.timeout_seconds, 30); // default
    }
}
