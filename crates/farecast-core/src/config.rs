//! Application configuration
//!
//! Loaded from a TOML file; every section and field has a default so a
//! partial (or absent) config file still yields a runnable setup.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub training: TrainingConfig,
    pub pricing: BasePriceConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Dataset location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the historical ride CSV
    pub dataset_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: "data/dynamic_pricing.csv".to_string(),
        }
    }
}

/// Q-learning hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of full passes over the dataset
    pub episodes: usize,
    /// Learning rate (alpha) - how quickly to update Q-values
    pub learning_rate: f64,
    /// Discount factor (gamma) - importance of future rewards
    pub discount: f64,
    /// Initial exploration rate (epsilon) - probability of a random action
    pub epsilon: f64,
    /// Multiplier applied to epsilon after each completed episode
    pub epsilon_decay: f64,
    /// RNG seed for reproducible exploration
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 25,
            learning_rate: 0.1,
            discount: 0.95,
            epsilon: 0.3,
            epsilon_decay: 0.97,
            seed: 42,
        }
    }
}

/// Base-price estimator parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasePriceConfig {
    /// Half-width of the duration window for the first median lookup (minutes)
    pub duration_window: u32,
    /// Width of the coarse duration bin used by the second fallback (minutes)
    pub coarse_bin: u32,
}

impl Default for BasePriceConfig {
    fn default() -> Self {
        Self {
            duration_window: 5,
            coarse_bin: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.episodes, 25);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.discount, 0.95);
        assert_eq!(config.epsilon, 0.3);
        assert_eq!(config.epsilon_decay, 0.97);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [training]
            episodes = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.training.episodes, 50);
        assert_eq!(config.training.learning_rate, 0.1);
        assert_eq!(config.data.dataset_path, "data/dynamic_pricing.csv");
        assert_eq!(config.pricing.duration_window, 5);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.training.episodes, TrainingConfig::default().episodes);
    }
}
