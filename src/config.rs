//! Engine configuration. Built once at startup, immutable afterwards; the core
//! never reads the environment itself.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path to the ONNX classifier artifact
    pub model_path: PathBuf,
    /// Feature extraction parameters
    pub features: FeaturesConfig,
    /// Decision thresholds
    pub decision: DecisionConfig,
    /// HTTP service
    pub server: ServerConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Inter-arrival gap (µs) at or above which a gap counts as idle
    pub idle_threshold_us: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Probability at or above this is an attack (0.0–1.0)
    pub prediction_threshold: f64,
    /// Attach probability, threshold and features to service responses
    pub debug_details: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.onnx"),
            features: FeaturesConfig::default(),
            decision: DecisionConfig::default(),
            server: ServerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            idle_threshold_us: 1_000_000,
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            prediction_threshold: 0.5,
            debug_details: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl EngineConfig {
    /// Load from JSON file if present, otherwise start from defaults. Does not
    /// look at the environment; see [`EngineConfig::with_env_overrides`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str::<EngineConfig>(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };
        config.validate()
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`).
    /// Recognised: MODEL_PATH, IDLE_THRESHOLD, PREDICTION_THRESHOLD,
    /// DEBUG_MODE, LISTEN_ADDR.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MODEL_PATH") {
            self.model_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("IDLE_THRESHOLD") {
            self.features.idle_threshold_us = v.trim().parse().map_err(|_| ConfigError::Env {
                name: "IDLE_THRESHOLD",
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("PREDICTION_THRESHOLD") {
            self.decision.prediction_threshold =
                v.trim().parse().map_err(|_| ConfigError::Env {
                    name: "PREDICTION_THRESHOLD",
                    value: v.clone(),
                })?;
        }
        if let Some(v) = lookup("DEBUG_MODE") {
            self.decision.debug_details = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::Env {
                        name: "DEBUG_MODE",
                        value: v,
                    })
                }
            };
        }
        if let Some(v) = lookup("LISTEN_ADDR") {
            self.server.listen_addr = v;
        }
        self.validate()
    }

    /// File then process environment, as the binary does at startup.
    pub fn from_file_and_env(path: &Path) -> Result<Self, ConfigError> {
        Self::load(path)?.with_env_overrides(|name| std::env::var(name).ok())
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let t = self.decision.prediction_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::PredictionThreshold(t));
        }
        Ok(self)
    }
}
