//! Configuration loading and validation for vf-core.
//!
//! The analysis configuration is a request-scoped record passed explicitly
//! to components; nothing reads module-level state. Defaults cover every
//! field, an optional TOML file overrides them, and CLI flags override the
//! file. Semantic validation runs after every load.

pub mod policy;

pub use policy::{PolicyConfig, RiskTiers};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("invalid TOML in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Estimator budgets and reproducibility knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Accepted-sample target for the Monte-Carlo path.
    #[serde(default = "default_sample_budget")]
    pub sample_budget: u64,

    /// Wall-clock deadline for the estimator, in milliseconds.
    #[serde(default = "default_wallclock_ms")]
    pub wallclock_ms: u64,

    /// Fixed RNG seed for reproducible marginals.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Switch to exact enumeration when the product of row solution-set
    /// sizes stays at or below this.
    #[serde(default = "default_exact_enumeration_limit")]
    pub exact_enumeration_limit: u64,

    /// Accepted samples below this flag the marginals as low confidence.
    #[serde(default = "default_min_accepted")]
    pub min_accepted: u64,
}

fn default_sample_budget() -> u64 {
    20_000
}

fn default_wallclock_ms() -> u64 {
    2_000
}

fn default_exact_enumeration_limit() -> u64 {
    250_000
}

fn default_min_accepted() -> u64 {
    100
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            sample_budget: default_sample_budget(),
            wallclock_ms: default_wallclock_ms(),
            seed: None,
            exact_enumeration_limit: default_exact_enumeration_limit(),
            min_accepted: default_min_accepted(),
        }
    }
}

impl EstimatorConfig {
    /// The wall-clock deadline as a [`Duration`].
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.wallclock_ms)
    }
}

/// Full analysis configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl AnalysisConfig {
    /// Semantic validation: budgets positive, thresholds in range and
    /// ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimator.sample_budget == 0 {
            return Err(ConfigError::Validation {
                field: "estimator.sample_budget",
                message: "must be positive".to_string(),
            });
        }
        if self.estimator.wallclock_ms == 0 {
            return Err(ConfigError::Validation {
                field: "estimator.wallclock_ms",
                message: "must be positive".to_string(),
            });
        }
        if self.estimator.min_accepted == 0 {
            return Err(ConfigError::Validation {
                field: "estimator.min_accepted",
                message: "must be positive".to_string(),
            });
        }
        let tiers = self.policy.risk_tiers;
        for (field, value) in [
            ("policy.risk_tiers.safe", tiers.safe),
            ("policy.risk_tiers.low", tiers.low),
            ("policy.risk_tiers.medium", tiers.medium),
            (
                "policy.quit_threshold_level",
                self.policy.quit_threshold_level,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(ConfigError::Validation {
                    field,
                    message: format!("{value} is not a probability"),
                });
            }
        }
        if !(tiers.safe <= tiers.low && tiers.low <= tiers.medium) {
            return Err(ConfigError::Validation {
                field: "policy.risk_tiers",
                message: format!(
                    "thresholds must be ordered: safe {} <= low {} <= medium {}",
                    tiers.safe, tiers.low, tiers.medium
                ),
            });
        }
        if !self.policy.quit_threshold_profit.is_finite()
            || self.policy.quit_threshold_profit < 0.0
        {
            return Err(ConfigError::Validation {
                field: "policy.quit_threshold_profit",
                message: "must be a non-negative finite number".to_string(),
            });
        }
        Ok(())
    }
}

/// Load configuration: defaults, overridden by an optional TOML file.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    let config = match path {
        None => AnalysisConfig::default(),
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    ConfigError::NotFound {
                        path: path.to_path_buf(),
                    }
                } else {
                    ConfigError::Io {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;
            toml::from_str(&raw).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?
        }
    };
    config.validate()?;
    Ok(config)
}
