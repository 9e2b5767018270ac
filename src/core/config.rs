//! Workshop configuration with layered hierarchy
//!
//! Sources, later ones winning field by field:
//! 1. built-in defaults
//! 2. global user config (`<config dir>/workshop/config.yaml`)
//! 3. an explicit `--config` file
//! 4. `WORKSHOP_*` environment variables
//! 5. command-line overrides (applied by the caller through [`ConfigLayer`])

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::input::RetryPolicy;
use crate::core::pricing::{default_discounts, DiscountRule, PricingPolicy};
use crate::entities::attendee::Modality;

pub const DEFAULT_WORKSHOP_NAME: &str = "Kotlin Taller González";
pub const DEFAULT_CAPACITY: usize = 5;
pub const DEFAULT_BASE_PRICE: f64 = 50.0;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Invalid YAML in config file {}: {message}", path.display())]
    #[diagnostic(help("Keys: name, capacity, base_price, discounts, modalities, max_attempts"))]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {var}: {value:?}")]
    #[diagnostic(help("{expected}"))]
    Env {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Effective settings for one registration session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkshopConfig {
    /// Workshop name shown in the banner and closing message
    pub name: String,

    /// Maximum number of attendees
    pub capacity: usize,

    /// Price before discounts
    pub base_price: f64,

    /// Ordered discount table, first match wins
    pub discounts: Vec<DiscountRule>,

    /// Slots offered to attendees
    pub modalities: Vec<Modality>,

    /// Attempts allowed per field before the session gives up (None = unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_WORKSHOP_NAME.to_string(),
            capacity: DEFAULT_CAPACITY,
            base_price: DEFAULT_BASE_PRICE,
            discounts: default_discounts(),
            modalities: Modality::ALL.to_vec(),
            max_attempts: None,
        }
    }
}

/// A partial configuration, as read from one source
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub name: Option<String>,
    pub capacity: Option<usize>,
    pub base_price: Option<f64>,
    pub discounts: Option<Vec<DiscountRule>>,
    pub modalities: Option<Vec<Modality>>,
    pub max_attempts: Option<u32>,
}

impl ConfigLayer {
    /// Read a layer from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        // An empty file is a valid, empty layer
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read a layer from `WORKSHOP_*` variables through `lookup`
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layer = Self {
            name: lookup("WORKSHOP_NAME").filter(|v| !v.trim().is_empty()),
            ..Self::default()
        };

        if let Some(value) = lookup("WORKSHOP_CAPACITY") {
            layer.capacity = Some(value.trim().parse().map_err(|_| ConfigError::Env {
                var: "WORKSHOP_CAPACITY",
                value: value.clone(),
                expected: "a positive whole number",
            })?);
        }
        if let Some(value) = lookup("WORKSHOP_BASE_PRICE") {
            layer.base_price = Some(value.trim().parse().map_err(|_| ConfigError::Env {
                var: "WORKSHOP_BASE_PRICE",
                value: value.clone(),
                expected: "a non-negative decimal number",
            })?);
        }
        if let Some(value) = lookup("WORKSHOP_MAX_ATTEMPTS") {
            layer.max_attempts = Some(value.trim().parse().map_err(|_| ConfigError::Env {
                var: "WORKSHOP_MAX_ATTEMPTS",
                value: value.clone(),
                expected: "a positive whole number",
            })?);
        }

        Ok(layer)
    }

    /// Read a layer from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }
}

impl WorkshopConfig {
    /// Load configuration from defaults, the global file, an optional
    /// explicit file and the environment. The result is not yet validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = WorkshopConfig::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match ConfigLayer::from_file(&global_path) {
                    Ok(layer) => config.merge(layer),
                    Err(e) => tracing::warn!(path = %global_path.display(), error = %e, "ignoring global config"),
                }
            }
        }

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config file");
            config.merge(ConfigLayer::from_file(path)?);
        }

        config.merge(ConfigLayer::from_env()?);

        Ok(config)
    }

    /// Path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "workshop")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge a layer into this config (the layer takes precedence)
    pub fn merge(&mut self, layer: ConfigLayer) {
        if let Some(name) = layer.name {
            self.name = name;
        }
        if let Some(capacity) = layer.capacity {
            self.capacity = capacity;
        }
        if let Some(base_price) = layer.base_price {
            self.base_price = base_price;
        }
        if let Some(discounts) = layer.discounts {
            self.discounts = discounts;
        }
        if let Some(modalities) = layer.modalities {
            self.modalities = modalities;
        }
        if layer.max_attempts.is_some() {
            self.max_attempts = layer.max_attempts;
        }
    }

    /// Check the invariants the session relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("workshop name must not be empty".into()));
        }
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be at least 1".into()));
        }
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "base price must be a non-negative number, got {}",
                self.base_price
            )));
        }
        for rule in &self.discounts {
            if !(0.0..=1.0).contains(&rule.discount) {
                return Err(ConfigError::Invalid(format!(
                    "discount {} is outside [0, 1]",
                    rule.discount
                )));
            }
            if let (Some(min), Some(max)) = (rule.min_age, rule.max_age) {
                if min >= max {
                    return Err(ConfigError::Invalid(format!(
                        "discount age range {}..{} is empty",
                        min, max
                    )));
                }
            }
        }
        if self.modalities.is_empty() {
            return Err(ConfigError::Invalid("at least one modality is required".into()));
        }
        let mut seen = HashSet::new();
        for modality in &self.modalities {
            if !seen.insert(modality) {
                return Err(ConfigError::Invalid(format!(
                    "modality {} is listed twice",
                    modality
                )));
            }
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        Ok(())
    }

    pub fn pricing(&self) -> PricingPolicy {
        PricingPolicy::new(self.base_price, self.discounts.clone())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
        }
    }

    /// Modality labels joined with `/`, as shown in the prompt
    pub fn modality_choices(&self) -> String {
        self.modalities
            .iter()
            .map(Modality::label)
            .collect::<Vec<_>>()
            .join("/")
    }
}
