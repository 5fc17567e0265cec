//! Configuration for the page filter

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::FilterError;

/// Blocks shorter than this many chars are classified whole
pub const DEFAULT_SPLIT_THRESHOLD: usize = 200;
/// Probability above which a classifier reports a label
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;
/// Texts per classifier forward pass
pub const DEFAULT_BATCH_SIZE: usize = 8;

const ENV_SPLIT_THRESHOLD: &str = "PAGESIFT_SPLIT_THRESHOLD";
const ENV_BATCH_SIZE: &str = "PAGESIFT_BATCH_SIZE";
const ENV_MAX_CONCURRENT: &str = "PAGESIFT_MAX_CONCURRENT";
const ENV_ATTACH_PUNCT: &str = "PAGESIFT_ATTACH_PUNCT";

/// Configuration for fragment construction and classifier dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Char length at which a block is segmented instead of kept whole
    pub split_threshold: usize,

    /// Maximum texts per classifier call; larger pages are sub-batched
    pub classifier_batch_size: usize,

    /// Maximum classifier calls running at once across requests
    pub max_concurrent_classifications: usize,

    /// Absorb `.,!?` directly after a closing quote into the quote span
    pub attach_trailing_punctuation: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            classifier_batch_size: DEFAULT_BATCH_SIZE,
            max_concurrent_classifications: num_cpus::get().max(1),
            attach_trailing_punctuation: true,
        }
    }
}

impl FilterConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.split_threshold == 0 {
            return Err(FilterError::Config("split_threshold must be greater than 0".to_string()));
        }
        if self.classifier_batch_size == 0 {
            return Err(FilterError::Config("classifier_batch_size must be greater than 0".to_string()));
        }
        if self.max_concurrent_classifications == 0 {
            return Err(FilterError::Config(
                "max_concurrent_classifications must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string; missing keys keep their defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, FilterError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, FilterError> {
        toml::to_string_pretty(self).map_err(|e| FilterError::Config(format!("Failed to serialize to TOML: {e}")))
    }

    /// Defaults overridden by `PAGESIFT_*` environment variables
    pub fn from_env() -> Result<Self, FilterError> {
        Self::default().with_env_overrides(std::env::vars())
    }

    /// Apply `PAGESIFT_*` overrides from the given variables
    pub fn with_env_overrides<I>(mut self, vars: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();

        if let Some(value) = vars.get(ENV_SPLIT_THRESHOLD) {
            self.split_threshold = parse_var(ENV_SPLIT_THRESHOLD, value)?;
        }
        if let Some(value) = vars.get(ENV_BATCH_SIZE) {
            self.classifier_batch_size = parse_var(ENV_BATCH_SIZE, value)?;
        }
        if let Some(value) = vars.get(ENV_MAX_CONCURRENT) {
            self.max_concurrent_classifications = parse_var(ENV_MAX_CONCURRENT, value)?;
        }
        if let Some(value) = vars.get(ENV_ATTACH_PUNCT) {
            self.attach_trailing_punctuation = parse_var(ENV_ATTACH_PUNCT, value)?;
        }

        self.validate()?;
        Ok(self)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, FilterError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| FilterError::Config(format!("Invalid value {value:?} for {name}: {e}")))
}
