//! Error types for classification and page filtering

use thiserror::Error;

/// Errors raised by a classifier implementation
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Model or backend not ready to serve predictions
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    /// Inference itself failed
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Classifier returned something that does not fit the label vocabulary
    #[error("Malformed classifier output: {0}")]
    MalformedOutput(String),
}

/// Errors that fail a whole page filtering call
#[derive(Error, Debug)]
pub enum FilterError {
    /// Classifier error, propagated unchanged
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// Classifier returned a different number of predictions than fragments sent
    #[error("Prediction count mismatch: sent {expected} fragments, got {actual} predictions")]
    PredictionCountMismatch { expected: usize, actual: usize },

    /// Blocking worker could not be scheduled or panicked
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for FilterError {
    fn from(e: toml::de::Error) -> Self {
        FilterError::Config(format!("Failed to parse TOML: {e}"))
    }
}
