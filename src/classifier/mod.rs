//! Multi-label classifier seam.
//!
//! The model itself lives outside this crate. Anything that can turn a batch
//! of texts into per-label scores implements [`Classifier`]; the pipeline only
//! ever calls it from a blocking worker.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ClassifierError;
use crate::model::Prediction;

pub mod batched;
pub mod lexicon;

pub use batched::BatchedClassifier;
pub use lexicon::LexiconClassifier;

/// Blocking, batched multi-label inference.
///
/// Must return exactly one prediction per input text, in input order.
pub trait Classifier: Send + Sync + 'static {
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError>;

    fn vocabulary(&self) -> &LabelVocabulary;
}

impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        (**self).classify(texts)
    }

    fn vocabulary(&self) -> &LabelVocabulary {
        (**self).vocabulary()
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        (**self).classify(texts)
    }

    fn vocabulary(&self) -> &LabelVocabulary {
        (**self).vocabulary()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub code: String,
    pub description: String,
}

/// Fixed, ordered label set a classifier scores against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    labels: Vec<Label>,
}

impl LabelVocabulary {
    pub fn new<I, C, D>(labels: I) -> Self
    where
        I: IntoIterator<Item = (C, D)>,
        C: Into<String>,
        D: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|(code, description)| Label {
                    code: code.into(),
                    description: description.into(),
                })
                .collect(),
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.labels.iter().any(|l| l.code == code)
    }

    pub fn description(&self, code: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.description.as_str())
    }

    /// Turn per-label probabilities (in vocabulary order) into a prediction.
    ///
    /// A label is detected when its score is strictly above `threshold`.
    pub fn predict(&self, scores: &[f64], threshold: f64) -> Result<Prediction, ClassifierError> {
        if scores.len() != self.labels.len() {
            return Err(ClassifierError::MalformedOutput(format!(
                "expected {} scores, got {}",
                self.labels.len(),
                scores.len()
            )));
        }

        let mut labels = Vec::new();
        let mut confidence = BTreeMap::new();

        for (label, &score) in self.labels.iter().zip(scores) {
            if !(0.0..=1.0).contains(&score) {
                return Err(ClassifierError::MalformedOutput(format!(
                    "score {score} for {} is outside [0, 1]",
                    label.code
                )));
            }
            if score > threshold {
                labels.push(label.code.clone());
            }
            confidence.insert(label.code.clone(), score);
        }

        Ok(Prediction::new(labels, confidence))
    }
}

impl Default for LabelVocabulary {
    /// The six labels of the content filter model
    fn default() -> Self {
        Self::new([
            ("IN", "Insults, profanity and abuse"),
            ("VI", "Violent content"),
            ("SE", "Sexual content"),
            ("AD", "Advertising and spam"),
            ("PO", "Political content"),
            ("CLEAN", "Clean text"),
        ])
    }
}
