//! Keyword lexicon classifier.
//!
//! Scores each label by counting case-insensitive keyword hits. It stands in
//! for a neural model when running the CLI or wiring up a deployment without
//! model weights, and gives the pipeline deterministic output.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::{Classifier, LabelVocabulary};
use crate::config::DEFAULT_DECISION_THRESHOLD;
use crate::error::ClassifierError;
use crate::model::Prediction;

/// Label assigned when no other label fires
pub const CLEAN_LABEL: &str = "CLEAN";

/// Per-hit decay: one hit scores 0.6, two 0.84, three 0.936
const MISS_FACTOR: f64 = 0.4;

/// On-disk lexicon: label code to keyword list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl Lexicon {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse lexicon JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).with_context(|| format!("Failed to read lexicon {}", path.display()))?;
        Self::from_json(&json)
    }
}

pub struct LexiconClassifier {
    vocabulary: LabelVocabulary,
    /// Lowercased keywords per vocabulary index
    keywords: Vec<Vec<String>>,
    clean_index: Option<usize>,
    threshold: f64,
}

impl LexiconClassifier {
    pub fn new(vocabulary: LabelVocabulary, lexicon: Lexicon) -> Result<Self> {
        for code in lexicon.keywords.keys() {
            if !vocabulary.contains(code) {
                bail!("Lexicon label {code:?} is not in the label vocabulary");
            }
        }

        let keywords = vocabulary
            .codes()
            .map(|code| {
                lexicon
                    .keywords
                    .get(code)
                    .map(|words| {
                        words
                            .iter()
                            .map(|w| w.trim().to_lowercase())
                            .filter(|w| !w.is_empty())
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect();
        let clean_index = vocabulary.codes().position(|code| code == CLEAN_LABEL);

        Ok(Self {
            vocabulary,
            keywords,
            clean_index,
            threshold: DEFAULT_DECISION_THRESHOLD,
        })
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(LabelVocabulary::default(), Lexicon::load(path)?)
    }

    fn scores(&self, text: &str) -> Vec<f64> {
        let haystack = text.to_lowercase();
        let mut scores: Vec<f64> = self
            .keywords
            .iter()
            .map(|words| {
                let hits = words.iter().map(|w| haystack.matches(w.as_str()).count()).sum::<usize>();
                1.0 - MISS_FACTOR.powi(i32::try_from(hits).unwrap_or(i32::MAX))
            })
            .collect();

        if let Some(clean) = self.clean_index {
            let strongest = scores
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != clean)
                .map(|(_, &s)| s)
                .fold(0.0, f64::max);
            scores[clean] = 1.0 - strongest;
        }

        scores
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        let predictions = texts
            .iter()
            .map(|text| self.vocabulary.predict(&self.scores(text), self.threshold))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(batch = texts.len(), "Lexicon classified batch");
        Ok(predictions)
    }

    fn vocabulary(&self) -> &LabelVocabulary {
        &self.vocabulary
    }
}
