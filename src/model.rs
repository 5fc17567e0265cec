// Request-scoped data model shared by the chunking, classification and
// aggregation stages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Raw text of one page element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub element_id: String,
    pub text: String,
}

impl TextBlock {
    pub fn new(element_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            text: text.into(),
        }
    }
}

/// Classification-sized slice of a block.
///
/// `start`/`end` are char offsets into the block text. `start == end == 0`
/// with non-empty text means the whole block was kept as one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub element_id: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Fragment {
    pub fn whole_block(element_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            text: text.into(),
            start: 0,
            end: 0,
        }
    }

    /// Whether the offsets address a sub-range of the block
    pub fn has_offsets(&self) -> bool {
        self.start != self.end
    }
}

/// Classifier verdict for one fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Labels above the decision threshold, in vocabulary order
    pub labels: Vec<String>,
    /// Score per vocabulary label, each in `[0, 1]`
    pub confidence: BTreeMap<String, f64>,
}

impl Prediction {
    pub fn new(labels: Vec<String>, confidence: BTreeMap<String, f64>) -> Self {
        Self { labels, confidence }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredFragment {
    pub fragment: Fragment,
    pub prediction: Prediction,
}

/// Retained fragments of one element; never empty
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredElement {
    pub element_id: String,
    pub fragments: Vec<FilteredFragment>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterResult {
    pub filtered_elements: Vec<FilteredElement>,
    pub total_fragments: usize,
    pub elapsed: Duration,
    /// Zero-width fallback spans produced while segmenting
    pub degenerate_spans: usize,
}

impl FilterResult {
    pub fn empty(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }
}
