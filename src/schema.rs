//! JSON wire types for page filter requests and responses.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::model::{FilterResult, FilteredElement, FilteredFragment, TextBlock};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFilterRequest {
    #[serde(default)]
    pub page_url: String,
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
    /// Category toggles; `true` entries form the active set
    #[serde(default, alias = "textFilterCategory")]
    pub active_categories: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub element_id: String,
    #[serde(default)]
    pub texts: Vec<TextEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEntry {
    pub text: String,
}

impl PageFilterRequest {
    pub fn active_set(&self) -> HashSet<String> {
        self.active_categories
            .iter()
            .filter(|&(_, &enabled)| enabled)
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Every text entry as its own block, in request order
    pub fn blocks(&self) -> Vec<TextBlock> {
        self.text_elements
            .iter()
            .flat_map(|element| {
                element
                    .texts
                    .iter()
                    .map(move |entry| TextBlock::new(element.element_id.clone(), entry.text.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFilterResult {
    pub page_url: String,
    pub filtered_elements: Vec<FilteredElementOut>,
    /// Seconds
    pub processing_time: f64,
    pub total_texts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredElementOut {
    pub element_id: String,
    pub filtered_texts: Vec<FilteredText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredText {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub detected_labels: Vec<String>,
    pub confidence: BTreeMap<String, f64>,
}

impl From<FilteredFragment> for FilteredText {
    fn from(f: FilteredFragment) -> Self {
        Self {
            text: f.fragment.text,
            start: f.fragment.start,
            end: f.fragment.end,
            detected_labels: f.prediction.labels,
            confidence: f.prediction.confidence,
        }
    }
}

impl From<FilteredElement> for FilteredElementOut {
    fn from(e: FilteredElement) -> Self {
        Self {
            element_id: e.element_id,
            filtered_texts: e.fragments.into_iter().map(FilteredText::from).collect(),
        }
    }
}

impl PageFilterResult {
    pub fn from_result(page_url: impl Into<String>, result: FilterResult) -> Self {
        Self {
            page_url: page_url.into(),
            filtered_elements: result
                .filtered_elements
                .into_iter()
                .map(FilteredElementOut::from)
                .collect(),
            processing_time: result.elapsed.as_secs_f64(),
            total_texts: result.total_fragments,
        }
    }
}
