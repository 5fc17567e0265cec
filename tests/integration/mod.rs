// Integration test utilities shared across test crates
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pagesift::{Classifier, ClassifierError, LabelVocabulary, Prediction};
use tempfile::TempDir;

/// Temporary directory for CLI input files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    pub fn write_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

/// Classifier with scripted labels per exact text, counting calls.
///
/// Texts without a script entry are labelled `CLEAN`.
pub struct StubClassifier {
    vocabulary: LabelVocabulary,
    script: HashMap<String, Vec<String>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
    batches: Mutex<Vec<usize>>,
    failure: Option<fn() -> ClassifierError>,
    drop_last: bool,
}

impl StubClassifier {
    pub fn new() -> Self {
        Self {
            vocabulary: LabelVocabulary::default(),
            script: HashMap::new(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            batches: Mutex::new(Vec::new()),
            failure: None,
            drop_last: false,
        }
    }

    pub fn label(mut self, text: &str, labels: &[&str]) -> Self {
        self.script
            .insert(text.to_string(), labels.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn failing(mut self, failure: fn() -> ClassifierError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Return one prediction fewer than requested
    pub fn short_by_one(mut self) -> Self {
        self.drop_last = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    /// Size of every batch received, in call order
    pub fn batches(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

impl Classifier for StubClassifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().extend(texts.iter().cloned());
        self.batches.lock().unwrap().push(texts.len());

        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let mut predictions: Vec<Prediction> = texts
            .iter()
            .map(|text| {
                let labels = self
                    .script
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| vec!["CLEAN".to_string()]);
                let confidence: BTreeMap<String, f64> = self
                    .vocabulary
                    .codes()
                    .map(|code| {
                        let score = if labels.iter().any(|l| l == code) { 0.9 } else { 0.1 };
                        (code.to_string(), score)
                    })
                    .collect();
                Prediction::new(labels, confidence)
            })
            .collect();

        if self.drop_last {
            predictions.pop();
        }
        Ok(predictions)
    }

    fn vocabulary(&self) -> &LabelVocabulary {
        &self.vocabulary
    }
}

pub fn active(labels: &[&str]) -> HashSet<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

/// Path to the compiled CLI binary
pub fn pagesift_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pagesift"))
}
