use tracing::trace;

use super::{Classifier, LabelVocabulary};
use crate::error::ClassifierError;
use crate::model::Prediction;

/// Splits oversized requests into fixed-size forward passes.
///
/// Sub-batches run sequentially on the calling thread and their predictions
/// are concatenated in input order.
pub struct BatchedClassifier<C> {
    inner: C,
    batch_size: usize,
}

impl<C: Classifier> BatchedClassifier<C> {
    pub fn new(inner: C, batch_size: usize) -> Self {
        Self {
            inner,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Classifier> Classifier for BatchedClassifier<C> {
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        let mut predictions = Vec::with_capacity(texts.len());

        for (i, batch) in texts.chunks(self.batch_size).enumerate() {
            let mut batch_predictions = self.inner.classify(batch)?;
            if batch_predictions.len() != batch.len() {
                return Err(ClassifierError::MalformedOutput(format!(
                    "sub-batch {i} returned {} predictions for {} texts",
                    batch_predictions.len(),
                    batch.len()
                )));
            }
            trace!(batch = i, size = batch.len(), "Classified sub-batch");
            predictions.append(&mut batch_predictions);
        }

        Ok(predictions)
    }

    fn vocabulary(&self) -> &LabelVocabulary {
        self.inner.vocabulary()
    }
}
