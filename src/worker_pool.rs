//! Bounded pool for blocking classifier calls.
//!
//! Inference is CPU-bound and must stay off the async executor. Each call runs
//! on the blocking thread pool, and a semaphore caps how many run at once
//! across every request sharing the pool.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::classifier::Classifier;
use crate::error::FilterError;
use crate::model::Prediction;

pub struct ClassifierPool<C> {
    classifier: Arc<C>,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl<C> Clone for ClassifierPool<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            permits: Arc::clone(&self.permits),
            max_concurrent: self.max_concurrent,
        }
    }
}

impl<C: Classifier> ClassifierPool<C> {
    pub fn new(classifier: C, max_concurrent: usize) -> Self {
        Self::from_shared(Arc::new(classifier), max_concurrent)
    }

    pub fn from_shared(classifier: Arc<C>, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            classifier,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Classify `texts` on a blocking worker, waiting for a free slot first.
    ///
    /// The permit moves into the worker, so a cancelled caller does not free
    /// the slot before inference actually finishes.
    pub async fn classify(&self, texts: Vec<String>) -> Result<Vec<Prediction>, FilterError> {
        let queued = Instant::now();
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| FilterError::WorkerPool(format!("Semaphore closed: {e}")))?;
        let waited = queued.elapsed();

        let classifier = Arc::clone(&self.classifier);
        let batch = texts.len();
        let predictions = tokio::task::spawn_blocking(move || {
            // WHY: the slot is released when inference returns, not when the
            // awaiting future is dropped.
            let _permit = permit;
            classifier.classify(&texts)
        })
        .await
        .map_err(|e| FilterError::WorkerPool(format!("Classifier task failed: {e}")))??;

        debug!(
            batch,
            wait_ms = waited.as_secs_f64() * 1000.0,
            total_ms = queued.elapsed().as_secs_f64() * 1000.0,
            "Classifier call finished"
        );

        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LabelVocabulary;
    use crate::error::ClassifierError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Tracks the highest number of overlapping calls
    struct Slow {
        vocabulary: LabelVocabulary,
        running: AtomicUsize,
        peak: AtomicUsize,
        fail: bool,
    }

    impl Slow {
        fn new(fail: bool) -> Self {
            Self {
                vocabulary: LabelVocabulary::default(),
                running: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl Classifier for Slow {
        fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            self.running.fetch_sub(1, Ordering::SeqCst);

            if self.fail {
                return Err(ClassifierError::Inference("boom".to_string()));
            }
            Ok(texts.iter().map(|_| Prediction::default()).collect())
        }

        fn vocabulary(&self) -> &LabelVocabulary {
            &self.vocabulary
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_is_bounded() {
        let pool = ClassifierPool::new(Slow::new(false), 2);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { pool.classify(vec!["x".to_string()]).await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().len(), 1);
        }

        assert!(pool.classifier().peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(pool.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_classifier_error_propagates() {
        let pool = ClassifierPool::new(Slow::new(true), 1);
        let err = pool.classify(vec!["x".to_string()]).await.unwrap_err();
        assert!(matches!(err, FilterError::Classifier(ClassifierError::Inference(_))));
        assert_eq!(pool.available_permits(), 1);
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let pool = ClassifierPool::new(Slow::new(false), 0);
        assert_eq!(pool.max_concurrent(), 1);
    }
}
