//! Page filtering pipeline: chunk, classify, aggregate.
//!
//! One [`PageFilter`] is built at startup and shared across requests. The
//! only state shared between requests is the classifier pool's concurrency
//! bound; everything else is request-scoped.

use std::collections::HashSet;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::aggregator::aggregate;
use crate::chunk_policy::ChunkPolicy;
use crate::classifier::{BatchedClassifier, Classifier};
use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::model::{FilterResult, Fragment, TextBlock};
use crate::schema::{PageFilterRequest, PageFilterResult};
use crate::segmenter::UnitSplitter;
use crate::worker_pool::ClassifierPool;

pub struct PageFilter<C> {
    chunking: ChunkPolicy,
    pool: ClassifierPool<BatchedClassifier<C>>,
}

impl<C: Classifier> PageFilter<C> {
    /// Build a pipeline around an injected classifier and unit splitter.
    ///
    /// The classifier is fed at most `classifier_batch_size` texts per call
    /// and at most `max_concurrent_classifications` calls run at once. Fails
    /// only if `config` does not validate.
    pub fn new(classifier: C, splitter: Box<dyn UnitSplitter>, config: FilterConfig) -> Result<Self> {
        config.validate()?;
        let chunking = ChunkPolicy::with_splitter(config.split_threshold, config.attach_trailing_punctuation, splitter)?;
        let batched = BatchedClassifier::new(classifier, config.classifier_batch_size);
        let pool = ClassifierPool::new(batched, config.max_concurrent_classifications);
        Ok(Self { chunking, pool })
    }

    /// Expand every block into fragments, in block order
    fn fragments(&self, blocks: &[TextBlock]) -> (Vec<Fragment>, usize) {
        let mut fragments = Vec::new();
        let mut degenerate = 0;
        for block in blocks {
            let expansion = self.chunking.expand(&block.element_id, &block.text);
            fragments.extend(expansion.fragments);
            degenerate += expansion.degenerate_spans;
        }
        (fragments, degenerate)
    }

    /// Run the pipeline over blocks with the given active categories
    pub async fn filter_blocks(
        &self,
        blocks: &[TextBlock],
        active: &HashSet<String>,
    ) -> Result<FilterResult, FilterError> {
        let t0 = Instant::now();

        if active.is_empty() {
            debug!("No active categories, skipping classification");
            return Ok(FilterResult::empty(t0.elapsed()));
        }

        let (fragments, degenerate_spans) = self.fragments(blocks);
        let chunk_elapsed = t0.elapsed();
        if degenerate_spans > 0 {
            warn!(degenerate_spans, "Segmentation produced zero-width fallback spans");
        }

        if fragments.is_empty() {
            debug!(blocks = blocks.len(), "No fragments to classify");
            return Ok(FilterResult {
                degenerate_spans,
                ..FilterResult::empty(t0.elapsed())
            });
        }

        let texts: Vec<String> = fragments.iter().map(|f| f.text.clone()).collect();
        let t_classify = Instant::now();
        let predictions = self.pool.classify(texts).await?;
        let classify_elapsed = t_classify.elapsed();

        let mut result = aggregate(fragments, predictions, active)?;
        result.degenerate_spans = degenerate_spans;
        result.elapsed = t0.elapsed();

        info!(
            blocks = blocks.len(),
            fragments = result.total_fragments,
            filtered_elements = result.filtered_elements.len(),
            degenerate_spans,
            chunk_ms = chunk_elapsed.as_secs_f64() * 1000.0,
            classify_ms = classify_elapsed.as_secs_f64() * 1000.0,
            total_ms = result.elapsed.as_secs_f64() * 1000.0,
            "Filtered page"
        );

        Ok(result)
    }

    pub async fn filter_page(&self, request: &PageFilterRequest) -> Result<PageFilterResult, FilterError> {
        let blocks = request.blocks();
        let active = request.active_set();
        debug!(
            page_url = %request.page_url,
            elements = request.text_elements.len(),
            active = active.len(),
            "Received page filter request"
        );

        let result = self.filter_blocks(&blocks, &active).await?;
        Ok(PageFilterResult::from_result(request.page_url.clone(), result))
    }
}
