pub mod aggregator;
pub mod chunk_policy;
pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod offsets;
pub mod pipeline;
pub mod quote_splitter;
pub mod schema;
pub mod segmenter;
pub mod sentence_splitter;
pub mod span_locator;
pub mod worker_pool;

// Re-export main types for convenient access
pub use classifier::{BatchedClassifier, Classifier, LabelVocabulary, LexiconClassifier};
pub use config::FilterConfig;
pub use error::{ClassifierError, FilterError};
pub use model::{FilterResult, FilteredElement, FilteredFragment, Fragment, Prediction, TextBlock};
pub use pipeline::PageFilter;
pub use schema::{PageFilterRequest, PageFilterResult};

// Re-export segmentation building blocks
pub use chunk_policy::{ChunkPolicy, Expansion};
pub use quote_splitter::{QuoteSplitter, SpanKind};
pub use segmenter::{SegmentSpan, Segmenter, UnitSplitter};
pub use sentence_splitter::SentenceSplitter;
