//! Offset-preserving segmentation of one text block.
//!
//! Units from the splitter are located in the block first, then quote-split
//! locally, then rebased onto the block. The quote splitter only ever sees
//! unit-local text, which is why location has to come first.

use anyhow::Result;
use std::time::Instant;
use tracing::{debug, warn};

use crate::offsets::CharTracker;
use crate::quote_splitter::{QuoteSplitter, SpanKind};
use crate::span_locator;

/// Sentence-boundary collaborator: turns a block into ordered units.
///
/// Units are expected in document order. They should be verbatim substrings of
/// the input; a unit that is not becomes a degenerate span.
pub trait UnitSplitter: Send + Sync {
    fn split_units(&self, text: &str) -> Vec<String>;
}

impl<F> UnitSplitter for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn split_units(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// One segment of a block, with char offsets into the block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
    /// Zero-width fallback for a unit that could not be located
    pub degenerate: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub spans: Vec<SegmentSpan>,
    pub degenerate_units: usize,
}

pub struct Segmenter {
    quotes: QuoteSplitter,
}

impl Segmenter {
    pub fn new(quotes: QuoteSplitter) -> Self {
        Self { quotes }
    }

    pub fn with_default_rules() -> Result<Self> {
        Ok(Self::new(QuoteSplitter::with_default_rules()?))
    }

    pub fn segment(&self, block_text: &str, splitter: &dyn UnitSplitter) -> Segmentation {
        let t0 = Instant::now();
        let units = splitter.split_units(block_text);
        let split_elapsed = t0.elapsed();

        let unit_spans = span_locator::locate(block_text, &units);
        let mut tracker = CharTracker::new(block_text);
        let mut segmentation = Segmentation::default();

        for (unit, unit_span) in units.iter().zip(unit_spans.iter()) {
            if unit_span.is_degenerate() {
                if unit.trim().is_empty() {
                    continue;
                }
                segmentation.degenerate_units += 1;
                let at = tracker.advance_to_byte(unit_span.start).0;
                warn!(offset = at, unit_len = unit.len(), "Unit not found in block, emitting zero-width span");
                segmentation.spans.push(SegmentSpan {
                    text: unit.clone(),
                    start: at,
                    end: at,
                    kind: SpanKind::Plain,
                    degenerate: true,
                });
                continue;
            }

            for token in self.quotes.split_quotes(unit) {
                let abs_start = unit_span.start.advance(token.start);
                let abs_end = unit_span.start.advance(token.end);
                let start = tracker.advance_to_byte(abs_start).0;
                let end = tracker.advance_to_byte(abs_end).0;

                segmentation.spans.push(SegmentSpan {
                    text: block_text[abs_start.0..abs_end.0].to_string(),
                    start,
                    end,
                    kind: token.kind,
                    degenerate: false,
                });
            }
        }

        debug!(
            units = units.len(),
            spans = segmentation.spans.len(),
            degenerate = segmentation.degenerate_units,
            split_ms = split_elapsed.as_secs_f64() * 1000.0,
            total_ms = t0.elapsed().as_secs_f64() * 1000.0,
            "Segmented block"
        );

        segmentation
    }
}
