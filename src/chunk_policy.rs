use anyhow::Result;

use crate::model::Fragment;
use crate::offsets::char_len;
use crate::quote_splitter::QuoteSplitter;
use crate::segmenter::{Segmenter, UnitSplitter};

/// Fragments produced for one block
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub fragments: Vec<Fragment>,
    pub degenerate_spans: usize,
}

/// Decides per block whether it is classified whole or segmented first.
pub struct ChunkPolicy {
    threshold: usize,
    segmenter: Segmenter,
    splitter: Box<dyn UnitSplitter>,
}

impl ChunkPolicy {
    pub fn new(threshold: usize, segmenter: Segmenter, splitter: Box<dyn UnitSplitter>) -> Self {
        Self {
            threshold,
            segmenter,
            splitter,
        }
    }

    /// Build a policy with the default quote rules
    pub fn with_splitter(
        threshold: usize,
        attach_trailing_punctuation: bool,
        splitter: Box<dyn UnitSplitter>,
    ) -> Result<Self> {
        let segmenter = Segmenter::new(QuoteSplitter::new(attach_trailing_punctuation)?);
        Ok(Self::new(threshold, segmenter, splitter))
    }

    pub fn expand(&self, element_id: &str, text: &str) -> Expansion {
        if text.is_empty() {
            return Expansion::default();
        }

        // WHY: the threshold is in chars; a 3-byte Hangul syllable counts once.
        if char_len(text) < self.threshold {
            return Expansion {
                fragments: vec![Fragment::whole_block(element_id, text)],
                degenerate_spans: 0,
            };
        }

        let segmentation = self.segmenter.segment(text, self.splitter.as_ref());
        let fragments = segmentation
            .spans
            .into_iter()
            .map(|span| Fragment {
                element_id: element_id.to_string(),
                text: span.text,
                start: span.start,
                end: span.end,
            })
            .collect();

        Expansion {
            fragments,
            degenerate_spans: segmentation.degenerate_units,
        }
    }
}
