// Quote-aware splitting of one unit into Plain and Quoted tokens.
// Offsets are local byte offsets into the unit; the segmenter rebases them.

use anyhow::Result;
use regex_automata::meta::Regex;

/// Paired quotation marks recognised as quote blocks: two typographic pairs
/// and two ASCII pairs. Non-greedy, and `.` spans newlines.
const QUOTE_BLOCK_PATTERN: &str = "(?s)\u{201C}.*?\u{201D}|\u{2018}.*?\u{2019}|\".*?\"|'.*?'";

/// Punctuation that may trail a closing quote and be absorbed into it
const TRAILING_PUNCTUATION: &[u8] = b".,!?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Quoted,
}

/// One token of a unit, addressed by local byte offsets `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteToken {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

impl QuoteToken {
    pub fn text<'a>(&self, unit: &'a str) -> &'a str {
        &unit[self.start..self.end]
    }

    fn is_blank(&self, unit: &str) -> bool {
        self.text(unit).trim().is_empty()
    }
}

/// Splits a unit into alternating plain and quoted spans.
///
/// Quotes do not nest: the first matching closer ends a block, and an opener
/// without a closer is ordinary text.
#[derive(Debug)]
pub struct QuoteSplitter {
    quote_block: Regex,
    attach_trailing_punctuation: bool,
}

impl QuoteSplitter {
    pub fn new(attach_trailing_punctuation: bool) -> Result<Self> {
        Ok(Self {
            quote_block: Regex::new(QUOTE_BLOCK_PATTERN)?,
            attach_trailing_punctuation,
        })
    }

    /// Splitter with trailing punctuation attachment enabled
    pub fn with_default_rules() -> Result<Self> {
        Self::new(true)
    }

    /// Tokenize the whole unit, whitespace-only tokens included.
    ///
    /// The returned tokens tile `[0, unit.len())` without gaps.
    pub fn tokenize(&self, unit: &str) -> Vec<QuoteToken> {
        let mut tokens = Vec::new();
        let mut last_end = 0usize;

        for mat in self.quote_block.find_iter(unit) {
            // WHY: tokens must tile the unit without overlap. last_end can sit
            // past the regex match end once trailing punctuation is absorbed, so
            // a match starting before it is already covered.
            if mat.start() < last_end {
                continue;
            }

            if mat.start() > last_end {
                tokens.push(QuoteToken {
                    kind: SpanKind::Plain,
                    start: last_end,
                    end: mat.start(),
                });
            }

            let mut quote_end = mat.end();
            if self.attach_trailing_punctuation {
                quote_end += trailing_punctuation_len(&unit[quote_end..]);
            }

            tokens.push(QuoteToken {
                kind: SpanKind::Quoted,
                start: mat.start(),
                end: quote_end,
            });
            last_end = quote_end;
        }

        if last_end < unit.len() {
            tokens.push(QuoteToken {
                kind: SpanKind::Plain,
                start: last_end,
                end: unit.len(),
            });
        }

        tokens
    }

    /// Tokens covering the non-whitespace content of `unit`.
    ///
    /// Whitespace-only tokens are dropped; the offsets of the remaining tokens
    /// are unaffected.
    pub fn split_quotes(&self, unit: &str) -> Vec<QuoteToken> {
        self.tokenize(unit)
            .into_iter()
            .filter(|token| !token.is_blank(unit))
            .collect()
    }
}

/// Length in bytes of the run of `.` `,` `!` `?` at the start of `rest`
pub fn trailing_punctuation_len(rest: &str) -> usize {
    rest.bytes()
        .take_while(|b| TRAILING_PUNCTUATION.contains(b))
        .count()
}
