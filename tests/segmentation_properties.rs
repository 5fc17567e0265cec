// Offset invariants checked over a corpus of awkward inputs
use pagesift::offsets::{char_len, char_slice};
use pagesift::quote_splitter::QuoteSplitter;
use pagesift::{ChunkPolicy, SentenceSplitter, SpanKind};

#[path = "integration/fixtures/mod.rs"]
mod fixtures;
use fixtures::*;

const CORPUS: &[&str] = &[
    SHORT_QUOTED,
    LONG_MIXED,
    "Plain text without any boundary at all",
    "One. Two. Three. One. Two. Three.",
    "He said \"stop.\" now. She said 'go!', then left. “Curly,” he noted. ‘Single’ too.",
    "Unterminated \"quote starts here and never ends. Next sentence.",
    "Mr. Smith met Dr. Jones. They talked.\n\nNew paragraph here. Another.",
    "\"Nested 'inner' quote.\" Outside! \"Again?\" Yes...",
    "문장 하나. 문장 둘! “인용문이다.” 끝?",
    "   Leading and trailing whitespace.   Second.   ",
];

fn policy(threshold: usize) -> ChunkPolicy {
    ChunkPolicy::with_splitter(threshold, true, Box::new(SentenceSplitter::with_default_rules().expect("default rules compile")))
        .expect("default rules compile")
}

#[test]
fn test_fragments_round_trip_and_do_not_overlap() {
    let policy = policy(1);
    for block in CORPUS {
        let expansion = policy.expand("e", block);
        assert_eq!(expansion.degenerate_spans, 0, "unexpected fallback in {block:?}");

        for fragment in &expansion.fragments {
            assert_eq!(
                char_slice(block, fragment.start, fragment.end),
                Some(fragment.text.as_str()),
                "offset mismatch in {block:?}"
            );
            assert!(fragment.end <= char_len(block));
        }
        for pair in expansion.fragments.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }
}

#[test]
fn test_below_threshold_is_whole_block() {
    let policy = policy(10_000);
    for block in CORPUS {
        let expansion = policy.expand("e", block);
        assert_eq!(expansion.fragments.len(), 1);
        let fragment = &expansion.fragments[0];
        assert_eq!((fragment.start, fragment.end), (0, 0));
        assert_eq!(fragment.text, *block);
    }
}

#[test]
fn test_quote_free_text_is_one_plain_span() {
    let splitter = QuoteSplitter::with_default_rules().expect("default rules compile");
    for text in ["Nothing quoted here.", "Ünïcödé without quotes!", "a"] {
        let tokens = splitter.split_quotes(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SpanKind::Plain);
        assert_eq!(tokens[0].text(text), text);
    }
}

#[test]
fn test_quote_tokens_tile_each_unit() {
    let splitter = QuoteSplitter::with_default_rules().expect("default rules compile");
    let sentences = SentenceSplitter::with_default_rules().expect("default rules compile");
    for block in CORPUS {
        for unit in sentences.split(block) {
            let tokens = splitter.tokenize(&unit);
            let rebuilt: String = tokens.iter().map(|t| t.text(&unit)).collect();
            assert_eq!(rebuilt, unit);
        }
    }
}

#[test]
fn test_segmentation_is_deterministic() {
    let policy = policy(1);
    for block in CORPUS {
        assert_eq!(policy.expand("e", block).fragments, policy.expand("e", block).fragments);
    }
}
