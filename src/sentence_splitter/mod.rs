//! Rule-based sentence splitter used as the default unit splitter.
//!
//! A boundary is end punctuation, optionally followed by closing quotes or
//! brackets, then whitespace, then something that can start a sentence.
//! Blank lines are hard separators. Units come back trimmed, the way external
//! sentence splitters usually return them, so callers must not assume they are
//! byte-exact slices of the input.

use anyhow::Result;
use regex_automata::{meta::Regex, Input};
use tracing::debug;

pub mod abbreviations;

pub use abbreviations::AbbreviationChecker;

use crate::segmenter::UnitSplitter;

/// Configuration for sentence boundary detection rules
#[derive(Debug, Clone)]
pub struct SentenceBoundaryRules {
    /// End punctuation characters that can terminate a sentence
    pub end_punctuation: Vec<char>,
    /// Closing marks that may sit between end punctuation and the separator
    pub closing_punctuation: Vec<char>,
    /// Characters considered opening quotes
    pub opening_quotes: Vec<char>,
    /// Characters considered opening parentheticals
    pub opening_parentheticals: Vec<char>,
    /// Only split before an uppercase letter, opening quote or bracket.
    /// When false, anything but a lowercase letter may start a sentence,
    /// which is what scripts without letter case need.
    pub require_capital_start: bool,
}

impl Default for SentenceBoundaryRules {
    fn default() -> Self {
        Self {
            end_punctuation: vec!['.', '?', '!', '\u{2026}'],
            closing_punctuation: vec!['"', '\'', '\u{201D}', '\u{2019}', ')', ']'],
            opening_quotes: vec!['"', '\'', '\u{201C}', '\u{2018}'],
            opening_parentheticals: vec!['(', '[', '{'],
            require_capital_start: false,
        }
    }
}

impl SentenceBoundaryRules {
    /// Boundary-or-separator pattern for these rules.
    ///
    /// A boundary match runs from the first end mark through the first char of
    /// the next sentence. A separator match starts at a newline and ends after
    /// the whitespace of the blank line.
    fn boundary_pattern(&self) -> String {
        let end = char_class(&self.end_punctuation);
        let closing = char_class(&self.closing_punctuation);
        // WHY: the regex engine has no lookahead, so the sentence start char is
        // part of the match and the scan resumes on it
        let start = if self.require_capital_start {
            let openers: Vec<char> = self
                .opening_quotes
                .iter()
                .chain(&self.opening_parentheticals)
                .copied()
                .collect();
            format!("[\\p{{Lu}}{}]", class_body(&openers))
        } else {
            r"[^\p{Ll}\s]".to_string()
        };

        let sentence_end = format!("{end}+{closing}*\\s+{start}");
        let hard_sep = r"\n[^\S\n]*\n\s*";
        format!("(?:{sentence_end})|(?:{hard_sep})")
    }
}

/// Character class matching exactly `chars`, with every member hex-escaped
fn char_class(chars: &[char]) -> String {
    if chars.is_empty() {
        // Empty class: matches nothing
        return r"[^\s\S]".to_string();
    }
    format!("[{}]", class_body(chars))
}

fn class_body(chars: &[char]) -> String {
    chars.iter().map(|&c| format!("\\x{{{:X}}}", c as u32)).collect()
}

/// Sentence splitter with configurable boundary rules
#[derive(Debug)]
pub struct SentenceSplitter {
    rules: SentenceBoundaryRules,
    boundary: Regex,
    abbreviations: AbbreviationChecker,
}

impl SentenceSplitter {
    pub fn new(rules: SentenceBoundaryRules) -> Result<Self> {
        let pattern = rules.boundary_pattern();
        let boundary = Regex::new(&pattern)?;
        debug!("Compiled sentence boundary pattern: {}", pattern);

        Ok(Self {
            rules,
            boundary,
            abbreviations: AbbreviationChecker::new(),
        })
    }

    pub fn with_default_rules() -> Result<Self> {
        Self::new(SentenceBoundaryRules::default())
    }

    /// Split `text` into trimmed sentences, in document order
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut sentence_start = 0;
        let mut search_from = 0;

        while let Some(mat) = self.boundary.search(&Input::new(text).range(search_from..)) {
            let matched = &text[mat.range()];

            if matched.starts_with('\n') {
                push_trimmed(&mut sentences, &text[sentence_start..mat.start()]);
                sentence_start = mat.end();
                search_from = mat.end();
                continue;
            }

            // Sentence text ends where the whitespace of the match begins
            let end = mat.start() + matched.find(char::is_whitespace).unwrap_or(matched.len());
            let next_start = mat.end() - matched.chars().next_back().map_or(0, char::len_utf8);

            // WHY: an end mark at offset 0 has no sentence in front of it to end
            if mat.start() > 0 {
                let candidate = &text[sentence_start..end];
                if !self.abbreviations.suppresses_boundary(candidate) {
                    push_trimmed(&mut sentences, candidate);
                    sentence_start = end;
                }
            }
            search_from = next_start;
        }

        if sentence_start < text.len() {
            push_trimmed(&mut sentences, &text[sentence_start..]);
        }

        debug!(
            "Split {} chars into {} sentences (capital start required: {})",
            text.len(),
            sentences.len(),
            self.rules.require_capital_start
        );
        sentences
    }
}

impl UnitSplitter for SentenceSplitter {
    fn split_units(&self, text: &str) -> Vec<String> {
        self.split(text)
    }
}

fn push_trimmed(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
