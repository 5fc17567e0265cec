// Abbreviations that end in a period but do not end a sentence.

use std::collections::HashSet;

/// Titles that precede a proper noun ("Dr. Smith", "Mr. Johnson")
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Dr.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Jr.", "St.", "Mt.", "Gen.", "Rev.",
];

/// Quote marks stripped before looking a word up
fn is_quote_mark(c: char) -> bool {
    matches!(c, '"' | '\'' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}')
}

/// O(1) lookup for words that suppress a sentence boundary
#[derive(Debug, Clone)]
pub struct AbbreviationChecker {
    titles: HashSet<String>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self::with_titles(TITLE_ABBREVIATIONS.iter().copied())
    }

    pub fn with_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_title_abbreviation(&self, word: &str) -> bool {
        self.titles.contains(word)
    }

    /// Single capital followed by a period, as in "J. R. R. Tolkien" or "S. E. by E."
    pub fn is_initial(word: &str) -> bool {
        let mut chars = word.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(c), Some('.'), None) if c.is_uppercase()
        )
    }

    /// Whether the last word of `text` means its final period is not a boundary
    pub fn suppresses_boundary(&self, text: &str) -> bool {
        match text.split_whitespace().last() {
            Some(last_word) => {
                let word = last_word.trim_start_matches(is_quote_mark);
                self.is_title_abbreviation(word) || Self::is_initial(word)
            }
            None => false,
        }
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_abbreviations() {
        let checker = AbbreviationChecker::new();
        for title in ["Dr.", "Mr.", "Mrs.", "Prof."] {
            assert!(checker.is_title_abbreviation(title), "{title} should be a title");
        }
        assert!(!checker.is_title_abbreviation("Hello"));
        assert!(!checker.is_title_abbreviation("U.S.A."));
    }

    #[test]
    fn test_initials() {
        assert!(AbbreviationChecker::is_initial("J."));
        assert!(AbbreviationChecker::is_initial("E."));
        assert!(!AbbreviationChecker::is_initial("j."));
        assert!(!AbbreviationChecker::is_initial("Jo."));
        assert!(!AbbreviationChecker::is_initial("J"));
    }

    #[test]
    fn test_suppresses_boundary() {
        let checker = AbbreviationChecker::new();
        let cases = [
            ("Call Dr.", true),
            ("He said 'Mr.", true),
            ("Listener, S. E. by E.", true),
            ("This is a sentence.", false),
            ("", false),
        ];
        for (text, expected) in cases {
            assert_eq!(checker.suppresses_boundary(text), expected, "failed for: {text}");
        }
    }

    #[test]
    fn test_custom_titles() {
        let checker = AbbreviationChecker::with_titles(["Capt."]);
        assert!(checker.suppresses_boundary("Ask Capt."));
        assert!(!checker.suppresses_boundary("Ask Dr."));
    }
}
