// Type-safe position wrappers to prevent byte/char confusion.
// Segmentation slices on UTF-8 byte offsets; everything reported to callers
// is counted in Unicode scalar values.

/// 0-based byte position in source text
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct BytePos(pub usize);

/// 0-based character position in source text
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct CharPos(pub usize);

impl BytePos {
    pub fn new(pos: usize) -> Self {
        BytePos(pos)
    }

    pub fn advance(&self, offset: usize) -> Self {
        BytePos(self.0 + offset)
    }
}

impl CharPos {
    pub fn new(pos: usize) -> Self {
        CharPos(pos)
    }
}

/// Incremental byte -> char conversion over one text.
///
/// Spans produced by the segmenter arrive in ascending order, so a single
/// forward pass converts all of them in O(N) instead of rescanning the prefix
/// for every span.
#[derive(Debug)]
pub struct CharTracker<'a> {
    text: &'a str,
    current_byte_pos: usize,
    current_char_pos: usize,
}

impl<'a> CharTracker<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            current_byte_pos: 0,
            current_char_pos: 0,
        }
    }

    /// Advance to `target`, returning its char position.
    ///
    /// Seeking backwards restarts from the beginning of the text, which keeps
    /// the conversion correct for the rare out-of-order caller at the cost of
    /// a rescan.
    pub fn advance_to_byte(&mut self, target: BytePos) -> CharPos {
        let target = target.0.min(self.text.len());

        if target < self.current_byte_pos {
            self.current_byte_pos = 0;
            self.current_char_pos = 0;
        }

        let bytes = self.text.as_bytes();
        while self.current_byte_pos < target {
            // Count only ASCII (0xxxxxxx) and multi-byte lead bytes (11xxxxxx);
            // continuation bytes (10xxxxxx) belong to the previous char.
            if (bytes[self.current_byte_pos] & 0xC0) != 0x80 {
                self.current_char_pos += 1;
            }
            self.current_byte_pos += 1;
        }

        CharPos::new(self.current_char_pos)
    }
}

/// Number of Unicode scalar values in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` by char offsets `[start, end)`.
///
/// Returns `None` when the range is inverted or runs past the end of the text.
pub fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }

    let mut boundaries = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()));

    let start_byte = boundaries.nth(start)?;
    let end_byte = if end == start {
        start_byte
    } else {
        boundaries.nth(end - start - 1)?
    };

    Some(&text[start_byte..end_byte])
}
