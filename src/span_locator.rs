//! Forward-cursor location of splitter units inside their source text.
//!
//! The cursor only ever moves forward, so two byte-identical sentences in one
//! block resolve to two different spans instead of both collapsing onto the
//! first occurrence. This assumes the splitter emits units in document order.

use tracing::debug;

use crate::offsets::BytePos;

/// Absolute byte span of one unit within the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSpan {
    pub start: BytePos,
    pub end: BytePos,
    /// False when the unit was not found verbatim and the span is the
    /// zero-width fallback at the cursor.
    pub located: bool,
}

impl UnitSpan {
    pub fn is_degenerate(&self) -> bool {
        !self.located
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Locate each unit in `original`, in order, without revisiting consumed text.
///
/// Never fails. A unit that cannot be found at or after the cursor (for
/// instance because the splitter normalized its whitespace) becomes a
/// zero-width span at the current cursor and the cursor stays put, so the
/// remaining units keep their synchronization.
pub fn locate<S: AsRef<str>>(original: &str, units: &[S]) -> Vec<UnitSpan> {
    let mut cursor = 0usize;
    let mut spans = Vec::with_capacity(units.len());

    for unit in units {
        let unit = unit.as_ref();

        match original[cursor..].find(unit) {
            Some(offset) => {
                let start = cursor + offset;
                let end = start + unit.len();
                spans.push(UnitSpan {
                    start: BytePos::new(start),
                    end: BytePos::new(end),
                    located: true,
                });
                cursor = end;
            }
            None => {
                // WHY: the cursor stays put so the next unit is searched from the
                // same position; advancing here would skip text a later unit owns.
                debug!(cursor, unit_len = unit.len(), "Unit not found verbatim, using zero-width fallback");
                spans.push(UnitSpan {
                    start: BytePos::new(cursor),
                    end: BytePos::new(cursor),
                    located: false,
                });
            }
        }
    }

    spans
}
