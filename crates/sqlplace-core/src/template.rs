//! Live template buffer with a forward-only scan cursor.

use crate::scanner::{self, Marker};

/// The template being rewritten during one binding call.
///
/// The cursor never moves backward. After [`Template::splice`] it sits right
/// after the inserted text, so replacement text is never scanned for markers.
#[derive(Debug, Clone)]
pub struct Template {
    buf: String,
    cursor: usize,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            buf: text.into(),
            cursor: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advance the cursor to the next placeholder marker, if any.
    pub fn next_placeholder(&mut self) -> Option<Marker> {
        let marker = scanner::next_placeholder(&self.buf, self.cursor)?;
        self.cursor = marker.offset;
        Some(marker)
    }

    /// Replace `start..end` with `replacement` and move the cursor past it.
    pub fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        debug_assert!(start >= self.cursor, "cursor must not move backward");
        self.buf.replace_range(start..end, replacement);
        self.cursor = start + replacement.len();
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
