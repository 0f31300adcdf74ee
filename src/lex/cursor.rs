//! A cursor walking the source line by line.

use std::ops::Range;

const BYTE_ORDER_MARK: char = '\u{feff}';

pub struct Cursor<'a> {
    /// The line position, starts with 1.
    line: usize,
    /// The byte index of the next line.
    index: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let index = if source.starts_with(BYTE_ORDER_MARK) {
            BYTE_ORDER_MARK.len_utf8()
        } else {
            0
        };
        Self {
            line: 1,
            index,
            source,
        }
    }

    pub const fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }

    /// The line number of the next line, starts with 1.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Determines the end of the current line.
    ///
    /// Returns `(remaining_end, line_end_index)`: the byte offset from `index` to the first `\n`
    /// (or to the end of the source), and the absolute index where the line content ends. A `\r`
    /// right before the `\n` is excluded from the content.
    fn current_line_bounds(&self) -> (usize, usize) {
        let rest = &self.source[self.index..];
        let remaining_end = rest.find('\n').unwrap_or(rest.len());
        let content = &rest[..remaining_end];
        let content_len = content.strip_suffix('\r').map_or(content.len(), str::len);
        (remaining_end, self.index + content_len)
    }

    /// Moves the cursor through the next line and returns it with its range.
    pub fn next_line(&mut self) -> Option<(Range<usize>, &'a str)> {
        if self.is_end() {
            return None;
        }
        let (remaining_end, line_end_index) = self.current_line_bounds();
        let range = self.index..line_end_index;
        let line = &self.source[range.clone()];
        self.index = (self.index + remaining_end + 1).min(self.source.len());
        self.line += 1;
        Some((range, line))
    }
}
