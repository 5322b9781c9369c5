//! Line/column positions for diagnostic rendering.
//!
//! Offsets inside the compiler are byte offsets; only the presentation layer
//! (the CLI) converts them to zero-based line/column pairs with a `LineMap`.

use serde::Serialize;

/// A zero-based line/column position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Precomputed line start offsets for a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map, treating `\n` as the line terminator (`\r\n` works
    /// because the `\r` stays on the previous line).
    #[must_use]
    pub fn build(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        for offset in memchr::memchr_iter(b'\n', text.as_bytes()) {
            line_starts.push(offset as u32 + 1);
        }
        Self { line_starts }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a line/column position.
    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line as u32, offset - self.line_starts[line])
    }

    /// Byte offset of the first character of `line`, if the line exists.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// The text of `line` without its terminator.
    #[must_use]
    pub fn line_text<'a>(&self, text: &'a str, line: u32) -> &'a str {
        let Some(start) = self.line_start(line) else {
            return "";
        };
        let end = self
            .line_start(line + 1)
            .map_or(text.len(), |next| next as usize - 1);
        text.get(start as usize..end)
            .unwrap_or("")
            .trim_end_matches('\r')
    }
}

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod tests;
