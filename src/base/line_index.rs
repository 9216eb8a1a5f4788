//! Byte offset to line/column conversion.

use text_size::TextSize;

use super::position::Position;

/// Maps byte offsets of a source text to [`Position`]s.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line, as in the Java
/// language specification (JLS §3.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line.
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(TextSize::new((i + 1) as u32)),
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push(TextSize::new((i + 1) as u32));
                }
                _ => {}
            }
            i += 1;
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Position of `offset`. Offsets past the end clamp to the end of text.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = offset - self.line_starts[line];
        Position::new(line as u32 + 1, u32::from(column))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
