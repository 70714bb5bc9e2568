//! Append-only text storage.

use std::fmt;

/// Rendered lines for one logical output unit.
///
/// Content only ever grows: there is no way to remove text once appended.
///
/// ```
/// use pygen_codegen::TextBuffer;
///
/// let mut buffer = TextBuffer::new();
/// buffer.append("import os").append_blank();
/// assert_eq!(buffer.as_str(), "import os\n\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    lines: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` followed by a line terminator.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.content.push_str(text);
        self.content.push('\n');
        self.lines += 1;
        self
    }

    /// Append an empty line.
    pub fn append_blank(&mut self) -> &mut Self {
        self.append("")
    }

    /// Append the full content of another buffer.
    pub fn append_buffer(&mut self, other: &TextBuffer) -> &mut Self {
        self.content.push_str(&other.content);
        self.lines += other.lines;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of lines appended so far.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Return the accumulated content verbatim.
    pub fn render(&self) -> String {
        self.content.clone()
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
