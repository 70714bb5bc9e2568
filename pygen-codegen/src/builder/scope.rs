//! Depth-bound buffers and the line-emitting capability.

use std::fmt::Display;

use super::{Indent, TextBuffer, interpolate};
use crate::Result;

/// A buffer bound to one nesting depth.
///
/// The depth never changes after construction; deeper code is written into a
/// [`child`](Scope::child) scope and spliced back with [`splice`](Scope::splice).
///
/// ```
/// use pygen_codegen::{Indent, Scope};
///
/// let mut scope = Scope::new(Indent::PYTHON);
/// scope.write_line("while True:");
/// let mut body = scope.child();
/// body.write_line("break");
/// scope.splice(body);
/// assert_eq!(scope.buffer().as_str(), "while True:\n    break\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    depth: usize,
    indent: Indent,
    buffer: TextBuffer,
}

impl Scope {
    /// Create a scope at depth zero.
    pub fn new(indent: Indent) -> Self {
        Self::at(0, indent)
    }

    /// Create an empty scope at `depth`.
    pub fn at(depth: usize, indent: Indent) -> Self {
        Self {
            depth,
            indent,
            buffer: TextBuffer::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn indent(&self) -> Indent {
        self.indent
    }

    /// A fresh, empty scope one level deeper.
    pub fn child(&self) -> Self {
        Self::at(self.depth + 1, self.indent)
    }

    /// Write `text` at this depth.
    ///
    /// Text containing line breaks is split, and every physical line gets
    /// the indentation prefix. Blank lines carry no trailing whitespace.
    pub fn write_line(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            self.buffer.append_blank();
            return self;
        }

        let prefix = self.indent.prefix(self.depth);
        for line in text.lines() {
            if line.trim().is_empty() {
                self.buffer.append_blank();
            } else {
                self.buffer.append(&format!("{prefix}{line}"));
            }
        }
        self
    }

    /// Interpolate `args` into `template` and write the result.
    pub fn write_fmt_line(&mut self, template: &str, args: &[&dyn Display]) -> Result<&mut Self> {
        let line = interpolate(template, args)?;
        Ok(self.write_line(&line))
    }

    /// Write an empty line.
    pub fn blank_line(&mut self) -> &mut Self {
        self.buffer.append_blank();
        self
    }

    /// Append a finished child scope's text after everything written so far.
    pub fn splice(&mut self, child: Scope) -> &mut Self {
        self.buffer.append_buffer(&child.buffer);
        self
    }

    /// Append already-rendered text verbatim.
    pub fn append_buffer(&mut self, text: &TextBuffer) -> &mut Self {
        self.buffer.append_buffer(text);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> TextBuffer {
        self.buffer
    }
}

/// Anything that emits lines at its own nesting depth.
pub trait Context {
    fn scope(&self) -> &Scope;

    fn scope_mut(&mut self) -> &mut Scope;

    /// Nesting depth of lines written through this context.
    fn depth(&self) -> usize {
        self.scope().depth()
    }

    /// Emit `text` at the current depth.
    fn line(&mut self, text: impl AsRef<str>) -> &mut Self
    where
        Self: Sized,
    {
        self.scope_mut().write_line(text.as_ref());
        self
    }

    /// Emit a formatted line at the current depth.
    fn line_fmt(&mut self, template: &str, args: &[&dyn Display]) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.scope_mut().write_fmt_line(template, args)?;
        Ok(self)
    }
}

impl Context for Scope {
    fn scope(&self) -> &Scope {
        self
    }

    fn scope_mut(&mut self) -> &mut Scope {
        self
    }
}
