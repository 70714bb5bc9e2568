//! Top-level assembly of one generated file.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use pygen_core::{FileRules, WriteResult, open_destination};

use crate::{
    Error, Result,
    builder::{Indent, Scope, TextBuffer, Value},
    context::{BlockContext, ClassContext, Function},
};

/// Options shared by every context of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Indentation unit for one nesting level.
    pub indent: Indent,
    /// Comment placed at the very top of the output.
    pub header: Option<String>,
}

impl DocumentOptions {
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

/// One generated Python file.
///
/// The output destination is acquired when the document is created and
/// released exactly once: by [`close`](Document::close), by
/// [`discard`](Document::discard), or when the document is dropped. Later
/// calls to `close` write nothing.
///
/// Dropping writes the document only if every `add_function`/`add_class`
/// call succeeded and the thread is not panicking. Otherwise the partial
/// document is discarded and nothing is written.
///
/// ```
/// use pygen_codegen::{Document, Function, WriteResult};
///
/// let mut doc = Document::from_writer(Vec::new());
/// doc.import("os")?;
/// doc.add_function(Function::new("main"), |body| {
///     body.statement("print(os.getcwd())");
///     Ok(())
/// })?;
///
/// assert_eq!(doc.close()?, WriteResult::Written);
/// assert_eq!(doc.close()?, WriteResult::Skipped);
/// # Ok::<(), pygen_codegen::Error>(())
/// ```
pub struct Document<W: Write = BufWriter<File>> {
    options: DocumentOptions,
    header: Scope,
    globals: Scope,
    classes: Vec<ClassContext>,
    functions: Vec<TextBuffer>,
    writer: Option<W>,
    target: Option<PathBuf>,
    closed: bool,
    /// A builder call failed; drop discards instead of writing.
    poisoned: bool,
}

impl Document {
    /// Open `path` for writing and start an empty document.
    ///
    /// Fails with [`Error::Io`] when the destination cannot be opened.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with(path, &FileRules::default(), DocumentOptions::default())
    }

    /// Open `path` according to `rules`.
    ///
    /// With [`Overwrite::IfMissing`](pygen_core::Overwrite::IfMissing) and an
    /// existing file, the document is still built but nothing is written.
    pub fn create_with(
        path: impl AsRef<Path>,
        rules: &FileRules,
        mut options: DocumentOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let writer = open_destination(path, rules).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if writer.is_none() {
            tracing::debug!(path = %path.display(), "keeping existing file");
        }
        if options.header.is_none() {
            options.header = rules.header.clone();
        }

        let mut doc = Self::build(writer, options);
        doc.target = Some(path.to_path_buf());
        Ok(doc)
    }
}

impl<W: Write> Document<W> {
    /// Render into an arbitrary writer.
    pub fn from_writer(writer: W) -> Self {
        Self::from_writer_with(writer, DocumentOptions::default())
    }

    pub fn from_writer_with(writer: W, options: DocumentOptions) -> Self {
        Self::build(Some(writer), options)
    }

    fn build(writer: Option<W>, options: DocumentOptions) -> Self {
        Self {
            header: Scope::new(options.indent),
            globals: Scope::new(options.indent),
            options,
            classes: Vec::new(),
            functions: Vec::new(),
            writer,
            target: None,
            closed: false,
            poisoned: false,
        }
    }

    /// Destination path, when the document was created from one.
    pub fn path(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of classes added so far.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of functions added so far.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// `import <module>`
    pub fn import(&mut self, module: impl AsRef<str>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.header
            .write_line(&format!("import {}", module.as_ref()));
        Ok(self)
    }

    /// `from <module> import <a>, <b>, ...` in the given order.
    pub fn import_from<I, S>(&mut self, module: impl AsRef<str>, symbols: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_open()?;
        let symbols = symbols
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.header
            .write_line(&format!("from {} import {}", module.as_ref(), symbols));
        Ok(self)
    }

    /// Arbitrary top-level text, verbatim.
    pub fn expression(&mut self, text: impl AsRef<str>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.header.write_line(text.as_ref());
        Ok(self)
    }

    /// Module-level variable: `name: type = expr`.
    pub fn global(&mut self, value: &Value, expr: impl AsRef<str>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.globals
            .write_line(&format!("{} = {}", value.as_target(), expr.as_ref()));
        Ok(self)
    }

    /// Add a top-level function. Nothing is recorded if `body` fails.
    pub fn add_function<F>(&mut self, function: Function, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        self.ensure_open()?;
        let text = function.render(0, self.options.indent, body);
        let text = self.record(text)?;
        self.functions.push(text);
        Ok(self)
    }

    /// Add a top-level class. Nothing is recorded if `body` fails.
    pub fn add_class<F>(
        &mut self,
        name: impl Into<String>,
        doc: impl Into<String>,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut ClassContext) -> Result<()>,
    {
        self.ensure_open()?;
        let mut class = ClassContext::new(name, doc, 0, self.options.indent);
        let built = body(&mut class);
        self.record(built)?;
        tracing::debug!(class = %class.name(), "added class");
        self.classes.push(class);
        Ok(self)
    }

    /// Assemble the full file text.
    ///
    /// Layout: header comment, imports and expressions, a blank line, the
    /// globals, a blank line, then every class and every function, each
    /// followed by a blank line.
    pub fn render(&self) -> Result<String> {
        let mut out = TextBuffer::new();

        if let Some(header) = &self.options.header {
            for line in header.lines() {
                if line.starts_with('#') {
                    out.append(line);
                } else {
                    out.append(&format!("# {line}"));
                }
            }
        }

        out.append_buffer(self.header.buffer()).append_blank();
        out.append_buffer(self.globals.buffer()).append_blank();

        for class in &self.classes {
            out.append_buffer(&class.render()?).append_blank();
        }
        for function in &self.functions {
            out.append_buffer(function).append_blank();
        }

        Ok(out.into_string())
    }

    /// Write the rendered document and release the destination.
    ///
    /// Returns [`WriteResult::Written`] the first time output is written and
    /// [`WriteResult::Skipped`] on every later call, or when an existing file
    /// was kept.
    pub fn close(&mut self) -> Result<WriteResult> {
        if self.closed {
            return Ok(WriteResult::Skipped);
        }
        self.closed = true;

        if self.writer.is_none() {
            return Ok(WriteResult::Skipped);
        }
        let text = self.render()?;
        let Some(writer) = self.writer.as_mut() else {
            return Ok(WriteResult::Skipped);
        };
        writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|source| Error::Write { source })?;

        tracing::debug!(
            path = ?self.target,
            bytes = text.len(),
            classes = self.classes.len(),
            functions = self.functions.len(),
            "wrote document"
        );
        Ok(WriteResult::Written)
    }

    /// Close the document and hand back its writer.
    ///
    /// Returns `None` when no writer was ever opened (an existing file was
    /// kept).
    pub fn into_inner(mut self) -> Result<Option<W>> {
        self.close()?;
        Ok(self.writer.take())
    }

    /// Release the destination without writing anything.
    ///
    /// A file opened by [`Document::create`] has already been truncated;
    /// render into memory first when the previous content must survive a
    /// failed build.
    pub fn discard(mut self) {
        self.closed = true;
        self.writer = None;
        tracing::debug!(path = ?self.target, "discarded document");
    }

    /// Whether a builder call has failed on this document.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::DocumentClosed)
        } else {
            Ok(())
        }
    }
}

impl<W: Write> Drop for Document<W> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if self.poisoned || std::thread::panicking() {
            self.closed = true;
            tracing::warn!(path = ?self.target, "discarding unfinished document");
            return;
        }
        if let Err(err) = self.close() {
            tracing::error!(error = %err, path = ?self.target, "failed to write document on drop");
        }
    }
}
