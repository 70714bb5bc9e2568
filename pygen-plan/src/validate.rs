//! Validation utilities for Python identifiers in plan files

use miette::SourceSpan;
use pygen_core::{is_python_keyword, validate_identifier};

use crate::{Error, Result};

/// Parsing and validation context that carries source information.
///
/// Carries the raw plan source, its filename and the path of the item being
/// validated, so nested checks can point back into the file.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "plan.toml");
/// ctx.validate_name("add", "function")?;
///
/// let nested = ctx.push("Dev").push("rename");
/// nested.validate_name("new_name", "parameter")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
    /// Path segments for nested validation (e.g., ["Dev", "rename"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self {
            src,
            filename,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            src: self.src,
            filename: self.filename,
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "parameter in 'Dev.rename'" or just "function" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.src, name)
    }

    /// Validate that a name is a usable Python identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_python_keyword(name) {
            return Err(Error::reserved_keyword(
                name,
                self.context_for(kind),
                self.src,
                self.filename,
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(Error::invalid_identifier(
                name,
                self.context_for(kind),
                reason,
                self.src,
                self.filename,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Create a validation error pointing at `name`.
    pub fn error(&self, message: impl Into<String>, name: &str) -> Box<Error> {
        Error::validation(message, self.src, self.filename, self.find_span(name))
    }

    /// Create a validation error pointing at the key `key`.
    pub fn key_error(&self, message: impl Into<String>, key: &str) -> Box<Error> {
        Error::validation(message, self.src, self.filename, find_key_span(self.src, key))
    }
}

/// Find the span of a bare (TOML) or quoted (JSON) key that is followed by
/// its separator.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{key}\"");
    src.match_indices(key)
        .find(|&(pos, _)| {
            let before = src[..pos].trim_end_matches([' ', '\t']);
            let starts_line = before.is_empty() || before.ends_with('\n');
            starts_line && src[pos + key.len()..].trim_start().starts_with('=')
        })
        .map(|(pos, _)| SourceSpan::from((pos, key.len())))
        .or_else(|| {
            src.match_indices(quoted.as_str())
                .find(|&(pos, _)| src[pos + quoted.len()..].trim_start().starts_with(':'))
                .map(|(pos, _)| SourceSpan::from((pos + 1, key.len())))
        })
}

/// Find the span of a quoted name in the plan source.
///
/// Prefers `name = "<name>"` (TOML) and `"name": "<name>"` (JSON) entries,
/// then falls back to any quoted occurrence.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    let quoted = format!("\"{name}\"");
    let patterns = [
        format!("name = {quoted}"),
        format!("name={quoted}"),
        format!("\"name\": {quoted}"),
        format!("\"name\":{quoted}"),
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            // skip everything up to and including the opening quote
            let start = pos + pattern.len() - quoted.len() + 1;
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    src.find(quoted.as_str())
        .map(|pos| SourceSpan::from((pos + 1, name.len())))
}
