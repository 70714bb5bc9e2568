use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Result type for code emission.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised from inside a builder callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to open '{path}' for writing")]
    #[diagnostic(code(pygen::io), help("check that the directory is writable"))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write generated output")]
    #[diagnostic(code(pygen::write))]
    Write {
        #[source]
        source: io::Error,
    },

    #[error("format string '{template}' has {placeholders} placeholder(s) but {args} argument(s)")]
    #[diagnostic(
        code(pygen::format_arity),
        help("pass exactly one argument per placeholder")
    )]
    FormatArity {
        template: String,
        placeholders: usize,
        args: usize,
    },

    #[error("malformed format string '{template}': {reason} at byte {position}")]
    #[diagnostic(
        code(pygen::format_syntax),
        help("literal braces are written doubled")
    )]
    FormatSyntax {
        template: String,
        position: usize,
        reason: &'static str,
    },

    #[error("duplicate field '{field}' in class '{class}'")]
    #[diagnostic(code(pygen::duplicate_field))]
    DuplicateField { class: String, field: String },

    #[error("duplicate parameter '{name}' in function '{function}'")]
    #[diagnostic(code(pygen::duplicate_parameter))]
    DuplicateParameter { function: String, name: String },

    #[error("document output has already been written")]
    #[diagnostic(
        code(pygen::document_closed),
        help("add every import, class and function before closing the document")
    )]
    DocumentClosed,

    #[error(transparent)]
    #[diagnostic(code(pygen::callback))]
    Callback(#[from] CallbackError),
}

impl Error {
    /// Wrap an error raised by a builder callback.
    ///
    /// ```
    /// use pygen_codegen::Error;
    ///
    /// let err = Error::callback("no such column");
    /// assert_eq!(err.to_string(), "no such column");
    /// ```
    pub fn callback(err: impl Into<CallbackError>) -> Self {
        Self::Callback(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::DuplicateField {
            class: "Dev".into(),
            field: "name".into(),
        };
        assert_eq!(err.to_string(), "duplicate field 'name' in class 'Dev'");

        let err = Error::FormatArity {
            template: "{} = {}".into(),
            placeholders: 2,
            args: 1,
        };
        assert_eq!(
            err.to_string(),
            "format string '{} = {}' has 2 placeholder(s) but 1 argument(s)"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::DocumentClosed;
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("pygen::document_closed"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::Io {
            path: PathBuf::from("/nope/out.py"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nope/out.py"));
        assert!(err.source().is_some());
    }
}
