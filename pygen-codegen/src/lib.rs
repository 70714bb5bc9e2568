//! Indentation-aware Python code emission.
//!
//! A [`Document`] is built by composing structured calls: imports, globals,
//! classes, functions and the statements inside them. Every nested scope is
//! opened by a callback that receives a context one level deeper; when the
//! callback returns, the text it produced is spliced into its parent.
//!
//! # Module Organization
//!
//! - [`builder`] - Emission primitives ([`Indent`], [`TextBuffer`], [`Scope`], [`Value`])
//! - [`context`] - Body, conditional, function and class contexts
//! - [`document`] - Top-level assembly and output
//!
//! # Example
//!
//! ```
//! use pygen_codegen::{Document, Function, Value};
//!
//! let mut doc = Document::from_writer(Vec::new());
//! doc.import_from("typing", ["List"])?;
//! doc.add_function(
//!     Function::new("add")
//!         .param(Value::new("a", "int"))
//!         .param(Value::new("b", "int"))
//!         .returns(Value::new("s", "int")),
//!     |body| {
//!         body.statement("s = a + b");
//!         Ok(())
//!     },
//! )?;
//!
//! let text = doc.render()?;
//! assert!(text.contains("def add(a:int, b:int) -> int:\n    s = a + b\n    return s\n"));
//! # Ok::<(), pygen_codegen::Error>(())
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
pub mod context;
pub mod document;
mod error;

pub use builder::{Context, Indent, Scope, TextBuffer, Value, interpolate};
pub use context::{BlockContext, ClassContext, ConditionalChain, Function};
pub use document::{Document, DocumentOptions};
pub use error::{Error, Result};
pub use pygen_core::{FileRules, Overwrite, WriteResult, write_destination};
