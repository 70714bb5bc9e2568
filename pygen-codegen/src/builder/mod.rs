//! Code emission building blocks.
//!
//! This module provides the primitives every context is built from:
//! - [`Indent`] - Indentation unit for one nesting level
//! - [`TextBuffer`] - Append-only rendered text
//! - [`Scope`] - A buffer bound to a fixed nesting depth
//! - [`Context`] - Trait for anything that can emit indented lines
//! - [`Value`] - Named, typed parameter/return/field slots
//! - [`interpolate`] - Runtime `{}` template substitution

mod buffer;
mod indent;
mod scope;
mod template;
mod value;

pub use buffer::TextBuffer;
pub use indent::Indent;
pub use scope::{Context, Scope};
pub use template::interpolate;
pub use value::Value;
