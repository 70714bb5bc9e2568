//! Report data structures for commands.
//!
//! Commands collect what happened into a report, then render it to an
//! `Output` target.

mod check;
mod output;
mod render;

pub use check::CheckReport;
pub use output::{Report, TerminalOutput};
pub use render::{RenderOutcome, RenderReport};

#[cfg(test)]
pub(crate) use output::RecordingOutput;
