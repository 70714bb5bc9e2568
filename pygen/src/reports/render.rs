//! Render and demo command report data structures.

use std::path::PathBuf;

use pygen_codegen::WriteResult;

use super::output::{Output, Report};

/// Report data from rendering one document.
#[derive(Debug)]
pub struct RenderReport {
    /// Plan the document came from (`None` for the built-in demo).
    pub source: Option<PathBuf>,
    pub classes: usize,
    pub functions: usize,
    pub outcome: RenderOutcome,
}

/// What happened to the rendered text.
#[derive(Debug)]
pub enum RenderOutcome {
    /// Written to (or kept at) a destination file.
    Written { path: PathBuf, result: WriteResult },
    /// Dry-run preview.
    Preview { content: String },
}

impl Report for RenderReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.outcome {
            RenderOutcome::Written {
                path,
                result: WriteResult::Written,
            } => {
                out.success(&format!("Generated {}", path.display()));
                if let Some(source) = &self.source {
                    out.key_value("  from", &source.display().to_string());
                }
                out.key_value("  contents", &self.summary());
            }
            RenderOutcome::Written {
                path,
                result: WriteResult::Skipped,
            } => {
                out.warning(&format!(
                    "{} already exists, left unchanged",
                    path.display()
                ));
            }
            RenderOutcome::Preview { content } => {
                let label = self
                    .source
                    .as_ref()
                    .map_or_else(|| "demo".to_string(), |p| p.display().to_string());
                out.divider(&label);
                out.preformatted(content.trim_end());
                out.divider("Summary");
                out.preformatted(&self.summary());
            }
        }
    }
}

impl RenderReport {
    fn summary(&self) -> String {
        format!(
            "{} class{}, {} function{}",
            self.classes,
            if self.classes == 1 { "" } else { "es" },
            self.functions,
            if self.functions == 1 { "" } else { "s" }
        )
    }
}
