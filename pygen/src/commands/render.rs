use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use pygen_codegen::Overwrite;
use pygen_plan::PlanFile;

use super::UnwrapOrExit;
use crate::reports::{RenderOutcome, RenderReport, Report, TerminalOutput};

#[derive(Args)]
pub struct RenderCommand {
    /// Path to the plan (.toml, or .json)
    pub plan: PathBuf,

    /// Output file (defaults to the plan path with a .py extension)
    #[arg(short, long, conflicts_with = "dry_run")]
    pub output: Option<PathBuf>,

    /// Print the generated code instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the output file if it already exists
    #[arg(long)]
    pub no_clobber: bool,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let plan_file = PlanFile::open(&self.plan).unwrap_or_exit();
        let plan = plan_file.plan();

        let outcome = if self.dry_run {
            RenderOutcome::Preview {
                content: plan.render().wrap_err("Failed to lower plan")?,
            }
        } else {
            let path = self
                .output
                .clone()
                .unwrap_or_else(|| plan_file.default_output());
            let mut rules = plan.document.rules();
            if self.no_clobber {
                rules.overwrite = Overwrite::IfMissing;
            }

            let result = plan
                .write_to(&path, &rules)
                .wrap_err_with(|| format!("Failed to render {}", path.display()))?;
            tracing::info!(path = %path.display(), ?result, "rendered plan");
            RenderOutcome::Written { path, result }
        };

        let report = RenderReport {
            source: Some(self.plan.clone()),
            classes: plan.classes.len(),
            functions: plan.functions.len(),
            outcome,
        };
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
