use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use pygen_codegen::Document;
use pygen_plan::PlanFile;

use super::UnwrapOrExit;
use crate::reports::{CheckReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the plan (.toml, or .json)
    pub plan: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let plan_file = PlanFile::open(&self.plan).unwrap_or_exit();
        let plan = plan_file.plan();

        // Lower into a scratch document so emission errors surface too
        let mut doc = Document::from_writer_with(Vec::new(), plan.document.options());
        plan.apply(&mut doc).wrap_err("Plan does not lower")?;
        doc.render().wrap_err("Plan does not render")?;

        CheckReport::new(self.plan.clone(), plan).render(&mut TerminalOutput::new());
        Ok(())
    }
}
