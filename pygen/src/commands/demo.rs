use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use pygen_codegen::{Document, FileRules, write_destination};

use crate::{
    demo,
    reports::{RenderOutcome, RenderReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct DemoCommand {
    /// Output file
    #[arg(short, long, default_value = "demo.py", conflicts_with = "dry_run")]
    pub output: PathBuf,

    /// Print the generated code instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl DemoCommand {
    /// Run the demo command
    pub fn run(&self) -> Result<()> {
        // The output file is opened only after the module renders.
        let mut doc = Document::from_writer(Vec::new());
        demo::build(&mut doc).wrap_err("Failed to build demo module")?;
        let content = doc.render().wrap_err("Failed to render demo module")?;
        let (classes, functions) = (doc.class_count(), doc.function_count());
        doc.discard();

        let outcome = if self.dry_run {
            RenderOutcome::Preview { content }
        } else {
            let result = write_destination(&self.output, &FileRules::default(), content.as_bytes())
                .wrap_err_with(|| format!("Failed to write {}", self.output.display()))?;
            RenderOutcome::Written {
                path: self.output.clone(),
                result,
            }
        };

        let report = RenderReport {
            source: None,
            classes,
            functions,
            outcome,
        };

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
