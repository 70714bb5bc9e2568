mod check;
mod completions;
mod demo;
mod render;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use demo::DemoCommand;
use eyre::Result;
use render::RenderCommand;

/// Extension trait for exiting on plan errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for pygen_plan::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "pygen")]
#[command(version)]
#[command(about = "Generate Python source files from TOML or JSON plans")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Demo(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a plan into a Python file
    Render(RenderCommand),

    /// Validate a plan without writing anything
    Check(CheckCommand),

    /// Render the built-in demo module
    Demo(DemoCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::try_parse_from([
            "pygen",
            "render",
            "module.toml",
            "-o",
            "out.py",
            "--no-clobber",
        ])
        .unwrap();
        match cli.command {
            Commands::Render(cmd) => {
                assert_eq!(cmd.plan.to_str(), Some("module.toml"));
                assert_eq!(cmd.output.as_deref().and_then(|p| p.to_str()), Some("out.py"));
                assert!(cmd.no_clobber);
                assert!(!cmd.dry_run);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_dry_run_conflicts_with_output() {
        let result = Cli::try_parse_from(["pygen", "demo", "--dry-run", "-o", "demo.py"]);
        assert!(result.is_err());
    }
}
