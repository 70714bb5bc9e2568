mod commands;
mod demo;
mod reports;
mod tracing_config;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_config::init_tracing();

    Cli::parse().run()
}
