mod cli;
mod config;
mod context;
mod error;
mod git;
mod render;
mod usage;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    // Diagnostics go to stderr only; stdout belongs to the rendered line.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Render(args)) => cli::render::run(args),
        Some(Command::Config(args)) => cli::config_cmd::run(args),
        Some(Command::Preview(args)) => cli::preview::run(args),
        None => cli::render::run(cli.render),
    }
}
