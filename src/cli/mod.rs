pub mod config_cmd;
pub mod output;
pub mod preview;
pub mod render;

use clap::{Parser, Subcommand};

/// Claude Code status line renderer
#[derive(Parser)]
#[command(name = "cc-statusline", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Render flags also apply when no subcommand is given.
    #[command(flatten)]
    pub render: render::Args,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the status line from a stdin snapshot (the default)
    Render(render::Args),

    /// Inspect and edit the configuration
    Config(config_cmd::Args),

    /// Preview progress bars at every length and color mode
    Preview(preview::Args),
}
