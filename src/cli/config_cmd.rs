use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Subcommand};
use serde_json::Value;

use crate::cli::output;
use crate::config;
use crate::config::schema::StatuslineConfig;
use crate::config::tree::{get_path, set_path};

/// Arguments for the `cc-statusline config` subcommand.
#[derive(ClapArgs)]
pub struct Args {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the value at a dot-path (e.g. git.showBranch)
    Get {
        /// Dot-path into the configuration tree
        path: String,
    },

    /// Set the value at a dot-path and save
    Set {
        /// Dot-path into the configuration tree
        path: String,
        /// New value, parsed as JSON (bare words become strings)
        value: String,
    },

    /// Print the effective configuration as JSON
    Show,

    /// Print the configuration file location
    Path,

    /// Restore the default configuration
    Reset,

    /// Import a configuration file (validated before adoption)
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Export the effective configuration to a file
    Export {
        /// Destination file
        file: PathBuf,
    },
}

pub fn run(args: Args) -> Result<()> {
    let config_file = config::config_path()?;

    match args.command {
        ConfigCommand::Get { path } => {
            let tree = config::load_value(&config_file);
            match get_path(&tree, &path) {
                Some(value) => println!("{value}"),
                None => anyhow::bail!("no value at `{path}`"),
            }
        }

        ConfigCommand::Set { path, value } => {
            // Bare words (red, basename, ...) are taken as strings so the
            // common case needs no shell quoting.
            let parsed: Value =
                serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value.clone()));

            let tree = config::load_value(&config_file);
            let updated = set_path(&tree, &path, parsed);

            config::check(&updated)?;
            serde_json::from_value::<StatuslineConfig>(updated.clone())
                .with_context(|| format!("invalid value for `{path}`"))?;

            if get_path(&StatuslineConfig::default_value(), &path).is_none() {
                output::warning(&format!(
                    "`{path}` is not a known option; saving it for forward compatibility"
                ));
            }

            config::save_value(&config_file, &updated)?;
            output::success(&format!("set {path}"));
        }

        ConfigCommand::Show => {
            let tree = config::load_value(&config_file);
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }

        ConfigCommand::Path => {
            println!("{}", config_file.display());
        }

        ConfigCommand::Reset => {
            config::save(&config_file, &StatuslineConfig::default())?;
            output::success("configuration reset to defaults");
        }

        ConfigCommand::Import { file } => {
            let imported = config::import(&file)
                .with_context(|| format!("failed to import {}", file.display()))?;
            config::save(&config_file, &imported)?;
            output::success(&format!("imported {}", file.display()));
        }

        ConfigCommand::Export { file } => {
            let tree = config::load_value(&config_file);
            config::save_value(&file, &tree)?;
            output::success(&format!("exported to {}", file.display()));
        }
    }

    Ok(())
}
