use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use serde::Deserialize;

use crate::config;
use crate::config::schema::StatuslineConfig;
use crate::context;
use crate::git;
use crate::render::compose::{build_first_line, build_second_line, compose};
use crate::render::format::{format_branch, format_path};
use crate::render::palette::{strip_ansi, GRAY, LIGHT_GRAY, RED, RESET};
use crate::usage;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Snapshot piped by Claude Code on each statusline tick. Fields the host
/// may omit are optional; unknown fields are dropped by serde, so newer
/// hosts never break deserialization.
#[derive(Debug, Deserialize, Default)]
pub struct HookInput {
    pub transcript_path: Option<String>,
    pub cwd: Option<String>,
    #[serde(default)]
    pub model: ModelInfo,
    #[serde(default)]
    pub workspace: WorkspaceInfo,
}

#[derive(Debug, Deserialize, Default)]
pub struct ModelInfo {
    #[allow(dead_code)] // Deserialized for forward-compatibility; not rendered.
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WorkspaceInfo {
    pub current_dir: Option<String>,
    #[allow(dead_code)] // Deserialized for forward-compatibility; not rendered.
    pub project_dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Clap Args
// ---------------------------------------------------------------------------

/// Arguments for the default `render` subcommand.
#[derive(ClapArgs, Default)]
pub struct Args {
    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Entry point. Wraps `run_inner` in `catch_unwind`: whatever goes wrong,
/// the host gets a printable line and exit code 0 -- a crashed statusline
/// must never take the session display down with it.
pub fn run(args: Args) -> Result<()> {
    let no_color = args.no_color || std::env::var_os("NO_COLOR").is_some();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run_inner(no_color)));

    match result {
        Ok(Ok(())) => {}
        Ok(Err(err)) => print_error_line(&format!("{err:#}"), no_color),
        Err(_) => print_error_line("statusline renderer panicked", no_color),
    }
    Ok(())
}

/// Short plain-text degradation path: one red error line plus a hint.
fn print_error_line(message: &str, no_color: bool) {
    let line = format!("{RED}Error:{LIGHT_GRAY} {message}{RESET}");
    let hint = format!("{GRAY}Check statusline configuration{RESET}");
    if no_color {
        println!("{}", strip_ansi(&line));
        println!("{}", strip_ansi(&hint));
    } else {
        println!("{line}");
        println!("{hint}");
    }
}

fn run_inner(no_color: bool) -> Result<()> {
    // Silent fallback to defaults: the render path never hard-fails on a
    // bad config file.
    let config = match config::config_path() {
        Ok(path) => config::load(&path),
        Err(_) => StatuslineConfig::default(),
    };

    let input = parse_stdin()?;

    let lines = render_lines(&config, &input);
    for line in lines {
        if no_color {
            println!("{}", strip_ansi(&line));
        } else {
            println!("{line}");
        }
    }

    Ok(())
}

/// Parse the snapshot from stdin. Reads at most 64KB to avoid blocking on
/// runaway input.
fn parse_stdin() -> Result<HookInput> {
    let mut buf = Vec::with_capacity(65536);
    std::io::stdin()
        .lock()
        .take(65536)
        .read_to_end(&mut buf)
        .context("failed to read stdin")?;

    serde_json::from_slice(&buf).context("malformed input snapshot")
}

/// Pure assembly: snapshot + configuration -> output lines. Collaborator
/// lookups (git, transcript, limits) all degrade to absence.
fn render_lines(config: &StatuslineConfig, input: &HookInput) -> Vec<String> {
    let workspace_dir = input
        .workspace
        .current_dir
        .as_deref()
        .or(input.cwd.as_deref())
        .unwrap_or(".");

    let git_state = git::git_status(Path::new(workspace_dir));
    let branch = format_branch(&git_state, &config.git);
    let dir_path = format_path(workspace_dir, config.path_display_mode);
    let model_name = input.model.display_name.as_deref().unwrap_or("Claude");

    let context_data = input
        .transcript_path
        .as_deref()
        .map(|path| context::context_data(path, &config.context))
        .unwrap_or_default();
    let limits_data = usage::load_limits();

    let first_line = build_first_line(
        &branch,
        &dir_path,
        model_name,
        config.show_sonnet_model,
        config.separator,
    );
    let second_line = build_second_line(
        context_data.tokens,
        config.context.max_context_tokens,
        context_data.percentage,
        &limits_data,
        &config.session,
        &config.limits,
        config.use_icon_labels,
        config.separator,
    );

    compose(config, first_line, second_line)
}
