pub mod schema;
pub mod tree;

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::StatuslineError;
use schema::{ConfigMessage, StatuslineConfig};

/// Environment override for the config file location, mainly for tests.
pub const CONFIG_PATH_ENV: &str = "CC_STATUSLINE_CONFIG";

/// Resolve the config file path: `$CC_STATUSLINE_CONFIG` if set, otherwise
/// `~/.config/cc-statusline/config.json` (platform-appropriate).
pub fn config_path() -> Result<PathBuf, StatuslineError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|d| d.join("cc-statusline").join("config.json"))
        .ok_or(StatuslineError::NoConfigDir)
}

/// Read a user tree from `path` and merge it over the defaults. The file
/// itself stays partial; only the merged result is returned.
fn load_merged(path: &Path) -> Result<Value, StatuslineError> {
    let contents = std::fs::read_to_string(path)?;
    let user: Value = serde_json::from_str(&contents)?;
    Ok(tree::deep_merge(&StatuslineConfig::default_value(), &user))
}

/// Load the working configuration for rendering.
///
/// A missing file is the default configuration, not an error, and any
/// parse or shape failure falls back to defaults with a logged warning:
/// the status line must render with whatever configuration it can get.
pub fn load(path: &Path) -> StatuslineConfig {
    if !path.exists() {
        return StatuslineConfig::default();
    }

    match load_merged(path).and_then(|merged| {
        serde_json::from_value::<StatuslineConfig>(merged).map_err(StatuslineError::from)
    }) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to load config from {}: {err}", path.display());
            StatuslineConfig::default()
        }
    }
}

/// Load the merged tree as a raw JSON value, for dot-path access. Missing
/// or unreadable files degrade to the default tree.
pub fn load_value(path: &Path) -> Value {
    if !path.exists() {
        return StatuslineConfig::default_value();
    }
    load_merged(path).unwrap_or_else(|err| {
        tracing::warn!("failed to load config from {}: {err}", path.display());
        StatuslineConfig::default_value()
    })
}

/// Import a configuration from an arbitrary file.
///
/// Unlike [`load`], failures here are hard errors: the candidate is merged
/// over the defaults, then must pass both structural validation and typed
/// conversion before the caller may adopt it.
pub fn import(path: &Path) -> Result<StatuslineConfig, StatuslineError> {
    let merged = load_merged(path)?;
    check(&merged)?;
    serde_json::from_value(merged).map_err(StatuslineError::from)
}

/// Run structural validation, collapsing messages into a hard error.
pub fn check(candidate: &Value) -> Result<(), StatuslineError> {
    let errors: Vec<String> = schema::validate(candidate)
        .into_iter()
        .filter_map(|msg| match msg {
            ConfigMessage::Error(e) => Some(e),
            ConfigMessage::Warning(w) => {
                tracing::warn!("config warning: {w}");
                None
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(StatuslineError::Validation(errors.join("; ")))
    }
}

/// Persist a tree as pretty-printed JSON, creating the parent directory.
pub fn save_value(path: &Path, value: &Value) -> Result<(), StatuslineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');
    std::fs::write(path, contents)?;
    Ok(())
}

/// Persist a typed configuration (export and `config reset`).
pub fn save(path: &Path, config: &StatuslineConfig) -> Result<(), StatuslineError> {
    save_value(path, &serde_json::to_value(config)?)
}
