//! Usage-limit snapshots for the second line.
//!
//! Limits are read from a local JSON cache maintained by the host
//! tooling; either window may be absent, and an absent or malformed file
//! means the feature is unavailable, not that rendering failed.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment override for the cache location, mainly for tests.
pub const USAGE_FILE_ENV: &str = "CC_STATUSLINE_USAGE_FILE";

/// One tracked rate-limit window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LimitWindow {
    /// Percent of the window's quota consumed.
    pub utilization: f64,
    /// RFC 3339 timestamp at which the window resets.
    pub resets_at: String,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct UsageLimits {
    pub five_hour: Option<LimitWindow>,
    pub seven_day: Option<LimitWindow>,
}

/// Resolve the snapshot file: `$CC_STATUSLINE_USAGE_FILE`, else
/// `~/.claude/usage-limits.json`.
pub fn usage_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(USAGE_FILE_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|h| h.join(".claude").join("usage-limits.json"))
}

/// Load the current snapshot, degrading to "no data" on any failure.
pub fn load_limits() -> UsageLimits {
    usage_file()
        .map(|path| load_limits_from(&path))
        .unwrap_or_default()
}

pub fn load_limits_from(path: &Path) -> UsageLimits {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!("malformed usage snapshot at {}: {err}", path.display());
            UsageLimits::default()
        }),
        Err(_) => UsageLimits::default(),
    }
}
