//! Pure formatting primitives for the status line.
//!
//! Every function returns a plain string with embedded ANSI sequences and
//! performs no I/O. Fragments compose by concatenation; the composer owns
//! the final reset.

use chrono::{DateTime, Utc};

use crate::config::schema::{GitConfig, SessionConfig};
use crate::git::GitStatus;
use crate::render::palette::{
    self, DIM, GRAY, GREEN, LIGHT_GRAY, PURPLE, RED, RESET, SYM_CONTEXT, SYM_DIRTY, YELLOW,
};
use crate::config::schema::PathMode;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;

/// Format a workspace path for display, substituting a leading home prefix
/// with `~`.
pub fn format_path(path: &str, mode: PathMode) -> String {
    let home = dirs::home_dir().map(|h| h.to_string_lossy().into_owned());
    format_path_in(path, mode, home.as_deref())
}

/// Home-injectable variant of [`format_path`].
///
/// `basename` works on the original path; `truncated` works on the
/// home-substituted one, collapsing to `/` + the last two segments when
/// more than two non-empty segments remain.
pub fn format_path_in(path: &str, mode: PathMode, home: Option<&str>) -> String {
    let substituted = match home {
        Some(h) if !h.is_empty() && path.starts_with(h) => format!("~{}", &path[h.len()..]),
        _ => path.to_string(),
    };

    match mode {
        PathMode::Basename => {
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            segments
                .last()
                .map(|s| (*s).to_string())
                .unwrap_or_else(|| path.to_string())
        }
        PathMode::Truncated => {
            let segments: Vec<&str> = substituted.split('/').filter(|s| !s.is_empty()).collect();
            if segments.len() > 2 {
                format!("/{}", segments[segments.len() - 2..].join("/"))
            } else {
                substituted
            }
        }
        PathMode::Full => substituted,
    }
}

/// Compact token count: `1.5m` / `192k` / `874`, suffix in gray with the
/// value resuming the surrounding light gray.
pub fn format_tokens(tokens: u64, show_decimals: bool) -> String {
    let scaled = |value: f64, suffix: &str| {
        let number = if show_decimals {
            format!("{value:.1}")
        } else {
            format!("{}", value.round() as u64)
        };
        palette::StyleBuilder::new()
            .text(number)
            .styled(GRAY, suffix)
            .style(LIGHT_GRAY)
            .build()
    };

    if tokens >= 1_000_000 {
        scaled(tokens as f64 / 1_000_000.0, "m")
    } else if tokens >= 1_000 {
        scaled(tokens as f64 / 1_000.0, "k")
    } else {
        tokens.to_string()
    }
}

/// Time remaining until `resets_at` (RFC 3339), as the two most significant
/// non-zero units: `2d3h`, `2d`, `5h12m`, `40m`. A past timestamp renders
/// `now`; an unparseable one renders `N/A`.
pub fn format_reset_time(resets_at: &str) -> String {
    match DateTime::parse_from_rfc3339(resets_at) {
        Ok(reset) => format_reset_delta(reset.timestamp_millis() - Utc::now().timestamp_millis()),
        Err(_) => "N/A".to_string(),
    }
}

/// Render a millisecond delta; split out of [`format_reset_time`] so the
/// unit breakdown is testable without a clock.
pub fn format_reset_delta(diff_ms: i64) -> String {
    if diff_ms <= 0 {
        return "now".to_string();
    }

    let days = diff_ms / MS_PER_DAY;
    let hours = (diff_ms % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (diff_ms % MS_PER_HOUR) / MS_PER_MINUTE;

    if days > 0 {
        if hours > 0 {
            format!("{days}d{hours}h")
        } else {
            format!("{days}d")
        }
    } else if hours > 0 {
        format!("{hours}h{minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Git fragment: branch name, then (only on a dirty tree) the dirty dot,
/// combined `+A -D` line counts, staged and unstaged file counts. Each
/// piece is independently toggled and zero-suppressed.
pub fn format_branch(git: &GitStatus, config: &GitConfig) -> String {
    let mut result = String::new();

    if config.show_branch {
        result.push_str(&git.branch);
    }

    if git.has_changes {
        if config.show_dirty_indicator {
            result.push(' ');
            result.push_str(
                &palette::StyleBuilder::new()
                    .styled(PURPLE, SYM_DIRTY)
                    .neutral()
                    .build(),
            );
        }

        let mut changes: Vec<String> = Vec::new();

        if config.show_changes {
            let total_added = git.staged.added + git.unstaged.added;
            let total_deleted = git.staged.deleted + git.unstaged.deleted;
            if total_added + total_deleted > 0 {
                changes.push(
                    palette::StyleBuilder::new()
                        .styled(GREEN, format!("+{total_added}"))
                        .neutral()
                        .text(" ")
                        .styled(RED, format!("-{total_deleted}"))
                        .neutral()
                        .build(),
                );
            }
        }

        if config.show_staged && git.staged.files > 0 {
            changes.push(
                palette::StyleBuilder::new()
                    .styled(GRAY, format!("~{}", git.staged.files))
                    .neutral()
                    .build(),
            );
        }

        if config.show_unstaged && git.unstaged.files > 0 {
            changes.push(
                palette::StyleBuilder::new()
                    .styled(YELLOW, format!("~{}", git.unstaged.files))
                    .neutral()
                    .build(),
            );
        }

        if !changes.is_empty() {
            result.push(' ');
            result.push_str(&changes.join(" "));
        }
    }

    result
}

/// Session fragment: label plus the enabled items (token count or
/// used/max pair, percentage) joined by the configured separator. Empty
/// when nothing is enabled so the composer can drop the whole block.
pub fn format_session(
    tokens_used: u64,
    tokens_max: u64,
    percentage: u32,
    config: &SessionConfig,
    use_icon_labels: bool,
) -> String {
    let mut items: Vec<String> = Vec::new();

    if config.show_tokens {
        let used = format_tokens(tokens_used, config.show_token_decimals);
        if config.show_max_tokens {
            let max = format_tokens(tokens_max, config.show_token_decimals);
            items.push(
                palette::StyleBuilder::new()
                    .text(used)
                    .styled(GRAY, "/")
                    .text(max)
                    .style(LIGHT_GRAY)
                    .build(),
            );
        } else {
            items.push(used);
        }
    }
    if config.show_percentage {
        items.push(
            palette::StyleBuilder::new()
                .text(percentage.to_string())
                .styled(GRAY, "%")
                .style(LIGHT_GRAY)
                .build(),
        );
    }

    if items.is_empty() {
        return String::new();
    }

    let label = if use_icon_labels {
        format!("{DIM}{SYM_CONTEXT}{RESET}")
    } else {
        format!("{DIM}Context:{RESET}")
    };

    let info_sep = match &config.info_separator {
        Some(sep) => format!(" {GRAY}{}{LIGHT_GRAY} ", sep.as_str()),
        None => " ".to_string(),
    };

    format!("{label} {LIGHT_GRAY}{}{RESET}", items.join(&info_sep))
}
