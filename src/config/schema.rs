//! Typed configuration tree for the status line.
//!
//! The on-disk representation is camelCase JSON; every enumerated field is
//! a closed set that fails deserialization on any value outside it, so a
//! violating file is rejected rather than coerced.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Section separator glyphs. The same set is reused for the session info
/// separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    #[serde(rename = "|")]
    Pipe,
    #[serde(rename = "•")]
    Bullet,
    #[serde(rename = "·")]
    MiddleDot,
    #[serde(rename = "⋅")]
    DotOperator,
    #[serde(rename = "●")]
    BlackCircle,
    #[serde(rename = "◆")]
    Diamond,
    #[serde(rename = "▪")]
    SmallSquare,
    #[serde(rename = "▸")]
    Triangle,
    #[serde(rename = "›")]
    Chevron,
    #[serde(rename = "→")]
    Arrow,
}

impl Separator {
    /// All glyphs, in the order they are offered to users.
    pub const ALL: [Separator; 10] = [
        Separator::Pipe,
        Separator::Bullet,
        Separator::MiddleDot,
        Separator::DotOperator,
        Separator::BlackCircle,
        Separator::Diamond,
        Separator::SmallSquare,
        Separator::Triangle,
        Separator::Chevron,
        Separator::Arrow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Pipe => "|",
            Separator::Bullet => "•",
            Separator::MiddleDot => "·",
            Separator::DotOperator => "⋅",
            Separator::BlackCircle => "●",
            Separator::Diamond => "◆",
            Separator::SmallSquare => "▪",
            Separator::Triangle => "▸",
            Separator::Chevron => "›",
            Separator::Arrow => "→",
        }
    }
}

/// How the workspace path is rendered on the first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    Full,
    Truncated,
    Basename,
}

impl PathMode {
    pub const ALL: [PathMode; 3] = [PathMode::Full, PathMode::Truncated, PathMode::Basename];

    pub fn as_str(self) -> &'static str {
        match self {
            PathMode::Full => "full",
            PathMode::Truncated => "truncated",
            PathMode::Basename => "basename",
        }
    }
}

/// Progress-bar coloring policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Progressive,
    Green,
    Yellow,
    Red,
    Blue,
}

/// Progress-bar width in cells. Only 5, 10 and 15 are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BarLength {
    Short,
    Medium,
    Long,
}

impl BarLength {
    pub fn cells(self) -> usize {
        match self {
            BarLength::Short => 5,
            BarLength::Medium => 10,
            BarLength::Long => 15,
        }
    }
}

impl TryFrom<u32> for BarLength {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(BarLength::Short),
            10 => Ok(BarLength::Medium),
            15 => Ok(BarLength::Long),
            other => Err(format!("progress bar length must be 5, 10 or 15, got {other}")),
        }
    }
}

impl From<BarLength> for u32 {
    fn from(value: BarLength) -> Self {
        value.cells() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitConfig {
    /// Show the current branch name.
    pub show_branch: bool,
    /// Show the dirty dot when the tree has changes.
    pub show_dirty_indicator: bool,
    /// Show combined added/deleted line counts.
    pub show_changes: bool,
    /// Show the staged file count (gray).
    pub show_staged: bool,
    /// Show the unstaged file count (yellow).
    pub show_unstaged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Separator between session items; `null` means a single space.
    pub info_separator: Option<Separator>,
    pub show_tokens: bool,
    /// Render `192k/200k` instead of `192k`.
    pub show_max_tokens: bool,
    /// Render `192.1k` instead of `192k`.
    pub show_token_decimals: bool,
    pub show_percentage: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConfig {
    /// Hard context-window limit.
    pub max_context_tokens: u64,
    /// Tokens reserved for autocompact.
    pub autocompact_buffer_tokens: u64,
    /// Measure the percentage against the usable window (max minus the
    /// autocompact buffer) instead of the full window.
    pub use_usable_context_only: bool,
    /// Estimated fixed overhead (system prompt, tools, memory files) added
    /// on top of the transcript count.
    pub overhead_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsConfig {
    pub show_progress_bar: bool,
    pub progress_bar_length: BarLength,
    pub color: ColorMode,
    /// Also render the seven-day window block.
    pub show_seven_day: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatuslineConfig {
    /// Join both lines with the separator instead of printing two lines.
    pub one_line: bool,
    /// Render the branch/path/model line at all.
    pub show_first_line: bool,
    /// Show the model name even when it is the default (Sonnet) model.
    pub show_sonnet_model: bool,
    pub path_display_mode: PathMode,
    /// Icon labels (📚 🕔 📅) instead of text labels.
    pub use_icon_labels: bool,
    pub git: GitConfig,
    pub separator: Separator,
    pub session: SessionConfig,
    pub context: ContextConfig,
    pub limits: LimitsConfig,
}

impl Default for StatuslineConfig {
    fn default() -> Self {
        Self {
            one_line: false,
            show_first_line: true,
            show_sonnet_model: false,
            path_display_mode: PathMode::Truncated,
            use_icon_labels: false,
            git: GitConfig {
                show_branch: true,
                show_dirty_indicator: true,
                show_changes: false,
                show_staged: true,
                show_unstaged: true,
            },
            separator: Separator::Bullet,
            session: SessionConfig {
                info_separator: None,
                show_tokens: true,
                show_max_tokens: false,
                show_token_decimals: false,
                show_percentage: true,
            },
            context: ContextConfig {
                max_context_tokens: 200_000,
                autocompact_buffer_tokens: 45_000,
                use_usable_context_only: false,
                overhead_tokens: 0,
            },
            limits: LimitsConfig {
                show_progress_bar: true,
                progress_bar_length: BarLength::Short,
                color: ColorMode::Blue,
                show_seven_day: false,
            },
        }
    }
}

impl StatuslineConfig {
    /// The default tree as a JSON value, the base of every merge.
    pub fn default_value() -> Value {
        serde_json::to_value(StatuslineConfig::default())
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
    }
}

/// Validation outcome for a candidate configuration tree.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigMessage {
    Warning(String),
    Error(String),
}

/// Structural check on a candidate tree.
///
/// Deliberately shallow: the top-level booleans, the two top-level
/// enumerations and the presence of the four sub-objects. Depth 2+ is left
/// to typed deserialization so forward-compatible additions survive.
pub fn validate(candidate: &Value) -> Vec<ConfigMessage> {
    let mut messages = Vec::new();

    let Some(tree) = candidate.as_object() else {
        messages.push(ConfigMessage::Error("config must be a JSON object".to_string()));
        return messages;
    };

    for key in ["oneLine", "showSonnetModel"] {
        if !tree.get(key).is_some_and(Value::is_boolean) {
            messages.push(ConfigMessage::Error(format!("`{key}` must be a boolean")));
        }
    }

    match tree.get("pathDisplayMode").and_then(Value::as_str) {
        Some(mode) if PathMode::ALL.iter().any(|m| m.as_str() == mode) => {}
        _ => messages.push(ConfigMessage::Error(
            "`pathDisplayMode` must be one of: full, truncated, basename".to_string(),
        )),
    }

    match tree.get("separator").and_then(Value::as_str) {
        Some(sep) if Separator::ALL.iter().any(|s| s.as_str() == sep) => {}
        _ => messages.push(ConfigMessage::Error(
            "`separator` must be one of the supported glyphs".to_string(),
        )),
    }

    for key in ["git", "session", "context", "limits"] {
        if !tree.get(key).is_some_and(Value::is_object) {
            messages.push(ConfigMessage::Error(format!("`{key}` must be an object")));
        }
    }

    const KNOWN_KEYS: [&str; 10] = [
        "oneLine",
        "showFirstLine",
        "showSonnetModel",
        "pathDisplayMode",
        "useIconLabels",
        "git",
        "separator",
        "session",
        "context",
        "limits",
    ];
    for key in tree.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            messages.push(ConfigMessage::Warning(format!(
                "unknown key `{key}` (kept for forward compatibility)"
            )));
        }
    }

    messages
}
