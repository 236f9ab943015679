use thiserror::Error;

/// Errors surfaced by configuration loading, import and export.
///
/// The render path never propagates these -- it falls back to defaults --
/// but `config` subcommands report them to the user verbatim.
#[derive(Error, Debug)]
pub enum StatuslineError {
    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine configuration directory")]
    NoConfigDir,
}
