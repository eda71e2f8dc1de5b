use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardforgeError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse cardforge.toml: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Preflight errors
    #[error("PREFLIGHT_FAILED: {failed} check(s) failed; quitting before processing any row")]
    PreflightFailed { failed: usize },

    // Table errors
    #[error("TABLE_READ_ERROR: failed to read '{}': {reason}", path.display())]
    TableReadError { path: PathBuf, reason: String },

    #[error("TABLE_HEADER_MISMATCH: expected '{expected}', found '{found}'")]
    TableHeaderMismatch { expected: String, found: String },

    // Template errors
    #[error("TEMPLATE_READ_ERROR: failed to read '{}': {reason}", path.display())]
    TemplateReadError { path: PathBuf, reason: String },

    // Output errors
    #[error("SVG_WRITE_ERROR: failed to write '{}': {reason}", path.display())]
    SvgWriteError { path: PathBuf, reason: String },

    // Rasterizer errors
    #[error("RASTERIZER_NOT_FOUND: '{}' not found (not an existing path, not in PATH)", command.display())]
    RasterizerNotFound { command: PathBuf },

    #[error("RASTERIZER_SPAWN_FAILED: {0}")]
    RasterizerSpawnFailed(String),

    #[error("RASTERIZER_WAIT_FAILED: {0}")]
    RasterizerWaitFailed(String),

    // State errors
    #[error("STATE_READ_ERROR: failed to read state.json: {0}")]
    StateReadError(String),

    #[error("STATE_WRITE_ERROR: failed to write state.json: {0}")]
    StateWriteError(String),

    #[error("STATE_INVALID_SCHEMA: unknown schema version '{0}'")]
    StateInvalidSchema(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for CardforgeError {
    fn from(err: serde_json::Error) -> Self {
        CardforgeError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, CardforgeError>;
