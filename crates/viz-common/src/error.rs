//! Error types for windviz crates.

use thiserror::Error;

/// Result type alias using VizError.
pub type VizResult<T> = Result<T, VizError>;

/// Primary error type for the visualization client.
#[derive(Debug, Error)]
pub enum VizError {
    // === Validation errors (rejected before any network call) ===
    #[error("Invalid file selection: {0}")]
    InvalidSelection(String),

    #[error("File too large: {path} is {size} bytes (limit {limit})")]
    FileTooLarge {
        path: String,
        size: u64,
        limit: u64,
    },

    #[error("An upload is already in progress")]
    UploadInProgress,

    // === Transport errors (network / non-2xx) ===
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    // === Server-reported errors (2xx envelope with success: false) ===
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("No wind data available for session {0}")]
    NoWindData(String),

    /// The session was cleared while this operation was in flight; its
    /// result is stale and has been discarded.
    #[error("Operation superseded by session clear")]
    Superseded,

    // === Data errors ===
    #[error("Invalid wind grid: {0}")]
    InvalidGrid(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Infrastructure errors ===
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl VizError {
    /// True for failures rejected client-side, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VizError::InvalidSelection(_)
                | VizError::FileTooLarge { .. }
                | VizError::UploadInProgress
        )
    }

    /// True for failures reported inside a 2xx response envelope.
    pub fn is_server_reported(&self) -> bool {
        matches!(
            self,
            VizError::UploadFailed(_) | VizError::SessionNotFound(_) | VizError::NoWindData(_)
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for VizError {
    fn from(err: std::io::Error) -> Self {
        VizError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        VizError::InternalError(format!("JSON error: {}", err))
    }
}
