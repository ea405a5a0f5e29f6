use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single capture exchange with the collection service.
///
/// Never retried by this crate; the caller decides what to do with it.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, or the request could not be built.
    #[error("Capture request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Capture failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse capture response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl TransportError {
    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(e) | TransportError::Decode(e) => e.status(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(e) | TransportError::Decode(e) => e.is_timeout(),
            TransportError::Status { .. } => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ReporterError {
    /// Process exit code used by the command line tool.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReporterError::Config(_) | ReporterError::Yaml(_) => 2,
            ReporterError::Transport(_) => 3,
            _ => 1,
        }
    }
}
