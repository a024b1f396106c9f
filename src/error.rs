use thiserror::Error;

/// Everything that can go wrong between picking an invoice and saving its CSV.
///
/// Submission failures are never distinguished in the UI, but the variant is
/// kept so callers (and the logs) can tell a dead server from a full disk.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Endpoint answered {status}")]
    Status { status: reqwest::StatusCode },
    #[error("Invalid endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("Failed to load config: {0}")]
    Config(#[from] envconfig::Error),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("GUI error: {0}")]
    Gui(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
