use thiserror::Error;

#[derive(Error, Debug)]
pub enum JitdashError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Build details are missing a result")]
    MissingResult,

    #[error("Build details are missing a timestamp")]
    MissingTimestamp,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JitdashError>;
