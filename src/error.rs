//! Error handling for the NOVA career analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NovaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote service error: {0}")]
    RemoteService(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

pub type Result<T> = std::result::Result<T, NovaError>;

/// Convert reqwest errors to our custom error type
impl From<reqwest::Error> for NovaError {
    fn from(err: reqwest::Error) -> Self {
        NovaError::Network(err.to_string())
    }
}
