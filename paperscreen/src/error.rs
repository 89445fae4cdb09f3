use thiserror::Error;

/// Error types for paperscreen operations
#[derive(Error, Debug)]
pub enum ScreenError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error: {message}")]
    ApiError { message: String },

    /// XML response could not be parsed
    #[error("XML parsing failed: {message}")]
    XmlError { message: String },

    /// CSV serialization failed
    #[error("CSV writing failed: {0}")]
    CsvError(#[from] csv::Error),

    /// File I/O failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
