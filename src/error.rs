use thiserror::Error;

/// Errors that can occur at the boundaries of the recipe browser
///
/// Indexing and filtering never fail; missing or malformed card content
/// degrades to default values instead.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to read a gallery document or stdin
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured card selector is not valid CSS
    #[error("Invalid card selector: {0}")]
    Selector(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failed to serialize output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A control event line could not be understood
    #[error("Invalid control event: {0}")]
    InvalidEvent(String),
}
