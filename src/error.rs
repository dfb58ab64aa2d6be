//! Error types for the issue reminder.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Configuration-related errors. Any of these stops the process before a run starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reading issue rows from the tabular data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request to {endpoint} failed: {reason}")]
    Http { endpoint: String, reason: String },

    #[error("Spreadsheet not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures handing the rendered report to the mail transport.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("No recipients to deliver to")]
    NoRecipients,

    #[error("Invalid {role} address {address:?}: {reason}")]
    InvalidAddress {
        role: &'static str,
        address: String,
        reason: String,
    },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport failed: {0}")]
    Transport(String),

    #[error("Delivery task failed: {0}")]
    TaskFailed(String),
}

/// Result type alias for the issue reminder.
pub type Result<T> = std::result::Result<T, Error>;
