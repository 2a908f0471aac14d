use thiserror::Error;

/// Core error types for carekit record handling
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid record DateTime: {0}")]
    InvalidDateTime(String),

    #[error("Unknown code '{code}' in system {system}")]
    UnknownCode { system: String, code: String },

    #[error("Invalid record data: {message}")]
    InvalidRecord { message: String },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeError(#[from] time::error::Parse),
}

impl CoreError {
    /// Create a new InvalidDateTime error
    pub fn invalid_date_time(datetime: impl Into<String>) -> Self {
        Self::InvalidDateTime(datetime.into())
    }

    /// Create a new UnknownCode error
    pub fn unknown_code(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self::UnknownCode {
            system: system.into(),
            code: code.into(),
        }
    }

    /// Create a new InvalidRecord error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
