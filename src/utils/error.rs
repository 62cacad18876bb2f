use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Extraction failed: {message}")]
    ExtractionFailure { message: String },

    #[error("Authentication failed: {message}")]
    AuthFailure { message: String },

    #[error("Spreadsheet backend error: {message}")]
    BackendError { status: Option<u16>, message: String },

    #[error("Workbook parse error: {0}")]
    ParseError(#[from] csv::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {field}: {reason}")]
    ConfigError { field: String, reason: String },
}

impl ExportError {
    pub fn extraction<S: Into<String>>(message: S) -> Self {
        Self::ExtractionFailure {
            message: message.into(),
        }
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::AuthFailure {
            message: message.into(),
        }
    }

    pub fn backend<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        Self::BackendError {
            status,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
