use thiserror::Error;

/// Message returned when `OTF_EMAIL` or `OTF_PASSWORD` is absent.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Missing OTF_EMAIL or OTF_PASSWORD env vars";

#[derive(Debug, Error)]
pub enum OtfError {
    #[error("{}", MISSING_CREDENTIALS_MESSAGE)]
    MissingCredentials,

    #[error("Failed to authenticate with OTF: {0}")]
    AuthError(String),

    #[error("Failed to access OTF API: {0}")]
    ApiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("Failed to serialize response: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl OtfError {
    /// HTTP status the handler answers with for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            OtfError::MissingCredentials => 400,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for OtfError {
    fn from(error: reqwest::Error) -> Self {
        OtfError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for OtfError {
    fn from(error: serde_json::Error) -> Self {
        OtfError::SerializationError(error.to_string())
    }
}

impl From<anyhow::Error> for OtfError {
    fn from(error: anyhow::Error) -> Self {
        OtfError::ApiError(error.to_string())
    }
}
