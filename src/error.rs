use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Response error: {0}")]
    Response(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GenerationError {
    /// True for failures raised before any outbound call is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, GenerationError::Validation(_))
    }

    /// Transport, status and malformed-response failures all abort the
    /// invocation the same way.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            GenerationError::Request(_) | GenerationError::Response(_)
        )
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Request(format!("request timed out: {}", err))
        } else if err.is_decode() {
            GenerationError::Response(err.to_string())
        } else {
            GenerationError::Request(err.to_string())
        }
    }
}

impl From<base64::DecodeError> for GenerationError {
    fn from(err: base64::DecodeError) -> Self {
        GenerationError::Decode(format!("inline data is not valid base64: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
