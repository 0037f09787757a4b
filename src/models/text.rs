use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TextGenerationRequest {
    pub prompt: String,
    pub model_id: Option<String>,
    pub response_mime_type: Option<String>,
}

impl TextGenerationRequest {
    /// A request asking the model for an unformatted text answer.
    pub fn plain(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_id: None,
            response_mime_type: Some("text/plain".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationResponse {
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
}
