pub mod image_client;
pub mod text_client;

use crate::{
    config::GeminiConfig,
    error::{GenerationError, Result},
    models::gemini::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
};
use std::sync::Arc;

pub use image_client::ImageClient;
pub use text_client::TextClient;

/// HTTP transport shared by the text and image clients.
#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    config: Arc<GeminiConfig>,
    api_key: String,
}

impl Transport {
    fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: Arc::new(config),
            api_key,
        })
    }

    pub(crate) fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.config.endpoint(model);
        let payload = serde_json::to_vec(body)
            .map_err(|e| GenerationError::Serialization(e.to_string()))?;

        log::debug!("POST {} ({} bytes)", url, payload.len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                log::debug!("Gemini transport error for model {}: {:?}", model, e);
                GenerationError::from(e)
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(GenerationError::from)?;

        if !status.is_success() {
            let detail = match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
                Ok(envelope) => format!(
                    "{} - {}",
                    envelope.error.status.unwrap_or_else(|| "unknown".into()),
                    envelope.error.message.unwrap_or_else(|| "no message".into())
                ),
                Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
            };
            log::debug!("Gemini service error {}: {}", status, detail);
            return Err(GenerationError::Request(format!(
                "Gemini service error {}: {}",
                status, detail
            )));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            GenerationError::Response(format!("failed to parse generateContent response: {}", e))
        })
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    text_client: TextClient,
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let transport = Transport::new(config)?;

        Ok(Self {
            text_client: TextClient::new(transport.clone()),
            image_client: ImageClient::new(transport),
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
