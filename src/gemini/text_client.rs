use crate::{
    error::Result,
    models::{
        gemini::{GenerateContentRequest, GenerationConfig},
        TextGenerationRequest, TextGenerationResponse,
    },
    pipeline::TextGenerator,
};
use async_trait::async_trait;

use super::Transport;

#[derive(Clone)]
pub struct TextClient {
    transport: Transport,
}

impl TextClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn generate(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse> {
        let model_id = request
            .model_id
            .clone()
            .unwrap_or_else(|| self.transport.config().text_model.clone());

        let body = GenerateContentRequest::from_prompt(
            &request.prompt,
            GenerationConfig {
                response_mime_type: request.response_mime_type.clone(),
                response_modalities: None,
            },
        );

        log::info!("Invoking text model: {}", model_id);
        log::debug!("Text prompt is {} chars", request.prompt.chars().count());

        let response = self.transport.generate_content(&model_id, &body).await?;

        // Same joining rule as the SDK's `response.text`: every text part of
        // the first candidate, in order.
        let text = response
            .first_candidate_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .concat();

        Ok(TextGenerationResponse {
            text,
            model: model_id,
            finish_reason: response.finish_reason(),
        })
    }
}

#[async_trait]
impl TextGenerator for TextClient {
    async fn generate_text(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse> {
        self.generate(request).await
    }
}
