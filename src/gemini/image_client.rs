use crate::{
    error::Result,
    models::{
        gemini::{GenerateContentRequest, GenerationConfig, Part},
        ContentPart, ImageGenerationRequest, ImageGenerationResponse,
    },
    pipeline::ImageGenerator,
};
use async_trait::async_trait;

use super::Transport;

#[derive(Clone)]
pub struct ImageClient {
    transport: Transport,
}

impl ImageClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        let model_id = request
            .model_id
            .clone()
            .unwrap_or_else(|| self.transport.config().image_model.clone());

        let body = GenerateContentRequest::from_prompt(
            &request.prompt,
            GenerationConfig {
                response_mime_type: None,
                response_modalities: Some(request.response_modalities.clone()),
            },
        );

        log::info!("Generating image with model: {}", model_id);

        let response = self.transport.generate_content(&model_id, &body).await?;
        let parts = response
            .first_candidate_parts()
            .iter()
            .filter_map(convert_part)
            .collect::<Vec<_>>();

        log::debug!("Image response carried {} parts", parts.len());

        Ok(ImageGenerationResponse {
            parts,
            model: model_id,
            block_reason: response.block_reason(),
            finish_reason: response.finish_reason(),
        })
    }
}

fn convert_part(part: &Part) -> Option<ContentPart> {
    if let Some(inline) = &part.inline_data {
        return Some(ContentPart::InlineImage {
            mime_type: inline.mime_type.clone(),
            data: inline.data.clone(),
        });
    }
    part.text.clone().map(ContentPart::Text)
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        self.generate(request).await
    }
}
