use crate::{
    error::Result,
    models::{
        ImageGenerationRequest, ImageGenerationResponse, TextGenerationRequest,
        TextGenerationResponse,
    },
};
use async_trait::async_trait;

/// First-stage backend: turns an instruction prompt into plain text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse>;
}

/// Second-stage backend: returns the ordered multimodal parts for a prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse>;
}
