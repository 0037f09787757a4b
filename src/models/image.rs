use serde::{Deserialize, Serialize};

use super::common::PipelineStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseModality {
    Text,
    Image,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model_id: Option<String>,
    pub response_modalities: Vec<ResponseModality>,
}

impl ImageGenerationRequest {
    /// Asks for both text and image output, as image-capable Gemini models require.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_id: None,
            response_modalities: vec![ResponseModality::Text, ResponseModality::Image],
        }
    }
}

/// One fragment of a multimodal response, kept in service order.
///
/// Inline image data stays base64 encoded until a part is selected, so
/// parts that are never used are never decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    InlineImage { mime_type: String, data: String },
}

#[derive(Debug, Clone)]
pub struct ImageGenerationResponse {
    pub parts: Vec<ContentPart>,
    pub model: String,
    pub block_reason: Option<String>,
    pub finish_reason: Option<String>,
}

impl ImageGenerationResponse {
    /// All text parts joined in order, or `None` when there are none.
    pub fn aggregate_text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) if !text.trim().is_empty() => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    #[serde(skip)]
    pub image_bytes: Option<Vec<u8>>,
    pub mime_type: Option<String>,
    pub explanation_text: Option<String>,
    pub enriched_prompt: String,
    pub succeeded: bool,
}

impl GenerationResult {
    pub fn image_ready(
        image_bytes: Vec<u8>,
        mime_type: String,
        explanation_text: Option<String>,
    ) -> Self {
        Self {
            image_bytes: Some(image_bytes),
            mime_type: Some(mime_type),
            explanation_text,
            enriched_prompt: String::new(),
            succeeded: true,
        }
    }

    pub fn no_image(explanation_text: Option<String>) -> Self {
        Self {
            image_bytes: None,
            mime_type: None,
            explanation_text,
            enriched_prompt: String::new(),
            succeeded: false,
        }
    }

    pub fn with_enriched_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.enriched_prompt = prompt.into();
        self
    }

    pub fn outcome(&self) -> PipelineStage {
        if self.succeeded {
            PipelineStage::ImageReady
        } else {
            PipelineStage::NoImageProduced
        }
    }
}
