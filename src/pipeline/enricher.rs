use std::sync::Arc;

use crate::{
    error::{GenerationError, Result},
    models::{GenerationRequest, TextGenerationRequest},
};

use super::templates::{PromptTemplate, TemplateOptions};
use super::traits::TextGenerator;

/// Stage one: expands a terse scene into a detailed English image prompt.
#[derive(Clone)]
pub struct PromptEnricher {
    generator: Arc<dyn TextGenerator>,
    model_id: Option<String>,
}

impl PromptEnricher {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            model_id: None,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn instruction_for(request: &GenerationRequest) -> String {
        PromptTemplate::new(TemplateOptions::new(
            request.orientation,
            request.include_embedded_text,
        ))
        .render(&request.scene_text, &request.story_context)
    }

    pub async fn enrich(&self, request: &GenerationRequest) -> Result<String> {
        let mut text_request = TextGenerationRequest::plain(Self::instruction_for(request));
        text_request.model_id = self.model_id.clone();

        let response = self.generator.generate_text(text_request).await?;
        let prompt = response.text.trim();

        if prompt.is_empty() {
            return Err(GenerationError::Request(format!(
                "model {} returned an empty enriched prompt (finish reason: {})",
                response.model,
                response.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        log::debug!("Enriched prompt is {} chars", prompt.chars().count());
        Ok(prompt.to_string())
    }
}
