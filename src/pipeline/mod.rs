pub mod enricher;
pub mod requester;
pub mod templates;
pub mod traits;

use crate::{
    config::Config,
    error::Result,
    gemini::GeminiClient,
    logger,
    models::{GenerationRequest, GenerationResult, Orientation},
};
use std::sync::Arc;

pub use crate::models::PipelineStage;

pub use enricher::PromptEnricher;
pub use requester::{select_first_image, ImageRequester, SelectedImage};
pub use templates::{PromptTemplate, TemplateOptions};
pub use traits::{ImageGenerator, TextGenerator};

/// Scene text and story context in, resized PNG out.
#[derive(Clone)]
pub struct ScenePipeline {
    enricher: PromptEnricher,
    requester: ImageRequester,
}

impl ScenePipeline {
    pub fn new(text: Arc<dyn TextGenerator>, image: Arc<dyn ImageGenerator>) -> Self {
        Self {
            enricher: PromptEnricher::new(text),
            requester: ImageRequester::new(image),
        }
    }

    /// Builds a pipeline backed by Gemini for both stages.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GeminiClient::new(config.gemini.clone())?;
        Ok(Self::new(
            Arc::new(client.text().clone()),
            Arc::new(client.image().clone()),
        ))
    }

    pub async fn generate(
        &self,
        scene_text: &str,
        include_embedded_text: bool,
        story_context: &str,
        orientation: Orientation,
    ) -> Result<GenerationResult> {
        let request = GenerationRequest::new(scene_text, story_context)
            .with_embedded_text(include_embedded_text)
            .with_orientation(orientation);
        self.generate_image(&request).await
    }

    pub async fn generate_image(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;

        let mut stage = PipelineStage::Idle;
        let outcome = self.run(request, &mut stage).await;

        match &outcome {
            Ok(result) => transition(&mut stage, result.outcome()),
            Err(e) => {
                log::error!("Generation failed while {:?}: {}", stage, e);
                transition(&mut stage, PipelineStage::Failed);
            }
        }
        outcome
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        stage: &mut PipelineStage,
    ) -> Result<GenerationResult> {
        transition(stage, PipelineStage::Enriching);
        let prompt = {
            let _timer = logger::timer("enrich");
            self.enricher.enrich(request).await?
        };

        transition(stage, PipelineStage::Requesting);
        let target = request.orientation.resolution();
        let result = {
            let _timer = logger::timer("render");
            self.requester.request(&prompt, target).await?
        };

        Ok(result.with_enriched_prompt(prompt))
    }
}

fn transition(stage: &mut PipelineStage, next: PipelineStage) {
    log::debug!("Pipeline {:?} -> {:?}", stage, next);
    *stage = next;
}
