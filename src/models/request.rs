use serde::{Deserialize, Serialize};

use super::common::Orientation;
use crate::error::{GenerationError, Result};

/// The four inputs collected by the caller for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub scene_text: String,
    pub story_context: String,
    pub include_embedded_text: bool,
    pub orientation: Orientation,
}

impl GenerationRequest {
    pub fn new(scene_text: impl Into<String>, story_context: impl Into<String>) -> Self {
        Self {
            scene_text: scene_text.into(),
            story_context: story_context.into(),
            include_embedded_text: false,
            orientation: Orientation::default(),
        }
    }

    pub fn with_embedded_text(mut self, enabled: bool) -> Self {
        self.include_embedded_text = enabled;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.scene_text.trim().is_empty() {
            return Err(GenerationError::Validation(
                "scene text must not be empty".into(),
            ));
        }
        if self.story_context.trim().is_empty() {
            return Err(GenerationError::Validation(
                "story context must not be empty".into(),
            ));
        }
        Ok(())
    }
}
