//! Scene-to-image generation on top of Gemini.
//!
//! A [`ScenePipeline`] runs two stages: the scene text and story context are
//! first expanded into a detailed English prompt by a text model, then that
//! prompt is rendered by an image model and the first returned image is
//! stretched to the orientation's fixed resolution and re-encoded as PNG.

pub mod config;
pub mod error;
pub mod gemini;
pub mod imaging;
pub mod logger;
pub mod models;
pub mod pipeline;

pub use config::{Config, GeminiConfig, DEFAULT_OUTPUT_FILE_NAME};
pub use error::{GenerationError, Result};
pub use gemini::{GeminiClient, ImageClient, TextClient};
pub use models::{
    ContentPart, GenerationRequest, GenerationResult, Orientation, Resolution,
};
pub use pipeline::{ImageGenerator, PipelineStage, ScenePipeline, TextGenerator};
