//! Instruction fragments for the enrichment call.
//!
//! The instruction is assembled from small fragments chosen by
//! [`TemplateOptions`], so each policy can be checked on its own.

use crate::models::Orientation;

const PREAMBLE: &str = "Given the following Story Context and Scene Description \
(which may be written in any language), generate a high-quality English prompt for an \
image generation model.";

const EMBEDDED_TEXT_ON: &str = "Ensure that the words of the Scene Description are \
clearly visible and well-integrated into the image, rendered naturally on in-scene \
surfaces such as signboards, banners, walls, papers or cloth. The text must be readable, \
not distorted, and never overlaid on top of the picture.";

const EMBEDDED_TEXT_OFF: &str = "Depict the environment, mood and action only. Do NOT \
render any text, letters, numbers, labels or written words anywhere in the image.";

const CHARACTER_POLICY: &str = "### VERY IMPORTANT:\n\
- Only include characters that are explicitly mentioned in the Scene Description.\n\
- Do NOT add characters based solely on the Story Context, even if the story implies them.\n\
- If no characters are described in the scene, focus entirely on setting, mood and environment.";

const QUALITY: &str = "The image should be:\n\
- Photorealistic, ultra high resolution (8K or higher) and correctly proportioned.\n\
- Highly detailed, with realistic lighting, shadows, materials (skin, fabric) and environment.\n\
- Accurate human proportions; avoid distorted or stretched characters.\n\
- Cinematic in tone, with natural lighting, composition and camera depth.\n\
- Time of day and weather conditions should feel natural.";

const DETAIL: &str = "Be very specific about (only when relevant):\n\
- Characters: age, height, posture, relative scale, facial expressions, clothing.\n\
- Scene layout, only when characters are present: who is in the center, who is on the \
left or right, who is sitting or standing, spaced realistically in the frame.\n\
- Setting: background, objects, landscape.\n\
- Lighting: morning sunlight, golden hour, shadows.\n\
- Mood: sad, tense, joyful.\n\
- Camera angle and framing: wide shot, medium shot, aerial view, waist-up.";

const CLOSING: &str = "Now generate a precise and visually rich English prompt for the \
image, only including characters if they are mentioned in the Scene Description. The \
result must match the scene faithfully with cinematic detail and realistic layout. \
Reply with the prompt only.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateOptions {
    pub orientation: Orientation,
    pub include_embedded_text: bool,
}

impl TemplateOptions {
    pub fn new(orientation: Orientation, include_embedded_text: bool) -> Self {
        Self {
            orientation,
            include_embedded_text,
        }
    }
}

pub fn aspect_fragment(orientation: Orientation) -> String {
    let label = orientation.aspect_ratio_label();
    match orientation {
        Orientation::Landscape => {
            format!("The image MUST have a precise {} widescreen aspect ratio.", label)
        }
        Orientation::Portrait => format!(
            "It MUST have a {} portrait aspect ratio, ideal for vertical display such as \
             mobile screens or YouTube Shorts.",
            label
        ),
    }
}

pub fn embedded_text_fragment(include_embedded_text: bool) -> &'static str {
    if include_embedded_text {
        EMBEDDED_TEXT_ON
    } else {
        EMBEDDED_TEXT_OFF
    }
}

pub fn character_policy_fragment() -> &'static str {
    CHARACTER_POLICY
}

fn inputs_fragment(scene_text: &str, story_context: &str) -> String {
    format!(
        "Story Context:\n{}\n\nScene Description:\n\"{}\"",
        story_context.trim(),
        scene_text.trim()
    )
}

#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    options: TemplateOptions,
}

impl PromptTemplate {
    pub fn new(options: TemplateOptions) -> Self {
        Self { options }
    }

    /// Ordered fragments, before the user inputs are appended.
    pub fn fragments(&self) -> Vec<String> {
        vec![
            PREAMBLE.to_string(),
            aspect_fragment(self.options.orientation),
            embedded_text_fragment(self.options.include_embedded_text).to_string(),
            QUALITY.to_string(),
            character_policy_fragment().to_string(),
            DETAIL.to_string(),
        ]
    }

    pub fn render(&self, scene_text: &str, story_context: &str) -> String {
        let mut sections = self.fragments();
        sections.push(inputs_fragment(scene_text, story_context));
        sections.push(CLOSING.to_string());
        sections.join("\n\n")
    }
}
