use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};

use crate::{
    error::Result,
    imaging,
    models::{
        ContentPart, GenerationResult, ImageGenerationRequest, ImageGenerationResponse,
        Resolution,
    },
};

use super::traits::ImageGenerator;

/// The first inline image found by [`select_first_image`], plus the text
/// parts that preceded it. `data` is still base64 encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
    pub leading_text: Vec<&'a str>,
}

impl SelectedImage<'_> {
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(general_purpose::STANDARD.decode(self.data.as_bytes())?)
    }
}

/// Linear scan in response order; stops at the first inline image.
pub fn select_first_image(parts: &[ContentPart]) -> Option<SelectedImage<'_>> {
    let mut leading_text = Vec::new();
    for part in parts {
        match part {
            ContentPart::Text(text) => {
                if !text.trim().is_empty() {
                    leading_text.push(text.as_str());
                }
            }
            ContentPart::InlineImage { mime_type, data } => {
                return Some(SelectedImage {
                    mime_type: mime_type.as_str(),
                    data: data.as_str(),
                    leading_text,
                });
            }
        }
    }
    None
}

/// Stage two: renders the enriched prompt into PNG bytes at a fixed size.
#[derive(Clone)]
pub struct ImageRequester {
    generator: Arc<dyn ImageGenerator>,
}

impl ImageRequester {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    pub async fn request(&self, prompt: &str, target: Resolution) -> Result<GenerationResult> {
        let response = self
            .generator
            .generate_image(ImageGenerationRequest::new(prompt))
            .await?;
        Self::finish(&response, target)
    }

    /// Turns a service response into the caller-facing result. A response
    /// without any image part is a result, not an error. Only the selected
    /// part is decoded; later image parts are ignored.
    pub fn finish(
        response: &ImageGenerationResponse,
        target: Resolution,
    ) -> Result<GenerationResult> {
        match select_first_image(&response.parts) {
            Some(selected) => {
                let png = imaging::render_png(&selected.decode()?, target)?;
                let explanation = if selected.leading_text.is_empty() {
                    None
                } else {
                    Some(selected.leading_text.join("\n"))
                };
                Ok(GenerationResult::image_ready(
                    png,
                    selected.mime_type.to_string(),
                    explanation,
                ))
            }
            None => {
                let explanation = response
                    .aggregate_text()
                    .or_else(|| {
                        response
                            .block_reason
                            .as_ref()
                            .map(|reason| format!("prompt blocked: {}", reason))
                    })
                    .or_else(|| {
                        response
                            .finish_reason
                            .as_ref()
                            .map(|reason| format!("generation stopped: {}", reason))
                    });
                log::warn!(
                    "Model {} returned {} parts but no image",
                    response.model,
                    response.parts.len()
                );
                Ok(GenerationResult::no_image(explanation))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use image::{DynamicImage, RgbaImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        imaging::encode_png(&DynamicImage::ImageRgba8(RgbaImage::new(width, height))).unwrap()
    }

    fn image_part(mime: &str, data: &[u8]) -> ContentPart {
        ContentPart::InlineImage {
            mime_type: mime.to_string(),
            data: general_purpose::STANDARD.encode(data),
        }
    }

    fn raw_image_part(mime: &str, data: &str) -> ContentPart {
        ContentPart::InlineImage {
            mime_type: mime.to_string(),
            data: data.to_string(),
        }
    }

    fn response(parts: Vec<ContentPart>) -> ImageGenerationResponse {
        ImageGenerationResponse {
            parts,
            model: "fake-image".into(),
            block_reason: None,
            finish_reason: None,
        }
    }

    #[test]
    fn test_first_image_wins() {
        let parts = vec![
            ContentPart::Text("intro".into()),
            image_part("image/png", &[0xA]),
            ContentPart::Text("between".into()),
            image_part("image/jpeg", &[0xB]),
        ];
        let selected = select_first_image(&parts).unwrap();
        assert_eq!(selected.decode().unwrap(), vec![0xAu8]);
        assert_eq!(selected.mime_type, "image/png");
        assert_eq!(selected.leading_text, vec!["intro"]);
    }

    #[test]
    fn test_no_image_selected_from_text_only() {
        let parts = vec![ContentPart::Text("sorry".into())];
        assert!(select_first_image(&parts).is_none());
        assert!(select_first_image(&[]).is_none());
    }

    #[test]
    fn test_finish_resizes_selected_image() {
        let resp = response(vec![
            ContentPart::Text("Here is your scene.".into()),
            image_part("image/png", &png(32, 18)),
            ContentPart::Text("trailing".into()),
            image_part("image/png", b"never decoded"),
        ]);
        let result = ImageRequester::finish(&resp, Resolution::new(1920, 1080)).unwrap();

        assert!(result.succeeded);
        assert_eq!(result.mime_type.as_deref(), Some("image/png"));
        assert_eq!(result.explanation_text.as_deref(), Some("Here is your scene."));
        let decoded = image::load_from_memory(result.image_bytes.as_ref().unwrap()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1920, 1080));
    }

    #[test]
    fn test_finish_without_image_is_not_an_error() {
        let resp = response(vec![
            ContentPart::Text("I can only describe it.".into()),
            ContentPart::Text("A tree by a well.".into()),
        ]);
        let result = ImageRequester::finish(&resp, Resolution::new(1080, 1920)).unwrap();

        assert!(!result.succeeded);
        assert!(result.image_bytes.is_none());
        assert_eq!(
            result.explanation_text.as_deref(),
            Some("I can only describe it.\nA tree by a well.")
        );
    }

    #[test]
    fn test_finish_reports_block_reason() {
        let mut resp = response(Vec::new());
        resp.block_reason = Some("SAFETY".into());
        let result = ImageRequester::finish(&resp, Resolution::new(1920, 1080)).unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.explanation_text.as_deref(), Some("prompt blocked: SAFETY"));
    }

    #[test]
    fn test_finish_with_corrupt_image_is_decode_failure() {
        let resp = response(vec![image_part("image/png", b"\x89PNG broken")]);
        let err = ImageRequester::finish(&resp, Resolution::new(1920, 1080)).unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[test]
    fn test_corrupt_later_image_part_is_ignored() {
        let resp = response(vec![
            ContentPart::Text("Here you go.".into()),
            image_part("image/png", &png(8, 8)),
            ContentPart::Text("And another.".into()),
            raw_image_part("image/png", "%%%not-base64%%%"),
        ]);
        let result = ImageRequester::finish(&resp, Resolution::new(1920, 1080)).unwrap();

        assert!(result.succeeded);
        assert_eq!(result.explanation_text.as_deref(), Some("Here you go."));
        let decoded = image::load_from_memory(result.image_bytes.as_ref().unwrap()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1920, 1080));
    }

    #[test]
    fn test_selected_part_with_bad_base64_is_decode_failure() {
        let resp = response(vec![raw_image_part("image/png", "%%%")]);
        let err = ImageRequester::finish(&resp, Resolution::new(1920, 1080)).unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[test]
    fn test_finish_falls_back_to_finish_reason() {
        let mut resp = response(Vec::new());
        resp.finish_reason = Some("IMAGE_SAFETY".into());
        let result = ImageRequester::finish(&resp, Resolution::new(1920, 1080)).unwrap();
        assert!(!result.succeeded);
        assert_eq!(
            result.explanation_text.as_deref(),
            Some("generation stopped: IMAGE_SAFETY")
        );
    }
}
