use std::io::Cursor;

use image::{imageops::FilterType, DynamicImage, ImageFormat};

use crate::{
    error::{GenerationError, Result},
    models::Resolution,
};

pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(GenerationError::Decode("inline image payload is empty".into()));
    }
    image::load_from_memory(bytes).map_err(|e| {
        log::debug!("Failed to decode image: {}", e);
        GenerationError::Decode(e.to_string())
    })
}

/// Stretches to exactly `target`; aspect is not preserved.
pub fn resize_exact(image: &DynamicImage, target: Resolution) -> DynamicImage {
    if image.width() == target.width && image.height() == target.height {
        return image.clone();
    }
    image.resize_exact(target.width, target.height, FilterType::Lanczos3)
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut output = Cursor::new(Vec::new());
    image
        .write_to(&mut output, ImageFormat::Png)
        .map_err(|e| GenerationError::Encode(e.to_string()))?;
    Ok(output.into_inner())
}

/// Decodes `bytes`, stretches to `target` and re-encodes as PNG.
pub fn render_png(bytes: &[u8], target: Resolution) -> Result<Vec<u8>> {
    let source = decode(bytes)?;
    log::debug!(
        "Resizing {}x{} image to {}",
        source.width(),
        source.height(),
        target
    );
    encode_png(&resize_exact(&source, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 255) as u8, (y % 255) as u8, 90]));
        encode_png(&DynamicImage::ImageRgb8(image)).unwrap()
    }

    #[test]
    fn test_render_png_landscape_round_trip() {
        let png = render_png(&sample_png(64, 64), Resolution::new(1920, 1080)).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1920, 1080));
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_render_png_portrait_stretches() {
        let png = render_png(&sample_png(40, 30), Resolution::new(1080, 1920)).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1080, 1920));
    }

    #[test]
    fn test_render_png_accepts_webp_source() {
        let source = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            16,
            9,
            image::Rgba([200, 40, 40, 255]),
        ));
        let mut webp = Cursor::new(Vec::new());
        source.write_to(&mut webp, ImageFormat::WebP).unwrap();

        let png = render_png(&webp.into_inner(), Resolution::new(1920, 1080)).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1920, 1080));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(GenerationError::Decode(_))
        ));
        assert!(matches!(decode(&[]), Err(GenerationError::Decode(_))));
    }
}
