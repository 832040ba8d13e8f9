use crate::error::DenoiseError;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

/// JPEG quality used for the round-trip (1-100, lower = more artifacts)
pub const JPEG_QUALITY: u8 = 5;

/// Re-encode as a low-quality JPEG and decode it again
/// Deterministic: the same input always yields the same artifacts
pub fn apply(image: &RgbImage) -> Result<RgbImage, DenoiseError> {
    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
    image
        .write_with_encoder(encoder)
        .map_err(|e| DenoiseError::Encoding(format!("JPEG encode failed: {}", e)))?;

    let decoded = image::load_from_memory_with_format(&encoded, ImageFormat::Jpeg)
        .map_err(|e| DenoiseError::Encoding(format!("JPEG decode failed: {}", e)))?;

    Ok(decoded.into_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{synthesize, SampleId};

    #[test]
    fn test_compression_is_deterministic() {
        let img = synthesize(SampleId(1));
        let a = apply(&img).unwrap();
        let b = apply(&img).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_compression_introduces_artifacts() {
        let img = synthesize(SampleId(3));
        let result = apply(&img).unwrap();
        assert_eq!(result.dimensions(), img.dimensions());
        assert_ne!(result, img);
    }
}
