//! WebP encoding.
//!
//! With the `lossy-webp` feature the quality is honored through libwebp.
//! Without it the `image` crate's lossless encoder is used and quality is
//! ignored.

use super::{validate_rgba, EncodeError};

/// Encode RGBA pixel data to WebP bytes.
///
/// `quality` is clamped to 0-100 before reaching libwebp.
#[cfg(feature = "lossy-webp")]
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    validate_rgba(pixels, width, height)?;

    let quality = quality.clamp(0.0, 100.0);
    let memory = ::webp::Encoder::from_rgba(pixels, width, height)
        .encode_simple(false, quality)
        .map_err(|e| EncodeError::encoding_failed("WebP", format!("{e:?}")))?;

    Ok(memory.to_vec())
}

/// Encode RGBA pixel data to lossless WebP bytes. `quality` is ignored.
#[cfg(not(feature = "lossy-webp"))]
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    _quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    use image::codecs::webp::WebPEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    validate_rgba(pixels, width, height)?;

    let mut buffer = Vec::new();
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::encoding_failed("WebP", e.to_string()))?;

    Ok(buffer)
}
