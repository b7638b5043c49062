//! GIF encoding with the codec's default palette quantization.

use image::codecs::gif::GifEncoder;
use image::ExtendedColorType;

use super::{validate_rgba, EncodeError};

/// Encode RGBA pixel data to a single-frame GIF.
///
/// GIF dimensions are limited to 65535 pixels per side; larger images are
/// reported as `EncodingFailed`.
pub fn encode_gif(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgba(pixels, width, height)?;

    let mut buffer = Vec::new();
    {
        // The trailer is written when the encoder is dropped.
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder
            .encode(pixels, width, height, ExtendedColorType::Rgba8)
            .map_err(|e| EncodeError::encoding_failed("GIF", e.to_string()))?;
    }

    Ok(buffer)
}
