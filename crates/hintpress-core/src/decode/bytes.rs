//! Decoding of encoded image bytes into RGBA buffers.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, DecodedImage};

/// Decode an image from bytes in any format the `image` crate recognizes.
///
/// The pixel data is converted to RGBA8 regardless of the source layout.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be guessed and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(DecodedImage::from_rgba_image(img.into_rgba8()))
}
