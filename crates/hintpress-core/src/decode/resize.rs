//! Image resizing through the `image` crate's resamplers.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use image::imageops::FilterType;

use super::{DecodeError, DecodedImage};

/// Bicubic (Catmull-Rom) resampling.
const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidTarget` if either target dimension is zero, and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// source dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidTarget { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba_image = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, RESAMPLE_FILTER);

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Resize an image where a zero target dimension means "keep aspect ratio".
///
/// When both `width` and `height` are zero the image is returned unchanged.
/// The resolved target must fit within `max_width` x `max_height`; it is
/// checked before any pixel buffer is allocated.
///
/// # Errors
///
/// Same as [`resize`]. An empty source image cannot be scaled, and an
/// oversized target fails with `DecodeError::TargetTooLarge`.
pub fn resize_to_target(
    image: &DecodedImage,
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> Result<DecodedImage, DecodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let (target_width, target_height) =
        target_dimensions(image.width, image.height, width, height);

    if target_width > max_width || target_height > max_height {
        return Err(DecodeError::TargetTooLarge {
            width: target_width,
            height: target_height,
            max_width,
            max_height,
        });
    }

    resize(image, target_width, target_height)
}

/// Fill in a zero target dimension from the source aspect ratio.
///
/// The derived side is `(0.7 + src / scale) as u32`, where `scale` is the
/// source-to-target ratio of the side that was given.
pub(crate) fn target_dimensions(
    src_width: u32,
    src_height: u32,
    width: u32,
    height: u32,
) -> (u32, u32) {
    let (src_w, src_h) = (src_width as f64, src_height as f64);

    let (scale_x, scale_y) = match (width, height) {
        (0, 0) => (1.0, 1.0),
        (0, h) => {
            let scale = src_h / h as f64;
            (scale, scale)
        }
        (w, 0) => {
            let scale = src_w / w as f64;
            (scale, scale)
        }
        (w, h) => (src_w / w as f64, src_h / h as f64),
    };

    let width = if width == 0 {
        (0.7 + src_w / scale_x) as u32
    } else {
        width
    };
    let height = if height == 0 {
        (0.7 + src_h / scale_y) as u32
    } else {
        height
    };

    (width, height)
}
