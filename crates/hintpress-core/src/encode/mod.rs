//! Encode dispatch.
//!
//! [`encode`] finalizes the options, resizes through the bicubic resampler
//! when a width was requested, and hands the pixels to the codec named by
//! `Options::mime`:
//!
//! | mime | codec | quality |
//! |---|---|---|
//! | `image/jpeg` | [`encode_jpeg`] | clamped to 1-100 |
//! | `image/png` | [`encode_png`] | ignored |
//! | `image/webp` | [`encode_webp`] | clamped to 0-100, as `f32` |
//! | `image/gif` | [`encode_gif`] | ignored |
//!
//! Anything else is rejected with [`EncodeError::UnsupportedFormat`] before any
//! pixel work happens. A resize target larger than
//! `Options::max_width` x `Options::max_height` is rejected before resampling. Encoded bytes are buffered and written to the sink in
//! one `write_all`, so a failed encode leaves the sink untouched.

mod error;
mod gif;
mod jpeg;
mod png;
mod webp;

pub use error::EncodeError;
pub use gif::encode_gif;
pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use self::webp::encode_webp;

use std::borrow::Cow;
use std::io::Write;
use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::decode::{resize_to_target, DecodedImage};
use crate::format::OutputFormat;
use crate::options::Options;

const JPEG_QUALITY: RangeInclusive<i32> = 1..=100;
const WEBP_QUALITY: RangeInclusive<i32> = 0..=100;

/// Encode `image` into `sink` according to `options`.
///
/// `options` is optimized in place first (a no-op if that already happened).
///
/// # Errors
///
/// * [`EncodeError::UnsupportedFormat`] when `mime` is not a supported format;
///   nothing is written.
/// * [`EncodeError::Resize`] when the resize target is unusable or exceeds
///   the bounds carried by `options`.
/// * [`EncodeError::EncodingFailed`] / pixel validation errors from the codec.
/// * [`EncodeError::Io`] when the sink rejects the bytes.
pub fn encode<W: Write>(
    sink: &mut W,
    image: &DecodedImage,
    options: &mut Options,
) -> Result<(), EncodeError> {
    let bytes = encode_to_vec(image, options)?;
    sink.write_all(&bytes)?;
    Ok(())
}

/// Like [`encode`], returning the encoded bytes.
pub fn encode_to_vec(image: &DecodedImage, options: &mut Options) -> Result<Vec<u8>, EncodeError> {
    options.optimize();

    let Some(format) = options.output_format() else {
        warn!(mime = %options.mime, "unsupported output format requested");
        return Err(EncodeError::UnsupportedFormat {
            mime: options.mime.clone(),
        });
    };

    let image = if options.width > 0 {
        let (width, height) = (options.resize_width(), options.height);
        debug!(
            from_width = image.width,
            from_height = image.height,
            width,
            height,
            "resizing before encode"
        );
        let resized = resize_to_target(
            image,
            width,
            height,
            options.max_width,
            options.max_height,
        )
        .inspect_err(|err| warn!(%err, "resize rejected"))?;
        Cow::Owned(resized)
    } else {
        Cow::Borrowed(image)
    };

    let bytes = encode_format(format, &image, options.quality)?;

    debug!(
        %format,
        width = image.width,
        height = image.height,
        quality = options.quality,
        bytes = bytes.len(),
        "image encoded"
    );

    Ok(bytes)
}

/// Run the codec for `format`.
fn encode_format(
    format: OutputFormat,
    image: &DecodedImage,
    quality: i32,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height, pixels) = (image.width, image.height, &image.pixels);

    match format {
        OutputFormat::Jpeg => {
            let quality = codec_quality(format, quality, JPEG_QUALITY);
            encode_jpeg(pixels, width, height, quality as u8)
        }
        OutputFormat::Png => encode_png(pixels, width, height),
        OutputFormat::WebP => {
            let quality = codec_quality(format, quality, WEBP_QUALITY);
            encode_webp(pixels, width, height, quality as f32)
        }
        OutputFormat::Gif => encode_gif(pixels, width, height),
    }
}

/// Clamp a derived quality into the range a codec accepts.
fn codec_quality(format: OutputFormat, quality: i32, range: RangeInclusive<i32>) -> i32 {
    let clamped = quality.clamp(*range.start(), *range.end());
    if clamped != quality {
        warn!(%format, quality, clamped, "quality outside codec range");
    }
    clamped
}

/// Check an RGBA buffer against its dimensions.
fn validate_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = DecodedImage::expected_len(width, height)
        .ok_or(EncodeError::InvalidDimensions { width, height })?;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
