use thiserror::Error;

use crate::decode::DecodeError;

/// Errors that can occur while encoding an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The requested mime is not one of the supported output formats
    #[error("Format {mime} is not supported")]
    UnsupportedFormat { mime: String },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero, or the RGBA buffer size does not fit in `usize`
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },

    /// Resizing to the requested target failed
    #[error("Resize failed: {0}")]
    Resize(#[from] DecodeError),

    /// Writing the encoded bytes to the sink failed
    #[error("Failed to write encoded image: {0}")]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    pub fn encoding_failed(format: &'static str, message: impl Into<String>) -> Self {
        EncodeError::EncodingFailed {
            format,
            message: message.into(),
        }
    }

    /// Maps encode errors to HTTP status codes
    ///
    /// - UnsupportedFormat → 415 (Unsupported Media Type)
    /// - InvalidPixelData, InvalidDimensions, Resize → 400 (Bad Request)
    /// - EncodingFailed, Io → 500 (Internal Server Error)
    pub fn to_http_status(&self) -> u16 {
        match self {
            EncodeError::UnsupportedFormat { .. } => 415,
            EncodeError::InvalidPixelData { .. }
            | EncodeError::InvalidDimensions { .. }
            | EncodeError::Resize(_) => 400,
            EncodeError::EncodingFailed { .. } | EncodeError::Io(_) => 500,
        }
    }
}
