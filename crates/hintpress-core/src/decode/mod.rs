//! Decoded image buffers and the resize collaborator.
//!
//! Decoding and resampling are delegated to the `image` crate. This module
//! only adapts them to the RGBA `DecodedImage` buffer the encoder consumes.

mod bytes;
mod resize;
mod types;

pub use bytes::decode_image;
pub use resize::{resize, resize_to_target};
pub use types::{DecodeError, DecodedImage};
