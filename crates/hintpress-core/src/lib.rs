//! hintpress core - client-hint driven image encoding
//!
//! This crate turns client hints (DPR, Width, Downlink, Save-Data, Accept)
//! into encoding options and re-encodes a decoded image accordingly.
//!
//! # Example
//!
//! ```ignore
//! use hintpress_core::{decode_image, derive_options, encode, ClientSignals, HintConfig};
//!
//! let signals = ClientSignals::new()
//!     .with_header("Accept", "image/webp,*/*")
//!     .with_header("DPR", "2")
//!     .with_header("Width", "320");
//! let mut options = derive_options(&signals, &HintConfig::default());
//!
//! let image = decode_image(&std::fs::read("photo.jpg")?)?;
//! let mut out = Vec::new();
//! encode(&mut out, &image, &mut options)?;
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod format;
pub mod options;

pub use config::HintConfig;
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode, encode_to_vec, EncodeError};
pub use format::OutputFormat;
pub use options::{accept_ch_header, derive_options, vary_header, ClientSignals, HintSource, Options};
