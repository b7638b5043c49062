//! hintpress WASM - WebAssembly bindings for hintpress
//!
//! This crate exposes the hintpress-core option derivation and encode
//! dispatch to JavaScript, e.g. a service worker or edge runtime that
//! re-encodes images per request.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for decoded image data
//! - `hints` - Client-hint option derivation
//! - `decode` - Image decoding bindings
//! - `encode` - Encode dispatch bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, derive_options, encode_image } from '@hintpress/wasm';
//!
//! await init();
//!
//! const options = derive_options({
//!   headers: Object.fromEntries(request.headers),
//!   params: Object.fromEntries(new URL(request.url).searchParams),
//! });
//! const image = decode_image(new Uint8Array(await source.arrayBuffer()));
//! const body = encode_image(image, options);
//! return new Response(body, { headers: { 'Content-Type': options.mime, Vary: vary_header() } });
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod hints;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::encode_image;
pub use hints::{accept_ch_header, derive_options, vary_header, JsOptions};
pub use types::JsDecodedImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert any displayable error into a JavaScript error value.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
