//! Image decoding WASM bindings.

use crate::to_js_error;
use crate::types::JsDecodedImage;
use hintpress_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG, PNG, WebP or GIF bytes into an RGBA image.
///
/// # Example
///
/// ```typescript
/// const image = decode_image(new Uint8Array(await response.arrayBuffer()));
/// console.log(`Decoded ${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}
