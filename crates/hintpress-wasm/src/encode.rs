//! Encode dispatch WASM bindings.

use crate::hints::JsOptions;
use crate::to_js_error;
use crate::types::JsDecodedImage;
use hintpress_core::encode::{self, EncodeError};
use wasm_bindgen::prelude::*;

/// Encode an image with the given options.
///
/// `options` is optimized in place, so its `quality` and `width` reflect
/// what was used once this returns. Unsupported mimes are rejected with
/// `"Format <mime> is not supported"`.
///
/// # Example
///
/// ```typescript
/// const body = encode_image(image, options);
/// const res = new Response(body, { headers: { 'Content-Type': options.mime } });
/// ```
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, options: &mut JsOptions) -> Result<Vec<u8>, JsValue> {
    encode_js_image(image, options).map_err(to_js_error)
}

fn encode_js_image(image: &JsDecodedImage, options: &mut JsOptions) -> Result<Vec<u8>, EncodeError> {
    encode::encode_to_vec(&image.to_decoded(), options.inner_mut())
}
