//! Client-hint option derivation bindings.
//!
//! Signals are passed as a plain object:
//!
//! ```typescript
//! const options = derive_options(
//!   { headers: { DPR: '2', Width: '320' }, params: { 'save-data': '1' } },
//!   { default_mime: 'image/png' }, // optional
//! );
//! ```

use crate::to_js_error;
use hintpress_core::{ClientSignals, HintConfig, Options};
use wasm_bindgen::prelude::*;

/// Encoding options for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsOptions {
    inner: Options,
}

#[wasm_bindgen]
impl JsOptions {
    /// Create options for the given output mime with every hint unset.
    #[wasm_bindgen(constructor)]
    pub fn new(mime: String) -> JsOptions {
        JsOptions {
            inner: Options::new(mime),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime.clone()
    }

    #[wasm_bindgen(setter)]
    pub fn set_mime(&mut self, mime: String) {
        self.inner.mime = mime;
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(setter)]
    pub fn set_width(&mut self, width: u32) {
        self.inner.width = width;
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(setter)]
    pub fn set_height(&mut self, height: u32) {
        self.inner.height = height;
    }

    #[wasm_bindgen(getter)]
    pub fn dpr(&self) -> f64 {
        self.inner.dpr
    }

    #[wasm_bindgen(setter)]
    pub fn set_dpr(&mut self, dpr: f64) {
        self.inner.dpr = dpr;
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> i32 {
        self.inner.quality
    }

    #[wasm_bindgen(setter)]
    pub fn set_quality(&mut self, quality: i32) {
        self.inner.quality = quality;
    }

    #[wasm_bindgen(getter)]
    pub fn downlink(&self) -> f64 {
        self.inner.downlink
    }

    #[wasm_bindgen(setter)]
    pub fn set_downlink(&mut self, downlink: f64) {
        self.inner.downlink = downlink;
    }

    #[wasm_bindgen(getter)]
    pub fn viewport_width(&self) -> f64 {
        self.inner.viewport_width
    }

    #[wasm_bindgen(setter)]
    pub fn set_viewport_width(&mut self, viewport_width: f64) {
        self.inner.viewport_width = viewport_width;
    }

    #[wasm_bindgen(getter)]
    pub fn save_data(&self) -> bool {
        self.inner.save_data
    }

    #[wasm_bindgen(setter)]
    pub fn set_save_data(&mut self, save_data: bool) {
        self.inner.save_data = save_data;
    }

    /// Largest resize target width accepted by `encode_image`.
    #[wasm_bindgen(getter)]
    pub fn max_width(&self) -> u32 {
        self.inner.max_width
    }

    #[wasm_bindgen(setter)]
    pub fn set_max_width(&mut self, max_width: u32) {
        self.inner.max_width = max_width;
    }

    /// Largest resize target height accepted by `encode_image`.
    #[wasm_bindgen(getter)]
    pub fn max_height(&self) -> u32 {
        self.inner.max_height
    }

    #[wasm_bindgen(setter)]
    pub fn set_max_height(&mut self, max_height: u32) {
        self.inner.max_height = max_height;
    }

    #[wasm_bindgen(getter)]
    pub fn optimized(&self) -> bool {
        self.inner.is_optimized()
    }

    /// Finalize quality and width now instead of at encode time.
    pub fn optimize(&mut self) {
        self.inner.optimize();
    }
}

impl JsOptions {
    pub(crate) fn inner_mut(&mut self) -> &mut Options {
        &mut self.inner
    }
}

/// Derive options from `{ headers, params }` signals.
///
/// `config` may be `undefined` or `null`, in which case the defaults
/// (`image/jpeg`, derived quality, 4096x4096 resize bound) apply.
#[wasm_bindgen]
pub fn derive_options(signals: JsValue, config: JsValue) -> Result<JsOptions, JsValue> {
    let signals: ClientSignals = serde_wasm_bindgen::from_value(signals).map_err(to_js_error)?;
    let config: HintConfig = if config.is_undefined() || config.is_null() {
        HintConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
    };

    Ok(derive(&signals, &config))
}

fn derive(signals: &ClientSignals, config: &HintConfig) -> JsOptions {
    JsOptions {
        inner: hintpress_core::derive_options(signals, config),
    }
}

/// `Accept-CH` response header value.
#[wasm_bindgen]
pub fn accept_ch_header() -> String {
    hintpress_core::accept_ch_header().to_string()
}

/// `Vary` response header value for hint-shaped responses.
#[wasm_bindgen]
pub fn vary_header() -> String {
    hintpress_core::vary_header().to_string()
}


/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_derive_options_from_js_object() {
        let signals = ClientSignals::new().with_header("DPR", "1.5");
        let value = serde_wasm_bindgen::to_value(&signals).unwrap();

        let options = derive_options(value, JsValue::UNDEFINED).unwrap();
        assert_eq!(options.dpr(), 1.5);
        assert_eq!(options.mime(), "image/jpeg");
    }

    #[wasm_bindgen_test]
    fn test_derive_options_rejects_non_object() {
        assert!(derive_options(JsValue::from_f64(3.0), JsValue::UNDEFINED).is_err());
    }
}
