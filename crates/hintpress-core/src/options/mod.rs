//! Encoding options derived from client hints.
//!
//! An [`Options`] value is created per request, filled from client signals by
//! [`derive_options`] (or [`Options::apply_signals`]), finalized once by
//! [`Options::optimize`] and consumed by [`crate::encode::encode`].
//!
//! # Quality heuristic
//!
//! When no quality was requested, it is derived from the hints:
//!
//! * base: `100 - dpr * 30`
//! * slow link (`0 < downlink < 1` Mbps): multiplied by `downlink`
//! * Save-Data: multiplied by `0.75`
//!
//! Each step truncates toward zero. The result is not clamped here; codecs
//! clamp to their own legal range when encoding.

mod hints;

pub use hints::{accept_ch_header, derive_options, vary_header, ClientSignals, HintSource};

use tracing::debug;

use crate::config::{HintConfig, DEFAULT_MAX_DIMENSION};
use crate::format::OutputFormat;

/// Quality before any density or network reduction.
const BASE_QUALITY: f64 = 100.0;

/// Quality removed per unit of device pixel ratio.
const QUALITY_PER_DPR: f64 = 30.0;

/// Multiplier applied when the client asked to save data.
const SAVE_DATA_FACTOR: f32 = 0.75;

/// Client-hint compatible options for image encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Requested output mime, e.g. `"image/jpeg"`
    pub mime: String,
    /// Target width in pixels (0 = keep source width)
    pub width: u32,
    /// Target height in pixels (0 = keep aspect ratio)
    pub height: u32,
    /// Device pixel ratio (0 = unset, treated as 1)
    pub dpr: f64,
    /// Encoder quality (0 = derive from hints)
    pub quality: i32,
    /// Estimated downlink in Mbps (0 = unknown)
    pub downlink: f64,
    /// Layout viewport width in CSS pixels, advisory only
    pub viewport_width: f64,
    /// Client asked for reduced data usage
    pub save_data: bool,
    /// Largest resize target width accepted at encode time
    pub max_width: u32,
    /// Largest resize target height accepted at encode time
    pub max_height: u32,
    optimized: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mime: String::new(),
            width: 0,
            height: 0,
            dpr: 0.0,
            quality: 0,
            downlink: 0.0,
            viewport_width: 0.0,
            save_data: false,
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            optimized: false,
        }
    }
}

impl Options {
    /// Create options targeting the given mime with everything else unset.
    pub fn new(mime: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            ..Default::default()
        }
    }

    /// Create options seeded with caller defaults.
    pub fn from_config(config: &HintConfig) -> Self {
        Self {
            mime: config.default_mime.clone(),
            quality: config.default_quality,
            height: config.default_height,
            max_width: config.max_width,
            max_height: config.max_height,
            ..Default::default()
        }
    }

    /// Whether [`Options::optimize`] has already run.
    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    /// Finalize the derived fields. Runs at most once per instance.
    ///
    /// Scales `width` by `dpr`, normalizes an unset `dpr` to 1 and, when no
    /// quality was requested, derives one from `dpr`, `downlink` and
    /// `save_data`.
    pub fn optimize(&mut self) {
        if self.optimized {
            return;
        }

        if self.width > 0 {
            self.width = (self.width as f64 * self.dpr) as u32;
        }

        if self.dpr == 0.0 {
            self.dpr = 1.0;
        }

        if self.quality == 0 {
            self.quality = (BASE_QUALITY - self.dpr * QUALITY_PER_DPR) as i32;

            if self.downlink > 0.0 && self.downlink < 1.0 {
                self.quality = (self.quality as f32 * self.downlink as f32) as i32;
            }

            if self.save_data {
                self.quality = (self.quality as f32 * SAVE_DATA_FACTOR) as i32;
            }
        }

        self.optimized = true;

        debug!(
            mime = %self.mime,
            width = self.width,
            height = self.height,
            dpr = self.dpr,
            quality = self.quality,
            "options optimized"
        );
    }

    /// Width handed to the resizer.
    ///
    /// `optimize` has already multiplied `width` by `dpr`; the resize target
    /// multiplies by `dpr` once more, so a 100px hint at dpr 2 resizes to 400px.
    pub fn resize_width(&self) -> u32 {
        (self.width as f64 * self.dpr) as u32
    }

    /// The output format named by `mime`, if it is one the encoder supports.
    pub fn output_format(&self) -> Option<OutputFormat> {
        OutputFormat::from_mime(&self.mime)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
