use serde::{Deserialize, Serialize};

/// Caller-side defaults applied before client hints are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintConfig {
    /// Output mime used when the Accept header does not advertise WebP
    #[serde(default = "default_mime")]
    pub default_mime: String,

    /// Fixed quality; 0 lets the heuristic derive one
    #[serde(default)]
    pub default_quality: i32,

    /// Target height; 0 keeps the aspect ratio when resizing
    #[serde(default)]
    pub default_height: u32,

    /// Largest resize target width the encoder accepts
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Largest resize target height the encoder accepts
    #[serde(default = "default_max_height")]
    pub max_height: u32,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            default_mime: default_mime(),
            default_quality: 0,
            default_height: 0,
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Resize bound used when none is configured.
pub(crate) const DEFAULT_MAX_DIMENSION: u32 = 4096;

fn default_mime() -> String {
    "image/jpeg".to_string()
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_max_height() -> u32 {
    DEFAULT_MAX_DIMENSION
}
