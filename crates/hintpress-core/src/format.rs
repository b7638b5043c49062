//! Output formats the encode dispatcher knows how to produce.

use std::fmt;

/// Output image format, selected by exact mime identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl OutputFormat {
    /// Every format the dispatcher can encode.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Jpeg,
        OutputFormat::Png,
        OutputFormat::WebP,
        OutputFormat::Gif,
    ];

    /// Resolve a mime identifier.
    ///
    /// Matching is exact: `"image/jpg"`, `"IMAGE/PNG"` or a mime with
    /// parameters are not recognized.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.mime() == mime)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_known() {
        assert_eq!(OutputFormat::from_mime("image/jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_mime("image/png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_mime("image/webp"), Some(OutputFormat::WebP));
        assert_eq!(OutputFormat::from_mime("image/gif"), Some(OutputFormat::Gif));
    }

    #[test]
    fn test_from_mime_is_exact() {
        assert_eq!(OutputFormat::from_mime(""), None);
        assert_eq!(OutputFormat::from_mime("image/bmp"), None);
        assert_eq!(OutputFormat::from_mime("image/jpg"), None);
        assert_eq!(OutputFormat::from_mime("IMAGE/PNG"), None);
        assert_eq!(OutputFormat::from_mime("image/webp;q=0.9"), None);
    }

    #[test]
    fn test_mime_round_trip_for_all() {
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::from_mime(format.mime()), Some(format));
        }
    }

    #[test]
    fn test_display_uses_extension() {
        assert_eq!(OutputFormat::Jpeg.to_string(), "jpg");
        assert_eq!(OutputFormat::WebP.to_string(), "webp");
    }
}
