//! Client-hint extraction.
//!
//! Every field is read from an ordered list of [`HintSource`]s. The first
//! source whose value parses wins; missing or malformed values fall through
//! to the next source and finally to a fixed default. Nothing here fails.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, trace};

use super::Options;
use crate::config::HintConfig;
use crate::format::OutputFormat;

const DPR_SOURCES: [HintSource; 2] = [HintSource::Header("DPR"), HintSource::Param("dpr")];
const SAVE_DATA_SOURCES: [HintSource; 2] = [
    HintSource::Header("Save-Data"),
    HintSource::Param("save-data"),
];
const VIEWPORT_WIDTH_SOURCES: [HintSource; 2] = [
    HintSource::Header("Viewport-Width"),
    HintSource::Param("viewport-width"),
];
const WIDTH_SOURCES: [HintSource; 2] = [HintSource::Header("Width"), HintSource::Param("width")];
const DOWNLINK_SOURCES: [HintSource; 2] = [
    HintSource::Header("Downlink"),
    HintSource::Param("downlink"),
];

/// Raw request signals: headers plus query/form parameters.
///
/// Header names are stored lowercased and matched case-insensitively;
/// parameter names are matched exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSignals {
    #[serde(default, deserialize_with = "lowercase_names")]
    headers: HashMap<String, String>,
    #[serde(default)]
    params: HashMap<String, String>,
}

/// Lowercase header names. Names that collide after lowercasing resolve in
/// byte order of the original spelling, so the all-lowercase one wins.
fn lowercase_names<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect())
}

impl ClientSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header, replacing any earlier one whose name differs only in case.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// One place a client hint can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintSource {
    Header(&'static str),
    Param(&'static str),
}

impl HintSource {
    pub fn lookup<'a>(&self, signals: &'a ClientSignals) -> Option<&'a str> {
        match self {
            HintSource::Header(name) => signals.header(name),
            HintSource::Param(name) => signals.param(name),
        }
    }
}

/// First value among `sources` that parses as `T`.
fn first_parsed<T: FromStr>(signals: &ClientSignals, sources: &[HintSource]) -> Option<T> {
    sources.iter().find_map(|source| {
        let raw = source.lookup(signals)?;
        match raw.parse() {
            Ok(value) => {
                trace!(?source, raw, "client hint parsed");
                Some(value)
            }
            Err(_) => {
                trace!(?source, raw, "client hint ignored");
                None
            }
        }
    })
}

/// Whether any of `sources` carries exactly `expected`.
fn any_equals(signals: &ClientSignals, sources: &[HintSource], expected: &str) -> bool {
    sources
        .iter()
        .any(|source| source.lookup(signals) == Some(expected))
}

impl Options {
    /// Overwrite hint-driven fields from the request signals.
    ///
    /// `mime` is only replaced when the Accept header advertises WebP and
    /// `width` only when a positive value is found; every other field gets
    /// its parsed value or its default.
    pub fn apply_signals(&mut self, signals: &ClientSignals) {
        if signals
            .header("Accept")
            .is_some_and(|accept| accept.contains(OutputFormat::WebP.mime()))
        {
            self.mime = OutputFormat::WebP.mime().to_string();
        }

        self.dpr = first_parsed(signals, &DPR_SOURCES).unwrap_or(1.0);

        self.save_data = any_equals(signals, &SAVE_DATA_SOURCES, "1");

        self.viewport_width = first_parsed(signals, &VIEWPORT_WIDTH_SOURCES).unwrap_or(0.0);

        let width: i64 = first_parsed(signals, &WIDTH_SOURCES).unwrap_or(0);
        if width > 0 {
            self.width = u32::try_from(width).unwrap_or(u32::MAX);
        }

        self.downlink = first_parsed(signals, &DOWNLINK_SOURCES).unwrap_or(0.0);

        debug!(
            mime = %self.mime,
            dpr = self.dpr,
            width = self.width,
            downlink = self.downlink,
            save_data = self.save_data,
            "client hints applied"
        );
    }
}

/// Build request options from caller defaults and client signals.
pub fn derive_options(signals: &ClientSignals, config: &HintConfig) -> Options {
    let mut options = Options::from_config(config);
    options.apply_signals(signals);
    options
}

/// `Accept-CH` response header value naming the hints read here.
pub fn accept_ch_header() -> &'static str {
    "DPR, Width, Viewport-Width, Downlink, Save-Data"
}

/// `Vary` response header value for responses shaped by client hints.
pub fn vary_header() -> &'static str {
    "Accept, DPR, Width, Viewport-Width, Downlink, Save-Data"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(signals: ClientSignals) -> Options {
        derive_options(&signals, &HintConfig::default())
    }

    #[test]
    fn test_no_signals_uses_defaults() {
        let options = derive(ClientSignals::new());

        assert_eq!(options.mime, "image/jpeg");
        assert_eq!(options.dpr, 1.0);
        assert!(!options.save_data);
        assert_eq!(options.viewport_width, 0.0);
        assert_eq!(options.width, 0);
        assert_eq!(options.downlink, 0.0);
        assert!(!options.is_optimized());
    }

    #[test]
    fn test_accept_webp_selects_webp() {
        let options = derive(ClientSignals::new().with_header(
            "Accept",
            "image/avif,image/webp,image/apng,*/*;q=0.8",
        ));
        assert_eq!(options.mime, "image/webp");
    }

    #[test]
    fn test_accept_without_webp_keeps_default() {
        let options = derive(ClientSignals::new().with_header("Accept", "image/png,*/*"));
        assert_eq!(options.mime, "image/jpeg");
    }

    #[test]
    fn test_webp_param_does_not_select_webp() {
        let options = derive(ClientSignals::new().with_param("Accept", "image/webp"));
        assert_eq!(options.mime, "image/jpeg");
    }

    #[test]
    fn test_dpr_header_wins_over_param() {
        let options = derive(
            ClientSignals::new()
                .with_header("DPR", "2")
                .with_param("dpr", "3"),
        );
        assert_eq!(options.dpr, 2.0);
    }

    #[test]
    fn test_malformed_dpr_header_falls_back_to_param() {
        let options = derive(
            ClientSignals::new()
                .with_header("DPR", "two")
                .with_param("dpr", "1.5"),
        );
        assert_eq!(options.dpr, 1.5);
    }

    #[test]
    fn test_malformed_dpr_everywhere_defaults_to_one() {
        let options = derive(
            ClientSignals::new()
                .with_header("DPR", "")
                .with_param("dpr", "x"),
        );
        assert_eq!(options.dpr, 1.0);
    }

    #[test]
    fn test_header_names_case_insensitive() {
        let options = derive(
            ClientSignals::new()
                .with_header("dpr", "3")
                .with_header("save-data", "1"),
        );
        assert_eq!(options.dpr, 3.0);
        assert!(options.save_data);
    }

    #[test]
    fn test_header_names_differing_in_case_keep_last() {
        let signals = ClientSignals::new()
            .with_header("DPR", "2")
            .with_header("dpr", "3");

        assert_eq!(signals.header("Dpr"), Some("3"));
        assert_eq!(derive(signals).dpr, 3.0);
    }

    #[test]
    fn test_deserialized_header_names_lowercased() {
        use serde::de::value::{Error, MapDeserializer};
        use serde::de::IntoDeserializer;

        let headers: HashMap<String, String> = [
            ("DPR".to_string(), "2".to_string()),
            ("dpr".to_string(), "3".to_string()),
            ("Save-Data".to_string(), "1".to_string()),
        ]
        .into();
        let fields: HashMap<String, HashMap<String, String>> =
            [("headers".to_string(), headers)].into();
        let deserializer: MapDeserializer<'_, _, Error> = fields.into_deserializer();
        let signals = ClientSignals::deserialize(deserializer).unwrap();

        assert_eq!(signals.header("DPR"), Some("3"));
        assert_eq!(signals.header("save-data"), Some("1"));
        assert_eq!(signals.param("dpr"), None);
    }

    #[test]
    fn test_param_names_case_sensitive() {
        let options = derive(ClientSignals::new().with_param("DPR", "3"));
        assert_eq!(options.dpr, 1.0);
    }

    #[test]
    fn test_save_data_from_header_or_param() {
        assert!(derive(ClientSignals::new().with_header("Save-Data", "1")).save_data);
        assert!(derive(ClientSignals::new().with_param("save-data", "1")).save_data);
        assert!(
            derive(
                ClientSignals::new()
                    .with_header("Save-Data", "0")
                    .with_param("save-data", "1")
            )
            .save_data
        );
    }

    #[test]
    fn test_save_data_requires_exact_one() {
        assert!(!derive(ClientSignals::new().with_header("Save-Data", "on")).save_data);
        assert!(!derive(ClientSignals::new().with_header("Save-Data", "true")).save_data);
        assert!(!derive(ClientSignals::new().with_header("Save-Data", " 1")).save_data);
    }

    #[test]
    fn test_save_data_reset_by_reapplying() {
        let mut options = Options::new("image/png");
        options.save_data = true;
        options.apply_signals(&ClientSignals::new());
        assert!(!options.save_data);
    }

    #[test]
    fn test_viewport_width() {
        let options = derive(ClientSignals::new().with_header("Viewport-Width", "412.5"));
        assert_eq!(options.viewport_width, 412.5);

        let options = derive(ClientSignals::new().with_param("viewport-width", "360"));
        assert_eq!(options.viewport_width, 360.0);
    }

    #[test]
    fn test_width_header_then_param() {
        let options = derive(ClientSignals::new().with_header("Width", "320"));
        assert_eq!(options.width, 320);

        let options = derive(
            ClientSignals::new()
                .with_header("Width", "wide")
                .with_param("width", "640"),
        );
        assert_eq!(options.width, 640);
    }

    #[test]
    fn test_width_non_positive_keeps_existing() {
        let mut options = Options::new("image/jpeg");
        options.width = 800;

        options.apply_signals(&ClientSignals::new().with_header("Width", "0"));
        assert_eq!(options.width, 800);

        options.apply_signals(&ClientSignals::new().with_header("Width", "-5"));
        assert_eq!(options.width, 800);
    }

    #[test]
    fn test_parsed_non_positive_width_header_stops_chain() {
        let options = derive(
            ClientSignals::new()
                .with_header("Width", "-5")
                .with_param("width", "640"),
        );
        assert_eq!(options.width, 0);
    }

    #[test]
    fn test_width_rejects_fractions() {
        let options = derive(ClientSignals::new().with_header("Width", "320.5"));
        assert_eq!(options.width, 0);
    }

    #[test]
    fn test_width_saturates() {
        let options = derive(ClientSignals::new().with_header("Width", "99999999999"));
        assert_eq!(options.width, u32::MAX);
    }

    #[test]
    fn test_downlink() {
        let options = derive(ClientSignals::new().with_header("Downlink", "0.35"));
        assert_eq!(options.downlink, 0.35);

        let options = derive(
            ClientSignals::new()
                .with_header("Downlink", "fast")
                .with_param("downlink", "10"),
        );
        assert_eq!(options.downlink, 10.0);
    }

    #[test]
    fn test_derived_options_then_optimize() {
        let mut options = derive(
            ClientSignals::new()
                .with_header("Accept", "image/webp")
                .with_header("DPR", "2")
                .with_header("Width", "100")
                .with_header("Downlink", "0.5")
                .with_header("Save-Data", "1"),
        );
        options.optimize();

        assert_eq!(options.mime, "image/webp");
        assert_eq!(options.width, 200);
        // 40 * 0.5 = 20, 20 * 0.75 = 15
        assert_eq!(options.quality, 15);
    }

    #[test]
    fn test_config_quality_survives_derivation() {
        let config = HintConfig {
            default_quality: 90,
            ..HintConfig::default()
        };
        let mut options = derive_options(&ClientSignals::new().with_header("DPR", "3"), &config);
        options.optimize();

        assert_eq!(options.quality, 90);
    }

    #[test]
    fn test_hint_source_lookup() {
        let signals = ClientSignals::new()
            .with_header("Width", "10")
            .with_param("width", "20");

        assert_eq!(HintSource::Header("width").lookup(&signals), Some("10"));
        assert_eq!(HintSource::Param("width").lookup(&signals), Some("20"));
        assert_eq!(HintSource::Param("Width").lookup(&signals), None);
    }

    #[test]
    fn test_response_headers_cover_every_hint() {
        for hint in ["DPR", "Width", "Viewport-Width", "Downlink", "Save-Data"] {
            assert!(accept_ch_header().contains(hint));
            assert!(vary_header().contains(hint));
        }
        assert!(vary_header().starts_with("Accept,"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: arbitrary hint strings never panic and always yield a usable dpr.
        #[test]
        fn prop_arbitrary_hints_never_panic(
            dpr in ".*",
            width in ".*",
            downlink in ".*",
            viewport in ".*",
        ) {
            let signals = ClientSignals::new()
                .with_header("DPR", dpr)
                .with_header("Width", width)
                .with_header("Downlink", downlink)
                .with_param("viewport-width", viewport);
            let mut options = derive_options(&signals, &HintConfig::default());
            options.optimize();

            prop_assert!(options.is_optimized());
        }

        /// Property: a numeric DPR header is taken verbatim.
        #[test]
        fn prop_numeric_dpr_header_used(dpr in 0.1f64..=8.0) {
            let signals = ClientSignals::new().with_header("DPR", dpr.to_string());
            let options = derive_options(&signals, &HintConfig::default());

            prop_assert_eq!(options.dpr, dpr);
        }
    }
}
