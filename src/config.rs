//! Card configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user config file in the config directory (`--config`,
//! default: the working directory).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! base_url = "https://cards.example.com/"   # Page that shared links point at
//!
//! [branding]
//! school = "Skaka International School"     # Badge on the card and page header
//! file_prefix = "Skaka-Ramadan-Card"        # Download name: <prefix>-<name>.png
//!
//! [timing]
//! transition_delay_ms = 500   # Celebration → result step
//! toast_ms = 3000             # Toast auto-dismiss
//! lanterns_ms = 6000          # Lantern batch lifetime
//! stars_ms = 4000             # Star batch lifetime
//!
//! [overlays]
//! lantern_count = 15
//! star_count = 30
//!
//! [export]
//! pixel_ratio = 3             # Raster density relative to the 400x500 card
//! cache_bust = true           # Never reuse a previously captured frame
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [timing]
//! transition_delay_ms = 0
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Largest accepted `export.pixel_ratio`. An 8x card is 3200x4000.
pub const MAX_PIXEL_RATIO: u32 = 8;

/// Card configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// Where shared links point.
    pub site: SiteConfig,
    /// School name and download file prefix.
    pub branding: BrandingConfig,
    /// Delays for the celebration choreography and self-expiring effects.
    pub timing: TimingConfig,
    /// Particle counts for the celebration overlays.
    pub overlays: OverlayConfig,
    /// Raster export settings.
    pub export: ExportConfig,
}

impl CardConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.pixel_ratio == 0 || self.export.pixel_ratio > MAX_PIXEL_RATIO {
            return Err(ConfigError::Validation(format!(
                "export.pixel_ratio must be 1-{MAX_PIXEL_RATIO}"
            )));
        }
        if self.branding.file_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "branding.file_prefix must not be empty".into(),
            ));
        }
        if self.timing.toast_ms == 0 {
            return Err(ConfigError::Validation(
                "timing.toast_ms must be non-zero".into(),
            ));
        }
        self.site.url()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute URL of the card page. Shared links add `?name=…&template=…`.
    pub base_url: String,
}

impl SiteConfig {
    /// Parsed `base_url`.
    pub fn url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Validation(format!("site.base_url '{}': {e}", self.base_url))
        })
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cards.example.com/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingConfig {
    /// Shown in the card's header badge and the page banner.
    pub school: String,
    /// Download file name prefix: `<file_prefix>-<name>.png`.
    pub file_prefix: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            school: "Skaka International School".to_string(),
            file_prefix: "Skaka-Ramadan-Card".to_string(),
        }
    }
}

/// Delays, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Pause between starting the celebration and showing the result.
    pub transition_delay_ms: u64,
    /// Toast lifetime.
    pub toast_ms: u64,
    /// Lantern batch lifetime.
    pub lanterns_ms: u64,
    /// Star batch lifetime.
    pub stars_ms: u64,
}

impl TimingConfig {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn lanterns(&self) -> Duration {
        Duration::from_millis(self.lanterns_ms)
    }

    pub fn stars(&self) -> Duration {
        Duration::from_millis(self.stars_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            transition_delay_ms: 500,
            toast_ms: 3000,
            lanterns_ms: 6000,
            stars_ms: 4000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    pub lantern_count: usize,
    pub star_count: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            lantern_count: 15,
            star_count: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Output pixels per card unit.
    pub pixel_ratio: u32,
    /// Skip the frame cache and always rasterize afresh.
    pub cache_bust: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: 3,
            cache_bust: true,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CardConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CardConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CardConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<CardConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Ramadan Card Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Absolute URL of the card page. Shared links append ?name=...&template=...
base_url = "https://cards.example.com/"

# ---------------------------------------------------------------------------
# Branding
# ---------------------------------------------------------------------------
[branding]
# Shown in the card's header badge and the page banner.
school = "Skaka International School"

# Downloads are saved as <file_prefix>-<name>.png
file_prefix = "Skaka-Ramadan-Card"

# ---------------------------------------------------------------------------
# Timing (milliseconds)
# ---------------------------------------------------------------------------
[timing]
# Pause between starting the celebration and showing the finished card.
transition_delay_ms = 500

# How long a notification stays visible.
toast_ms = 3000

# Lifetime of the floating lanterns and the sparkle stars.
lanterns_ms = 6000
stars_ms = 4000

# ---------------------------------------------------------------------------
# Celebration overlays
# ---------------------------------------------------------------------------
[overlays]
lantern_count = 15
star_count = 30

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# Raster density relative to the 400x500 card (1-8).
pixel_ratio = 3

# Rasterize afresh on every download instead of reusing a captured frame.
cache_bust = true
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CardConfig::default();
        assert_eq!(config.timing.transition_delay_ms, 500);
        assert_eq!(config.timing.toast_ms, 3000);
        assert_eq!(config.timing.lanterns_ms, 6000);
        assert_eq!(config.timing.stars_ms, 4000);
        assert_eq!(config.overlays.lantern_count, 15);
        assert_eq!(config.overlays.star_count, 30);
        assert_eq!(config.export.pixel_ratio, 3);
        assert!(config.export.cache_bust);
        assert_eq!(config.branding.file_prefix, "Skaka-Ramadan-Card");
    }

    #[test]
    fn timing_durations() {
        let timing = TimingConfig::default();
        assert_eq!(timing.transition_delay(), Duration::from_millis(500));
        assert_eq!(timing.toast(), Duration::from_secs(3));
        assert_eq!(timing.lanterns(), Duration::from_secs(6));
        assert_eq!(timing.stars(), Duration::from_secs(4));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[timing]
transition_delay_ms = 0
"##;
        let config: CardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.timing.transition_delay_ms, 0);
        // Default values preserved
        assert_eq!(config.timing.toast_ms, 3000);
        assert_eq!(config.export.pixel_ratio, 3);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, CardConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[branding]
school = "Al Noor Academy"

[export]
pixel_ratio = 2
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.branding.school, "Al Noor Academy");
        assert_eq!(config.export.pixel_ratio, 2);
        // Unspecified values should be defaults
        assert_eq!(config.branding.file_prefix, "Skaka-Ramadan-Card");
        assert!(config.export.cache_bust);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[export]\npixel_ratio = 0\n",
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("a = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(10));
        assert_eq!(merged["b"].as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value =
            toml::from_str("[timing]\ntoast_ms = 3000\nstars_ms = 4000").unwrap();
        let overlay: toml::Value = toml::from_str("[timing]\nstars_ms = 100").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["timing"]["toast_ms"].as_integer(), Some(3000));
        assert_eq!(merged["timing"]["stars_ms"].as_integer(), Some(100));
    }

    // =========================================================================
    // Unknown keys and validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<CardConfig, _> = toml::from_str("unknown_key = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<CardConfig, _> = toml::from_str("[timing]\ntoast_seconds = 3");
        assert!(result.is_err());
    }

    #[test]
    fn validate_pixel_ratio_bounds() {
        let mut config = CardConfig::default();
        config.export.pixel_ratio = MAX_PIXEL_RATIO;
        assert!(config.validate().is_ok());
        config.export.pixel_ratio = MAX_PIXEL_RATIO + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_prefix() {
        let mut config = CardConfig::default();
        config.branding.file_prefix = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_toast() {
        let mut config = CardConfig::default();
        config.timing.toast_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_bad_base_url() {
        let mut config = CardConfig::default();
        config.site.base_url = "not a url".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.base_url"));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(CardConfig::default().validate().is_ok());
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: CardConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, CardConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value();
        let table = value.as_table().unwrap();
        for section in ["site", "branding", "timing", "overlays", "export"] {
            assert!(table.contains_key(section), "missing [{section}]");
        }
    }
}
