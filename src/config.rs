//! Placeholder configuration.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. stock defaults
//! 2. an optional TOML file passed with `--config`
//! 3. individual command-line flags
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [preview]
//! size = 42        # Longest side of the embedded preview, in pixels
//! quality = 1      # Lossy WebP quality (0-100)
//!
//! [filter]
//! blur = 10        # Gaussian blur stdDeviation applied by the SVG
//!
//! [output]
//! tag = false      # Wrap the CSS declaration in an <img> tag
//! base64 = false   # Base64-encode the SVG instead of percent-escaping it
//! ```
//!
//! The raw `--webp` / `--svg` outputs are debugging aids and stay CLI-only.
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::artifact::OutputFlags;
use crate::imaging::{Quality, ResizeSpec};
use crate::pipeline::PlaceholderSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full placeholder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderConfig {
    /// Preview size and encoder quality.
    pub preview: PreviewConfig,
    /// SVG blur filter.
    pub filter: FilterConfig,
    /// Text output shape.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Maximum width and height of the preview, in pixels.
    pub size: u32,
    /// Lossy WebP quality (0 = smallest, 100 = best).
    pub quality: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            size: ResizeSpec::default().max_side(),
            quality: Quality::default().value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Gaussian blur standard deviation.
    pub blur: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { blur: 10 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub tag: bool,
    pub base64: bool,
}

/// Values given explicitly on the command line. `None` means "not given".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub size: Option<u32>,
    pub quality: Option<u32>,
    pub blur: Option<u32>,
    pub tag: bool,
    pub base64: bool,
}

impl PlaceholderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview.size == 0 {
            return Err(ConfigError::Validation(
                "preview.size must be at least 1".into(),
            ));
        }
        if self.preview.quality > 100 {
            return Err(ConfigError::Validation(
                "preview.quality must be 0-100".into(),
            ));
        }
        Ok(())
    }

    /// Layer command-line values on top. Boolean flags can only switch an
    /// option on.
    pub fn apply(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(size) = overrides.size {
            self.preview.size = size;
        }
        if let Some(quality) = overrides.quality {
            self.preview.quality = quality;
        }
        if let Some(blur) = overrides.blur {
            self.filter.blur = blur;
        }
        self.output.tag |= overrides.tag;
        self.output.base64 |= overrides.base64;
        self
    }

    pub fn settings(&self) -> PlaceholderSettings {
        PlaceholderSettings {
            resize: ResizeSpec::new(self.preview.size),
            quality: Quality::new(self.preview.quality),
            blur_radius: self.filter.blur,
        }
    }

    /// Output flags from config; the raw-output switches come from the CLI.
    pub fn output_flags(&self, raw_preview: bool, raw_document: bool) -> OutputFlags {
        OutputFlags {
            tag: self.output.tag,
            raw_preview,
            raw_document,
            base64: self.output.base64,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PlaceholderConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
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

/// Read a TOML config file as a raw value.
///
/// Unlike a discovered config, an explicitly named file must exist.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PlaceholderConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PlaceholderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config: stock defaults, overlaid with `path` if given.
pub fn load_config(path: Option<&Path>) -> Result<PlaceholderConfig, ConfigError> {
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock config file.
///
/// Used by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# blurup configuration
# ====================
#
# Pass with: blurup --config blurup.toml IMAGE
# Command-line flags override every value here.

[preview]
# Longest side of the embedded preview, in pixels. Larger previews look
# sharper under the blur but add bytes to every page that inlines them.
size = 42
# Lossy WebP quality, 0-100. The preview is blurred, so 1 is usually fine.
quality = 1

[filter]
# Gaussian blur standard deviation applied by the SVG wrapper.
blur = 10

[output]
# Emit <img src="..." width=".." height=".." alt="" style="background: ..."> instead
# of a bare CSS declaration.
tag = false
# Base64-encode the SVG data URI. Percent-escaped (the default) is smaller.
base64 = false
"##
}
