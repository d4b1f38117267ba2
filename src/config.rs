//! Configuration module.
//!
//! Handles loading, validating, and merging `brandkit.toml`. Stock defaults
//! reproduce the asset set the tool was written for; a user file only needs
//! the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [banners]
//! prefix = "banner"           # Output files: {prefix}_{name}.{ext}
//! formats = ["png", "jpg"]    # png, jpg (or jpeg), webp
//! quality = 95                # JPEG quality (1-100)
//!
//! [[banners.presets]]
//! name = "splash_screen"
//! size = [800, 450]
//! # ... header_banner, compact_banner, square_banner, wide_banner, mobile_banner
//!
//! [overlay]
//! filename = "logo_overlay.png" # Composite file; extension picks the format
//! offset = [100, 80]          # Overlay layer offset from the base layer
//! margin = 25                 # Transparent margin before trimming
//! prefix = "logo"             # Variants are written as {prefix}_{variant}.{ext}
//! format = "png"              # Variant format
//! quality = 95
//!
//! [[overlay.variants]]
//! name = "icon"
//! size = [256, 256]
//! mode = "stretch"            # stretch | fill
//!
//! [processing]
//! max_processes = 4           # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Merging
//!
//! Tables merge key by key. Arrays replace wholesale, so a user file that
//! lists `[[banners.presets]]` replaces the full stock preset list rather
//! than appending to it.
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{
    BannerSetConfig, BannerSpec, OutputFormat, OverlaySetConfig, Quality, Size, VariantMode,
    VariantSpec, banner_filename,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
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

/// Configuration loaded from `brandkit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    /// Banner set generated by `brandkit banners`.
    pub banners: BannersConfig,
    /// Logo composite generated by `brandkit overlay`.
    pub overlay: OverlayConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl BrandConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.banners.validate()?;
        self.overlay.validate()?;
        Ok(())
    }
}

fn validation(msg: impl Into<String>) -> ConfigError {
    ConfigError::Validation(msg.into())
}

fn check_name(section: &str, name: &str, seen: &mut HashSet<String>) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(validation(format!("{section} names must not be empty")));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(validation(format!(
            "{section} name '{name}' must be a plain file name"
        )));
    }
    if !seen.insert(name.to_string()) {
        return Err(validation(format!("{section} name '{name}' is duplicated")));
    }
    Ok(())
}

fn check_size(section: &str, name: &str, size: [u32; 2]) -> Result<(), ConfigError> {
    if size[0] == 0 || size[1] == 0 {
        return Err(validation(format!(
            "{section} '{name}' size values must be non-zero"
        )));
    }
    Ok(())
}

fn check_quality(section: &str, quality: u32) -> Result<(), ConfigError> {
    if !(1..=100).contains(&quality) {
        return Err(validation(format!("{section}.quality must be 1-100")));
    }
    Ok(())
}

/// A named banner size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    pub name: String,
    /// `[width, height]` in pixels.
    pub size: [u32; 2],
}

impl PresetConfig {
    fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            size: [width, height],
        }
    }
}

/// Banner generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannersConfig {
    /// Output file prefix. Empty means files are named after the preset alone.
    pub prefix: String,
    /// Every banner is written once per format, in this order.
    pub formats: Vec<OutputFormat>,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Sizes to generate, in output order.
    pub presets: Vec<PresetConfig>,
}

impl Default for BannersConfig {
    fn default() -> Self {
        Self {
            prefix: "banner".to_string(),
            formats: vec![OutputFormat::Png, OutputFormat::Jpg],
            quality: 95,
            presets: vec![
                PresetConfig::new("splash_screen", 800, 450),
                PresetConfig::new("header_banner", 600, 200),
                PresetConfig::new("compact_banner", 400, 133),
                PresetConfig::new("square_banner", 400, 400),
                PresetConfig::new("wide_banner", 960, 320),
                PresetConfig::new("mobile_banner", 320, 180),
            ],
        }
    }
}

impl BannersConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_quality("banners", self.quality)?;
        if self.presets.is_empty() {
            return Err(validation("banners.presets must not be empty"));
        }
        if self.formats.is_empty() {
            return Err(validation("banners.formats must not be empty"));
        }
        let unique: HashSet<_> = self.formats.iter().collect();
        if unique.len() != self.formats.len() {
            return Err(validation("banners.formats must not repeat a format"));
        }
        let mut seen = HashSet::new();
        for preset in &self.presets {
            check_name("banners.presets", &preset.name, &mut seen)?;
            check_size("banners.presets", &preset.name, preset.size)?;
        }
        Ok(())
    }

    /// Banner specs in preset order.
    pub fn specs(&self) -> Vec<BannerSpec> {
        self.presets
            .iter()
            .map(|p| BannerSpec {
                name: p.name.clone(),
                size: Size::from(p.size),
            })
            .collect()
    }

    pub fn set_config(&self) -> BannerSetConfig {
        BannerSetConfig {
            prefix: self.prefix.clone(),
            formats: self.formats.clone(),
            quality: Quality::new(self.quality),
        }
    }
}

/// A sized variant derived from the logo composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantConfig {
    pub name: String,
    /// `[width, height]` in pixels.
    pub size: [u32; 2],
    #[serde(default)]
    pub mode: VariantMode,
}

/// Largest accepted `overlay.margin`, in pixels.
pub const MAX_OVERLAY_MARGIN: u32 = 4096;

/// Largest accepted absolute `overlay.offset` component, in pixels.
pub const MAX_OVERLAY_OFFSET: i32 = 16384;

/// Logo overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Composite file name; its extension picks the format.
    pub filename: String,
    /// `[x, y]` offset of the top layer relative to the base layer.
    pub offset: [i32; 2],
    /// Transparent margin around the layers before trimming.
    pub margin: u32,
    /// Variant file prefix: `{prefix}_{variant}.{ext}`.
    pub prefix: String,
    /// Variant file format.
    pub format: OutputFormat,
    pub quality: u32,
    pub variants: Vec<VariantConfig>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            filename: "logo_overlay.png".to_string(),
            offset: [100, 80],
            margin: 25,
            prefix: "logo".to_string(),
            format: OutputFormat::Png,
            quality: 95,
            variants: vec![
                VariantConfig {
                    name: "icon".to_string(),
                    size: [256, 256],
                    mode: VariantMode::Stretch,
                },
                VariantConfig {
                    name: "banner".to_string(),
                    size: [400, 200],
                    mode: VariantMode::Stretch,
                },
            ],
        }
    }
}

impl OverlayConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_quality("overlay", self.quality)?;
        check_name("overlay.filename", &self.filename, &mut HashSet::new())?;
        if OutputFormat::from_path(Path::new(&self.filename)).is_none() {
            return Err(validation(format!(
                "overlay.filename '{}' must end in .png, .jpg, .jpeg or .webp",
                self.filename
            )));
        }
        if self.margin > MAX_OVERLAY_MARGIN {
            return Err(validation(format!(
                "overlay.margin must be at most {MAX_OVERLAY_MARGIN}"
            )));
        }
        if self
            .offset
            .iter()
            .any(|v| v.unsigned_abs() > MAX_OVERLAY_OFFSET.unsigned_abs())
        {
            return Err(validation(format!(
                "overlay.offset values must be within ±{MAX_OVERLAY_OFFSET}"
            )));
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            check_name("overlay.variants", &variant.name, &mut seen)?;
            check_size("overlay.variants", &variant.name, variant.size)?;
            if banner_filename(&self.prefix, &variant.name, self.format) == self.filename {
                return Err(validation(format!(
                    "overlay variant '{}' would overwrite {}",
                    variant.name, self.filename
                )));
            }
        }
        Ok(())
    }

    pub fn set_config(&self) -> OverlaySetConfig {
        OverlaySetConfig {
            filename: self.filename.clone(),
            prefix: self.prefix.clone(),
            offset: (self.offset[0], self.offset[1]),
            margin: self.margin,
            format: self.format,
            variants: self
                .variants
                .iter()
                .map(|v| VariantSpec {
                    name: v.name.clone(),
                    size: Size::from(v.size),
                    mode: v.mode,
                })
                .collect(),
            quality: Quality::new(self.quality),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, and at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BrandConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BrandConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BrandConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<BrandConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        tracing::debug!(path = %path.display(), "no config file, using stock defaults");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `brandkit.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# brandkit configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Tables merge over the defaults key by key. Arrays (presets, variants,
# formats) replace the default list entirely.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Banners: every preset is scaled to cover its size, then center-cropped.
# ---------------------------------------------------------------------------
[banners]
# Output files are named {prefix}_{name}.{ext}. Empty prefix → {name}.{ext}.
prefix = "banner"

# Each banner is written once per format: png, jpg (or jpeg), webp (lossless).
formats = ["png", "jpg"]

# JPEG encoding quality (1 = worst, 100 = best).
quality = 95

# 16:9 for splash screens
[[banners.presets]]
name = "splash_screen"
size = [800, 450]

# Wide banner for app headers
[[banners.presets]]
name = "header_banner"
size = [600, 200]

# Compact 3:1
[[banners.presets]]
name = "compact_banner"
size = [400, 133]

[[banners.presets]]
name = "square_banner"
size = [400, 400]

# Ultra-wide for large displays
[[banners.presets]]
name = "wide_banner"
size = [960, 320]

[[banners.presets]]
name = "mobile_banner"
size = [320, 180]

# ---------------------------------------------------------------------------
# Logo overlay: the second logo is placed over the first with an offset,
# then the transparent border is trimmed.
# ---------------------------------------------------------------------------
[overlay]
# Trimmed composite. The extension picks the format (png, jpg, webp).
filename = "logo_overlay.png"

# [x, y] offset of the top layer from the base layer. Negative values allowed,
# up to ±16384.
offset = [100, 80]

# Transparent margin around both layers before trimming (at most 4096).
margin = 25

# Variant files are named {prefix}_{name}.{format}.
prefix = "logo"
format = "png"

# JPEG encoding quality for the composite and variants.
quality = 95

# Variants derived from the trimmed composite.
# mode = "stretch" resizes straight to size; "fill" scales to cover and crops.
[[overlay.variants]]
name = "icon"
size = [256, 256]
mode = "stretch"

[[overlay.variants]]
name = "banner"
size = [400, 200]
mode = "stretch"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_six_stock_presets() {
        let config = BrandConfig::default();
        let names: Vec<&str> = config
            .banners
            .presets
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "splash_screen",
                "header_banner",
                "compact_banner",
                "square_banner",
                "wide_banner",
                "mobile_banner"
            ]
        );
        assert_eq!(config.banners.presets[2].size, [400, 133]);
        assert_eq!(
            config.banners.formats,
            vec![OutputFormat::Png, OutputFormat::Jpg]
        );
        assert_eq!(config.banners.quality, 95);
    }

    #[test]
    fn default_overlay_settings() {
        let config = OverlayConfig::default();
        assert_eq!(config.offset, [100, 80]);
        assert_eq!(config.margin, 25);
        assert_eq!(config.variants.len(), 2);
        assert_eq!(config.variants[0].size, [256, 256]);
    }

    #[test]
    fn parse_partial_config() {
        let config: BrandConfig = toml::from_str(
            r#"
[banners]
prefix = "dtlr_banner"
"#,
        )
        .unwrap();
        assert_eq!(config.banners.prefix, "dtlr_banner");
        // Defaults preserved
        assert_eq!(config.banners.presets.len(), 6);
        assert_eq!(config.overlay.margin, 25);
    }

    #[test]
    fn parse_variant_mode_defaults_to_stretch() {
        let config: BrandConfig = toml::from_str(
            r#"
[[overlay.variants]]
name = "tile"
size = [150, 150]
"#,
        )
        .unwrap();
        assert_eq!(config.overlay.variants.len(), 1);
        assert_eq!(config.overlay.variants[0].mode, VariantMode::Stretch);
    }

    #[test]
    fn specs_follow_preset_order() {
        let specs = BannersConfig::default().specs();
        assert_eq!(specs[0].name, "splash_screen");
        assert_eq!(specs[0].size, Size::new(800, 450));
        assert_eq!(specs[5].size, Size::new(320, 180));
    }

    #[test]
    fn overlay_set_config_converts_offset() {
        let set = OverlayConfig::default().set_config();
        assert_eq!(set.offset, (100, 80));
        assert_eq!(set.variants[1].size, Size::new(400, 200));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("brandkit.toml")).unwrap();
        assert_eq!(config.banners.prefix, "banner");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brandkit.toml");
        fs::write(
            &path,
            r#"
[banners]
formats = ["webp"]

[[banners.presets]]
name = "hero"
size = [1200, 400]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.banners.formats, vec![OutputFormat::Webp]);
        // Arrays replace, they do not append
        assert_eq!(config.banners.presets, vec![PresetConfig::new("hero", 1200, 400)]);
        // Untouched keys keep defaults
        assert_eq!(config.banners.quality, 95);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brandkit.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brandkit.toml");
        fs::write(
            &path,
            r#"
[banners]
quality = 200
"#,
        )
        .unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[overlay]
offset = [100, 80]
margin = 25
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[overlay]
margin = 0
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let section = merged.get("overlay").unwrap();
        assert_eq!(section.get("margin").unwrap().as_integer(), Some(0));
        assert_eq!(section.get("offset").unwrap().as_array().unwrap().len(), 2);
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"formats = ["png", "jpg"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"formats = ["webp"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("formats").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<BrandConfig, _> = toml::from_str(
            r#"
[banners]
qualty = 90
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_preset_key_rejected() {
        let result: Result<BrandConfig, _> = toml::from_str(
            r#"
[[banners.presets]]
name = "x"
size = [1, 1]
crop = "center"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        let result: Result<BrandConfig, _> = toml::from_str(
            r#"
[banners]
formats = ["ico"]
"#,
        );
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(BrandConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_preset_dimension() {
        let mut config = BrandConfig::default();
        config.banners.presets[0].size = [0, 450];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("splash_screen"));
    }

    #[test]
    fn validate_empty_presets() {
        let mut config = BrandConfig::default();
        config.banners.presets.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_formats() {
        let mut config = BrandConfig::default();
        config.banners.formats.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_repeated_format() {
        let mut config = BrandConfig::default();
        config.banners.formats = vec![OutputFormat::Png, OutputFormat::Png];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_duplicate_preset_names() {
        let mut config = BrandConfig::default();
        config.banners.presets[1].name = "splash_screen".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicated"));
    }

    #[test]
    fn validate_path_like_name() {
        let mut config = BrandConfig::default();
        config.banners.presets[0].name = "../escape".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_variant_cannot_shadow_composite() {
        let mut config = BrandConfig::default();
        config.overlay.variants[0].name = "overlay".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_quality_bounds() {
        let mut config = BrandConfig::default();
        config.banners.quality = 0;
        assert!(config.validate().is_err());
        config.banners.quality = 100;
        assert!(config.validate().is_ok());
        config.overlay.quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_documented_example_config() {
        let config: BrandConfig = toml::from_str(
            r#"
[banners]
prefix = "banner"
formats = ["png", "jpg"]
quality = 95
[[banners.presets]]
name = "splash_screen"
size = [800, 450]
# ...
[overlay]
offset = [100, 80]
margin = 25
filename = "logo_overlay.png"
[[overlay.variants]]
name = "icon"
size = [256, 256]
mode = "stretch"
[processing]
max_processes = 4
"#,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.overlay.filename, "logo_overlay.png");
        assert_eq!(config.overlay.format, OutputFormat::Png);
        assert_eq!(config.overlay.quality, 95);
        assert_eq!(config.banners.presets.len(), 1);
        assert_eq!(config.processing.max_processes, Some(4));
    }

    #[test]
    fn validate_overlay_filename_needs_known_extension() {
        let mut config = BrandConfig::default();
        config.overlay.filename = "logo_overlay.ico".to_string();
        assert!(config.validate().is_err());
        config.overlay.filename = "nested/logo.png".to_string();
        assert!(config.validate().is_err());
        config.overlay.filename = "mark.webp".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_variant_cannot_overwrite_custom_filename() {
        let mut config = BrandConfig::default();
        config.overlay.filename = "logo_icon.png".to_string();
        assert!(config.validate().is_err());
        config.overlay.format = OutputFormat::Webp;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_overlay_margin_bound() {
        let mut config = BrandConfig::default();
        config.overlay.margin = 3_000_000_000;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.overlay.margin = MAX_OVERLAY_MARGIN;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_overlay_offset_bound() {
        let mut config = BrandConfig::default();
        config.overlay.offset = [100_000, 100_000];
        assert!(config.validate().is_err());
        config.overlay.offset = [i32::MIN, 0];
        assert!(config.validate().is_err());
        config.overlay.offset = [-MAX_OVERLAY_OFFSET, MAX_OVERLAY_OFFSET];
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // stock_config_toml / stock_defaults_value tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: BrandConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = BrandConfig::default();
        assert_eq!(config.banners.presets, defaults.banners.presets);
        assert_eq!(config.banners.formats, defaults.banners.formats);
        assert_eq!(config.banners.prefix, defaults.banners.prefix);
        assert_eq!(config.overlay.variants, defaults.overlay.variants);
        assert_eq!(config.overlay.offset, defaults.overlay.offset);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("banners").is_some());
        assert!(val.get("overlay").is_some());
        assert!(val.get("processing").is_some());
    }

    #[test]
    fn resolve_config_with_no_overlay() {
        let config = resolve_config(stock_defaults_value(), None).unwrap();
        assert_eq!(config.banners.presets.len(), 6);
    }
}
