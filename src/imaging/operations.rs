//! High-level image operations.
//!
//! These functions decide which files to produce and call the backend. They
//! hold no pixel logic of their own, so they run unchanged against the mock
//! backend in tests.

use super::backend::{ImageBackend, ImagingError};
use super::calculations::Size;
use super::params::{FitParams, OutputFormat, OverlayParams, OverlayVariant, Quality, VariantMode};
use serde::Serialize;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Size> {
    backend.identify(path)
}

/// A named output size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerSpec {
    pub name: String,
    pub size: Size,
}

/// Configuration for a banner set.
#[derive(Debug, Clone)]
pub struct BannerSetConfig {
    /// Filename prefix: `{prefix}_{name}.{ext}`.
    pub prefix: String,
    pub formats: Vec<OutputFormat>,
    pub quality: Quality,
}

/// One generated banner and the files written for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedBanner {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// File names relative to the output directory, in format order.
    pub files: Vec<String>,
}

/// Build the output file name for a banner.
pub fn banner_filename(prefix: &str, name: &str, format: OutputFormat) -> String {
    if prefix.is_empty() {
        format!("{}.{}", name, format.extension())
    } else {
        format!("{}_{}.{}", prefix, name, format.extension())
    }
}

/// Create one banner: fit-and-crop the source to `spec.size` and write it in
/// every configured format.
pub fn create_banner(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    spec: &BannerSpec,
    config: &BannerSetConfig,
) -> Result<GeneratedBanner> {
    let files: Vec<String> = config
        .formats
        .iter()
        .map(|&format| banner_filename(&config.prefix, &spec.name, format))
        .collect();

    backend.fit(&FitParams {
        source: source.to_path_buf(),
        outputs: files.iter().map(|f| output_dir.join(f)).collect(),
        target: spec.size,
        quality: config.quality,
    })?;

    Ok(GeneratedBanner {
        name: spec.name.clone(),
        width: spec.size.width,
        height: spec.size.height,
        files,
    })
}

/// Create every banner in `specs`, sequentially and in order.
///
/// [`process::run_banners`](crate::process::run_banners) is the parallel
/// variant used by the CLI.
pub fn create_banner_set(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    specs: &[BannerSpec],
    config: &BannerSetConfig,
) -> Result<Vec<GeneratedBanner>> {
    specs
        .iter()
        .map(|spec| create_banner(backend, source, output_dir, spec, config))
        .collect()
}

/// A sized variant of the composited overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    pub name: String,
    pub size: Size,
    pub mode: VariantMode,
}

/// Configuration for the logo overlay set.
#[derive(Debug, Clone)]
pub struct OverlaySetConfig {
    /// Composite file name inside the output directory.
    pub filename: String,
    /// Variant file prefix: `{prefix}_{variant}.{ext}`.
    pub prefix: String,
    pub offset: (i32, i32),
    pub margin: u32,
    pub format: OutputFormat,
    pub variants: Vec<VariantSpec>,
    pub quality: Quality,
}

/// Files written by [`create_logo_overlay`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedOverlay {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub variants: Vec<GeneratedBanner>,
}

/// Composite `overlay` on top of `base` and derive the configured variants.
pub fn create_logo_overlay(
    backend: &impl ImageBackend,
    base: &Path,
    overlay: &Path,
    output_dir: &Path,
    config: &OverlaySetConfig,
) -> Result<GeneratedOverlay> {
    let file = config.filename.clone();

    let variants: Vec<GeneratedBanner> = config
        .variants
        .iter()
        .map(|v| GeneratedBanner {
            name: v.name.clone(),
            width: v.size.width,
            height: v.size.height,
            files: vec![banner_filename(&config.prefix, &v.name, config.format)],
        })
        .collect();

    let size = backend.overlay(&OverlayParams {
        base: base.to_path_buf(),
        overlay: overlay.to_path_buf(),
        offset: config.offset,
        margin: config.margin,
        output: output_dir.join(&file),
        variants: config
            .variants
            .iter()
            .zip(&variants)
            .map(|(spec, generated)| OverlayVariant {
                output: output_dir.join(&generated.files[0]),
                size: spec.size,
                mode: spec.mode,
            })
            .collect(),
        quality: config.quality,
    })?;

    Ok(GeneratedOverlay {
        file,
        width: size.width,
        height: size.height,
        variants,
    })
}
