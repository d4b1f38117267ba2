//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what files to create) and the [`backend`](super::backend)
//! (which does the pixel work). Keeping them separate lets tests run the
//! operation logic against a recording mock.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`OutputFormat`] — Encoders the backend can write, chosen by file extension.
//! - [`VariantMode`] — How a derived variant reaches its exact size (fill or stretch).
//! - [`FitParams`] — One source, one target size, any number of output files.
//! - [`OverlayParams`] — Two layers, offset, margin, and the variants to derive.

use super::calculations::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Encoded output formats.
///
/// PNG and WebP keep the alpha channel (WebP is written lossless). JPEG has no
/// alpha, so images are flattened to RGB before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
    Webp,
}

impl OutputFormat {
    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }

    /// Parse a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpg),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// How a derived variant is brought to its exact size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantMode {
    /// Scale to cover, then center-crop. Aspect ratio is preserved.
    Fill,
    /// Resize straight to the target. Aspect ratio is not preserved.
    #[default]
    Stretch,
}

/// Parameters for a fit-and-crop operation.
#[derive(Debug, Clone, PartialEq)]
pub struct FitParams {
    pub source: PathBuf,
    /// Every path receives the same cropped pixels, encoded per its extension.
    pub outputs: Vec<PathBuf>,
    pub target: Size,
    pub quality: Quality,
}

/// A sized variant derived from the composited overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayVariant {
    pub output: PathBuf,
    pub size: Size,
    pub mode: VariantMode,
}

/// Parameters for compositing two layers with a diagonal offset.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayParams {
    /// Bottom layer.
    pub base: PathBuf,
    /// Top layer, placed at the base position plus `offset`.
    pub overlay: PathBuf,
    pub offset: (i32, i32),
    pub margin: u32,
    /// Full-size composite, trimmed to its visible bounds.
    pub output: PathBuf,
    pub variants: Vec<OverlayVariant>,
    pub quality: Quality,
}
