//! Image processing backend trait and shared error type.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, fit, and overlay. Each one reads its inputs from disk,
//! runs the pure [`transform`](super::transform) stage, and writes the results.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` in this module's test section.

use super::calculations::Size;
use super::params::{FitParams, OverlayParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
pub trait ImageBackend: Sync {
    /// Get image dimensions without a full decode where possible.
    fn identify(&self, path: &Path) -> Result<Size, ImagingError>;

    /// Resize-to-cover and center-crop a source into every requested output.
    fn fit(&self, params: &FitParams) -> Result<(), ImagingError>;

    /// Composite two layers, trim, and write the composite plus its variants.
    ///
    /// Returns the size of the trimmed composite.
    fn overlay(&self, params: &OverlayParams) -> Result<Size, ImagingError>;
}
