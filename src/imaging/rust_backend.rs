//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with format guessing |
//! | Identify | `image::image_dimensions` (header only) |
//! | Fit and crop | [`transform::fit_and_crop`](super::transform::fit_and_crop) |
//! | Composite + trim | [`transform::composite`](super::transform::composite), [`transform::trim_transparent`](super::transform::trim_transparent) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (flattened to RGB) |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |

use super::backend::{ImageBackend, ImagingError};
use super::calculations::Size;
use super::params::{FitParams, OutputFormat, OverlayParams, Quality};
use super::transform;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the file contents, so a mislabelled extension
/// still decodes.
pub fn load_image(path: &Path) -> Result<DynamicImage, ImagingError> {
    ImageReader::open(path)
        .map_err(ImagingError::Io)?
        .with_guessed_format()
        .map_err(ImagingError::Io)?
        .decode()
        .map_err(|e| {
            ImagingError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode `img` to `path`, choosing the encoder from the extension.
pub fn save_image(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), ImagingError> {
    let format = OutputFormat::from_path(path).ok_or_else(|| {
        ImagingError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            path.display()
        ))
    })?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoded = match format {
        OutputFormat::Png => {
            img.write_with_encoder(image::codecs::png::PngEncoder::new(&mut writer))
        }
        OutputFormat::Jpg => {
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, quality.value() as u8);
            rgb.write_with_encoder(encoder)
        }
        OutputFormat::Webp => {
            // The lossless encoder only takes 8-bit RGB(A)
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_with_encoder(image::codecs::webp::WebPEncoder::new_lossless(&mut writer))
        }
    };

    encoded.map_err(|e| {
        ImagingError::ProcessingFailed(format!(
            "{} encode failed for {}: {}",
            format.extension(),
            path.display(),
            e
        ))
    })?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), "wrote image");
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Size, ImagingError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            ImagingError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Size { width, height })
    }

    fn fit(&self, params: &FitParams) -> Result<(), ImagingError> {
        let img = load_image(&params.source)?;
        let fitted = transform::fit_and_crop(&img, params.target)?;
        for output in &params.outputs {
            save_image(&fitted, output, params.quality)?;
        }
        Ok(())
    }

    fn overlay(&self, params: &OverlayParams) -> Result<Size, ImagingError> {
        let base = load_image(&params.base)?;
        let top = load_image(&params.overlay)?;
        tracing::debug!(
            base = ?base.dimensions(),
            overlay = ?top.dimensions(),
            offset = ?params.offset,
            "compositing layers"
        );

        let combined = transform::composite(&base, &top, params.offset, params.margin)?;
        let trimmed = transform::trim_transparent(&combined);
        save_image(&trimmed, &params.output, params.quality)?;

        for variant in &params.variants {
            let sized = transform::apply_variant(&trimmed, variant.size, variant.mode)?;
            save_image(&sized, &variant.output, params.quality)?;
        }

        let (width, height) = trimmed.dimensions();
        Ok(Size { width, height })
    }
}
