//! Asset generation runs.
//!
//! Glues config, filesystem checks, and the imaging operations together for
//! the two CLI commands that write files.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── manifest.json                  # Written by the CLI from the returned manifest
//! ├── banner_splash_screen.png       # One file per preset per format
//! ├── banner_splash_screen.jpg
//! ├── ...
//! ├── logo_overlay.png               # Trimmed composite
//! ├── logo_icon.png                  # Variants of the composite
//! └── logo_banner.png
//! ```
//!
//! ## Parallel Processing
//!
//! Banner presets are independent, so they run in parallel using
//! [rayon](https://docs.rs/rayon). Each preset decodes the source on its own;
//! nothing is shared between workers except the progress channel. Results
//! come back in preset order regardless of completion order.

use crate::config::BrandConfig;
use crate::imaging::{
    FitParams, GeneratedBanner, GeneratedOverlay, ImageBackend, ImagingError, Quality, Size,
    create_banner, create_logo_overlay, get_dimensions,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] ImagingError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
}

/// Progress events emitted while files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// Source decoded header, before any work starts.
    SourceIdentified { path: String, size: Size },
    /// A banner finished; `index` is its position in the preset list.
    BannerWritten {
        index: usize,
        banner: GeneratedBanner,
    },
    /// The logo composite and all of its variants were written.
    OverlayWritten { overlay: GeneratedOverlay },
}

/// Result of a banner run, serialized to `manifest.json`.
#[derive(Debug, Serialize)]
pub struct BannerManifest {
    pub source: String,
    pub source_size: Size,
    pub banners: Vec<GeneratedBanner>,
}

/// Result of an overlay run, serialized to `manifest.json`.
#[derive(Debug, Serialize)]
pub struct OverlayManifest {
    pub base: String,
    pub overlay: String,
    pub result: GeneratedOverlay,
}

fn require_source(path: &Path) -> Result<(), ProcessError> {
    if !path.exists() {
        return Err(ProcessError::SourceNotFound(path.to_path_buf()));
    }
    Ok(())
}

fn emit(events: Option<&Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is printing
        let _ = tx.send(event);
    }
}

/// Generate every configured banner from `source` into `output_dir`.
pub fn run_banners(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    config: &BrandConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BannerManifest, ProcessError> {
    require_source(source)?;
    std::fs::create_dir_all(output_dir)?;

    let source_size = get_dimensions(backend, source)?;
    let source_display = source.display().to_string();
    tracing::info!(source = %source_display, size = %source_size, "generating banners");
    emit(
        events.as_ref(),
        ProcessEvent::SourceIdentified {
            path: source_display.clone(),
            size: source_size,
        },
    );

    let specs = config.banners.specs();
    let set_config = config.banners.set_config();
    let events = events.as_ref();

    let banners = specs
        .par_iter()
        .enumerate()
        .map(|(index, spec)| {
            let banner = create_banner(backend, source, output_dir, spec, &set_config)?;
            emit(
                events,
                ProcessEvent::BannerWritten {
                    index,
                    banner: banner.clone(),
                },
            );
            Ok(banner)
        })
        .collect::<Result<Vec<_>, ImagingError>>()?;

    Ok(BannerManifest {
        source: source_display,
        source_size,
        banners,
    })
}

/// Composite `overlay` over `base` and write the configured variants.
pub fn run_overlay(
    backend: &impl ImageBackend,
    base: &Path,
    overlay: &Path,
    output_dir: &Path,
    config: &BrandConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<OverlayManifest, ProcessError> {
    require_source(base)?;
    require_source(overlay)?;
    std::fs::create_dir_all(output_dir)?;

    for path in [base, overlay] {
        let size = get_dimensions(backend, path)?;
        emit(
            events.as_ref(),
            ProcessEvent::SourceIdentified {
                path: path.display().to_string(),
                size,
            },
        );
    }

    let result = create_logo_overlay(
        backend,
        base,
        overlay,
        output_dir,
        &config.overlay.set_config(),
    )?;
    emit(
        events.as_ref(),
        ProcessEvent::OverlayWritten {
            overlay: result.clone(),
        },
    );

    Ok(OverlayManifest {
        base: base.display().to_string(),
        overlay: overlay.display().to_string(),
        result,
    })
}

/// Fit-and-crop a single source into `output`, creating parent directories.
pub fn run_fit(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    target: Size,
    quality: Quality,
) -> Result<(), ProcessError> {
    require_source(source)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    backend.fit(&FitParams {
        source: source.to_path_buf(),
        outputs: vec![output.to_path_buf()],
        target,
        quality,
    })?;
    Ok(())
}

/// Write a manifest as pretty JSON to `output_dir/manifest.json`.
pub fn write_manifest(
    output_dir: &Path,
    manifest: &impl Serialize,
) -> Result<PathBuf, ProcessError> {
    let path = output_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
