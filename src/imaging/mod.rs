//! Image processing on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Fit and crop** | Lanczos3 resize-to-cover + centered `crop_imm` |
//! | **Overlay** | `imageops::overlay` on a transparent RGBA canvas + alpha trim |
//! | **Encode** | PNG, JPEG (quality), lossless WebP |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Transform**: Pure in-memory image stages (no filesystem)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining parameters + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;
pub mod transform;

pub use backend::{ImageBackend, ImagingError};
pub use calculations::{
    CropBox, OverlayLayout, Size, calculate_crop_box, calculate_fill_dimensions,
    calculate_overlay_layout, cover_scale,
};
pub use operations::{
    BannerSetConfig, BannerSpec, GeneratedBanner, GeneratedOverlay, OverlaySetConfig, VariantSpec,
    banner_filename, create_banner, create_banner_set, create_logo_overlay, get_dimensions,
};
pub use params::{FitParams, OutputFormat, OverlayParams, OverlayVariant, Quality, VariantMode};
pub use rust_backend::RustBackend;
pub use transform::fit_and_crop;
