//! Pure in-memory image transforms.
//!
//! Nothing here touches the filesystem: each function takes a decoded
//! [`DynamicImage`] by reference and returns a new one. Decoding and encoding
//! live in [`rust_backend`](super::rust_backend).
//!
//! All resampling uses Lanczos3. Fill ratios are rarely integers, and
//! nearest-neighbour scaling at those ratios aliases visibly on logos and text.

use super::backend::ImagingError;
use super::calculations::{
    Size, calculate_crop_box, calculate_fill_dimensions, calculate_overlay_layout,
};
use super::params::VariantMode;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};

fn dimensions_of(image: &DynamicImage) -> Size {
    let (width, height) = image.dimensions();
    Size { width, height }
}

fn ensure_non_empty(what: &str, size: Size) -> Result<(), ImagingError> {
    if size.is_empty() {
        return Err(ImagingError::InvalidInput(format!(
            "{what} dimensions must be positive, got {size}"
        )));
    }
    Ok(())
}

/// Scale `source` to cover `target`, then crop the centered `target` region.
///
/// The output is always exactly `target`. Scaling is uniform on both axes,
/// so nothing is distorted; only the overflowing axis loses pixels, split
/// between opposite edges with the odd pixel taken from the bottom/right.
///
/// When the cover size equals the source size no resampling happens, so an
/// image that already has the target size comes back pixel-identical.
pub fn fit_and_crop(source: &DynamicImage, target: Size) -> Result<DynamicImage, ImagingError> {
    let source_size = dimensions_of(source);
    ensure_non_empty("source", source_size)?;
    ensure_non_empty("target", target)?;

    let fill = calculate_fill_dimensions(source_size, target);
    let resized = if fill == source_size {
        source.clone()
    } else {
        source.resize_exact(fill.width, fill.height, FilterType::Lanczos3)
    };

    let crop = calculate_crop_box(fill, target);
    tracing::trace!(
        source = %source_size,
        fill = %fill,
        left = crop.left,
        top = crop.top,
        "fit_and_crop"
    );
    Ok(resized.crop_imm(crop.left, crop.top, crop.width, crop.height))
}

/// Resize to exactly `size`, ignoring the source aspect ratio.
pub fn resize_exact(source: &DynamicImage, size: Size) -> Result<DynamicImage, ImagingError> {
    ensure_non_empty("source", dimensions_of(source))?;
    ensure_non_empty("target", size)?;
    if dimensions_of(source) == size {
        return Ok(source.clone());
    }
    Ok(source.resize_exact(size.width, size.height, FilterType::Lanczos3))
}

/// Bring `source` to `size` using the given mode.
pub fn apply_variant(
    source: &DynamicImage,
    size: Size,
    mode: VariantMode,
) -> Result<DynamicImage, ImagingError> {
    match mode {
        VariantMode::Fill => fit_and_crop(source, size),
        VariantMode::Stretch => resize_exact(source, size),
    }
}

/// Largest composite canvas, in pixels, before allocation is refused (1 GiB of RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Place `overlay` over `base` on a transparent canvas.
///
/// Both layers are converted to RGBA. The base goes at `(margin, margin)`,
/// the overlay at the base position plus `offset`, and the overlay is
/// alpha-blended on top.
///
/// # Errors
///
/// `InvalidInput` when the offset and margin would need a canvas larger
/// than [`MAX_CANVAS_PIXELS`].
pub fn composite(
    base: &DynamicImage,
    overlay: &DynamicImage,
    offset: (i32, i32),
    margin: u32,
) -> Result<DynamicImage, ImagingError> {
    let base_size = dimensions_of(base);
    let overlay_size = dimensions_of(overlay);
    let layout = calculate_overlay_layout(base_size, overlay_size, offset, margin)
        .filter(|l| u64::from(l.canvas.width) * u64::from(l.canvas.height) <= MAX_CANVAS_PIXELS)
        .ok_or_else(|| {
            ImagingError::InvalidInput(format!(
                "overlay canvas for offset ({}, {}) and margin {margin} is too large",
                offset.0, offset.1
            ))
        })?;

    let mut canvas = RgbaImage::new(layout.canvas.width, layout.canvas.height);
    let base_rgba = base.to_rgba8();
    let overlay_rgba = overlay.to_rgba8();

    let (bx, by) = layout.base_position;
    image::imageops::overlay(&mut canvas, &base_rgba, bx as i64, by as i64);
    let (ox, oy) = layout.overlay_position;
    image::imageops::overlay(&mut canvas, &overlay_rgba, ox as i64, oy as i64);

    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Bounding box of pixels with non-zero alpha, as `(left, top, width, height)`.
///
/// Returns `None` when every pixel is fully transparent. Images without an
/// alpha channel are fully opaque, so their box is the whole image.
pub fn visible_bounds(image: &DynamicImage) -> Option<(u32, u32, u32, u32)> {
    if !image.color().has_alpha() {
        let (w, h) = image.dimensions();
        return (w > 0 && h > 0).then_some((0, 0, w, h));
    }

    let rgba = image.to_rgba8();
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut any = false;

    for (x, y, pixel) in rgba.enumerate_pixels() {
        if pixel[3] > 0 {
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    any.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Crop away fully transparent rows and columns around the content.
///
/// A fully transparent image is returned unchanged.
pub fn trim_transparent(image: &DynamicImage) -> DynamicImage {
    match visible_bounds(image) {
        Some((left, top, width, height)) => image.crop_imm(left, top, width, height),
        None => image.clone(),
    }
}
