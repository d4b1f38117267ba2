//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of an image or a requested output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl From<[u32; 2]> for Size {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A crop rectangle inside a larger image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Scale factor that makes `source` cover `target` on both axes.
///
/// The larger of the two axis ratios wins, so neither resized dimension ends
/// up smaller than the target.
pub fn cover_scale(source: Size, target: Size) -> f64 {
    let width_ratio = target.width as f64 / source.width as f64;
    let height_ratio = target.height as f64 / source.height as f64;
    width_ratio.max(height_ratio)
}

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while keeping the
/// source aspect ratio. One dimension matches the target, the other may
/// exceed it. Each dimension is clamped to at least the target so rounding
/// noise can never push the crop box out of bounds.
///
/// Callers must ensure neither size is empty.
///
/// ```
/// # use brandkit::imaging::{Size, calculate_fill_dimensions};
/// // 1920x1080 into a 400x400 square: height wins, width overflows
/// let fill = calculate_fill_dimensions(Size::new(1920, 1080), Size::new(400, 400));
/// assert_eq!(fill, Size::new(711, 400));
/// ```
pub fn calculate_fill_dimensions(source: Size, target: Size) -> Size {
    let scale = cover_scale(source, target);
    let width = (source.width as f64 * scale).round() as u32;
    let height = (source.height as f64 * scale).round() as u32;
    Size {
        width: width.max(target.width),
        height: height.max(target.height),
    }
}

/// Calculate a centered crop box of `target` size inside `resized`.
///
/// Offsets use floor division, so an odd remainder keeps one extra pixel on
/// the top/left side and drops it from the bottom/right.
pub fn calculate_crop_box(resized: Size, target: Size) -> CropBox {
    CropBox {
        left: resized.width.saturating_sub(target.width) / 2,
        top: resized.height.saturating_sub(target.height) / 2,
        width: target.width,
        height: target.height,
    }
}

/// Placement of two layers on a shared transparent canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    pub canvas: Size,
    pub base_position: (u32, u32),
    pub overlay_position: (u32, u32),
}

/// Lay out a base layer and an offset overlay layer with a uniform margin.
///
/// The base sits at `(margin, margin)` and the overlay at the base position
/// plus `offset`. Negative offsets shift the base right/down instead, so no
/// layer ever starts inside the left or top margin.
///
/// Returns `None` when the canvas would not fit in `u32`.
///
/// ```
/// # use brandkit::imaging::{Size, calculate_overlay_layout};
/// let layout =
///     calculate_overlay_layout(Size::new(300, 200), Size::new(250, 150), (100, 80), 25).unwrap();
/// assert_eq!(layout.canvas, Size::new(400, 280));
/// assert_eq!(layout.base_position, (25, 25));
/// assert_eq!(layout.overlay_position, (125, 105));
/// ```
pub fn calculate_overlay_layout(
    base: Size,
    overlay: Size,
    offset: (i32, i32),
    margin: u32,
) -> Option<OverlayLayout> {
    let (dx, dy) = offset;
    let shift_x = dx.unsigned_abs();
    let shift_y = dy.unsigned_abs();

    let (base_x, overlay_x) = if dx >= 0 { (0, shift_x) } else { (shift_x, 0) };
    let (base_y, overlay_y) = if dy >= 0 { (0, shift_y) } else { (shift_y, 0) };

    let content_w = base_x
        .checked_add(base.width)?
        .max(overlay_x.checked_add(overlay.width)?);
    let content_h = base_y
        .checked_add(base.height)?
        .max(overlay_y.checked_add(overlay.height)?);
    let padding = margin.checked_mul(2)?;

    Some(OverlayLayout {
        canvas: Size {
            width: content_w.checked_add(padding)?,
            height: content_h.checked_add(padding)?,
        },
        base_position: (margin + base_x, margin + base_y),
        overlay_position: (margin + overlay_x, margin + overlay_y),
    })
}
