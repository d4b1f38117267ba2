//! # brandkit
//!
//! Generates the branding assets of a desktop application (splash and header
//! banners, a composited logo, and its icon-sized variants) from a handful of
//! source images.
//!
//! # Architecture: Decode → Transform → Encode
//!
//! Every asset goes through three independent stages:
//!
//! ```text
//! 1. Decode     file      →  DynamicImage      (rust_backend::load_image)
//! 2. Transform  image     →  image             (imaging::transform, pure)
//! 3. Encode     image     →  png / jpg / webp  (rust_backend::save_image)
//! ```
//!
//! Only the transform stage holds logic worth testing in isolation, and it
//! never touches the filesystem. The backend trait wraps stages 1–3 so the
//! operations that decide *which* files to write can be tested against a
//! recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Dimension math, pure transforms, backend trait, `image`-crate backend, operations |
//! | [`config`] | `brandkit.toml` loading, merging over stock defaults, validation |
//! | [`process`] | Command runs: source checks, parallel banner generation, manifests |
//! | [`output`] | CLI output formatting |
//!
//! # Fit and Crop
//!
//! [`imaging::fit_and_crop`] scales a source by the larger of the two axis
//! ratios so it covers the target box, then crops the centered target region.
//! The output is always exactly the requested size with no distortion. Crop
//! offsets use floor division, so an odd leftover pixel is dropped from the
//! bottom/right edge.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
