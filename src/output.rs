//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! # Output Format
//!
//! ## Banners
//!
//! ```text
//! Source: brand/source.jpg (1920x1080)
//! 001 splash_screen 800x450
//!     banner_splash_screen.png
//!     banner_splash_screen.jpg
//! 002 header_banner 600x200
//!     ...
//!
//! Generated 6 banners, 12 files → dist
//! ```
//!
//! ## Overlay
//!
//! ```text
//! logo_overlay.png 1340x860
//!     icon 256x256 → logo_icon.png
//!     banner 400x200 → logo_banner.png
//! ```
//!
//! ## Check
//!
//! ```text
//! Banners (png, jpg; quality 95)
//! 001 splash_screen 800x450
//! ...
//! Overlay logo_overlay.png (offset 100,80; margin 25)
//!     icon 256x256 stretch
//! ```

use crate::config::BrandConfig;
use crate::imaging::{GeneratedBanner, GeneratedOverlay, VariantMode};
use crate::process::{BannerManifest, OverlayManifest, ProcessEvent};
use std::path::Path;

/// Format a 0-based position as a 1-based, 3-digit zero-padded index.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos + 1)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn banner_header(index: usize, banner: &GeneratedBanner) -> String {
    format!(
        "{} {} {}x{}",
        format_index(index),
        banner.name,
        banner.width,
        banner.height
    )
}

fn mode_label(mode: VariantMode) -> &'static str {
    match mode {
        VariantMode::Fill => "fill",
        VariantMode::Stretch => "stretch",
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format a single progress event from a run.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::SourceIdentified { path, size } => {
            vec![format!("Source: {} ({})", path, size)]
        }
        ProcessEvent::BannerWritten { index, banner } => {
            let mut lines = vec![banner_header(*index, banner)];
            lines.extend(banner.files.iter().map(|f| format!("{}{}", indent(1), f)));
            lines
        }
        ProcessEvent::OverlayWritten { overlay } => format_overlay(overlay),
    }
}

fn format_overlay(overlay: &GeneratedOverlay) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}x{}",
        overlay.file, overlay.width, overlay.height
    )];
    for variant in &overlay.variants {
        lines.push(format!(
            "{}{} {}x{} → {}",
            indent(1),
            variant.name,
            variant.width,
            variant.height,
            variant.files.join(", ")
        ));
    }
    lines
}

/// Summary line printed after a banner run.
pub fn format_banner_summary(manifest: &BannerManifest, output_dir: &Path) -> Vec<String> {
    let files: usize = manifest.banners.iter().map(|b| b.files.len()).sum();
    vec![
        String::new(),
        format!(
            "Generated {}, {} → {}",
            plural(manifest.banners.len(), "banner"),
            plural(files, "file"),
            output_dir.display()
        ),
    ]
}

/// Summary line printed after an overlay run.
pub fn format_overlay_summary(manifest: &OverlayManifest, output_dir: &Path) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "Composited {} over {} → {}",
            manifest.overlay,
            manifest.base,
            output_dir.display()
        ),
    ]
}

/// Resolved plan shown by `brandkit check`.
pub fn format_check_output(config: &BrandConfig) -> Vec<String> {
    let banners = &config.banners;
    let formats: Vec<&str> = banners.formats.iter().map(|f| f.extension()).collect();

    let mut lines = vec![format!(
        "Banners ({}; quality {})",
        formats.join(", "),
        banners.quality
    )];
    for (i, preset) in banners.presets.iter().enumerate() {
        lines.push(format!(
            "{} {} {}x{}",
            format_index(i),
            preset.name,
            preset.size[0],
            preset.size[1]
        ));
    }

    let overlay = &config.overlay;
    lines.push(String::new());
    lines.push(format!(
        "Overlay {} (offset {},{}; margin {})",
        overlay.filename, overlay.offset[0], overlay.offset[1], overlay.margin
    ));
    for variant in &overlay.variants {
        lines.push(format!(
            "{}{} {}x{} {}",
            indent(1),
            variant.name,
            variant.size[0],
            variant.size[1],
            mode_label(variant.mode)
        ));
    }
    lines
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_banner_summary(manifest: &BannerManifest, output_dir: &Path) {
    print_lines(&format_banner_summary(manifest, output_dir));
}

pub fn print_overlay_summary(manifest: &OverlayManifest, output_dir: &Path) {
    print_lines(&format_overlay_summary(manifest, output_dir));
}

pub fn print_check_output(config: &BrandConfig) {
    print_lines(&format_check_output(config));
}
