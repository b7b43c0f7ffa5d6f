//! CLI output formatting.
//!
//! # Check
//!
//! ```text
//! Sizes
//! 001 large (Large)
//!     Resize: 1400 × auto
//!     Srcset: 560w, 1x, 1.5x
//!     Sizes: 100vw
//!     WebP: quality 80
//! 002 thumbnail
//!     Resize: 150 × 150, crop center
//!
//! Rendering
//!     Lazy loading: on
//!     Fallback src: placeholder
//!
//! Library
//!     4 attachments
//! ```
//!
//! # Generate
//!
//! ```text
//! Attachment 7
//!     large
//!         560 × 373 → https://example.org/uploads/test-560x0-c-default.jpg
//!         1400 × 933 → https://example.org/uploads/test-1400x0-c-default.jpg
//! Generated 2 variants
//! ```
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::config::{EngineConfig, SizeConfig, SrcDefaultMode, SrcsetEntry, StyleAttr};
use crate::imaging::{CropMode, GeneratedVariant};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn side(value: u32) -> String {
    if value == 0 {
        "auto".to_string()
    } else {
        value.to_string()
    }
}

fn srcset_entry(entry: &SrcsetEntry) -> String {
    match entry {
        SrcsetEntry::Dimensions { width, height: None } => format!("{}w", side(*width)),
        SrcsetEntry::Dimensions { width, height: Some(height) } => {
            format!("{} × {}", side(*width), side(*height))
        }
        SrcsetEntry::Ratio(ratio) => format!("×{ratio}"),
        SrcsetEntry::Density { descriptor, .. } => descriptor.clone(),
    }
}

fn size_lines(index: usize, size: &SizeConfig) -> Vec<String> {
    let mut lines = Vec::new();
    let detail = indent(1);

    match &size.name {
        Some(name) => lines.push(format!("{} {} ({})", format_index(index), size.key, name)),
        None => lines.push(format!("{} {}", format_index(index), size.key)),
    }

    let (width, height) = size.resize.request();
    let mut resize = format!("{}Resize: {} × {}", detail, side(width), side(height));
    if size.resize.crop != CropMode::Default {
        resize.push_str(&format!(", crop {}", size.resize.crop));
    }
    if size.resize.force {
        resize.push_str(", forced");
    }
    lines.push(resize);

    if !size.srcset.is_empty() {
        let entries: Vec<_> = size.srcset.iter().map(srcset_entry).collect();
        lines.push(format!("{}Srcset: {}", detail, entries.join(", ")));
    }
    if let Some(sizes) = &size.sizes {
        lines.push(format!("{}Sizes: {}", detail, sizes));
    }
    if size.upscale.allow {
        lines.push(format!("{}Upscale: allowed", detail));
    }
    if size.upscale.style_attr != StyleAttr::Auto {
        let style = match size.upscale.style_attr {
            StyleAttr::Off => "off",
            StyleAttr::Width => "width",
            StyleAttr::Height => "height",
            StyleAttr::Auto => "auto",
        };
        lines.push(format!("{}Style: {}", detail, style));
    }
    if let Some(webp) = &size.webp {
        let force = if webp.force { ", forced" } else { "" };
        lines.push(format!("{}WebP: quality {}{}", detail, webp.quality.value(), force));
    }
    if let Some(color) = &size.tojpg {
        lines.push(format!("{}JPEG: on {}", detail, color));
    }
    if let Some(color) = &size.letterbox {
        lines.push(format!("{}Letterbox: {}", detail, color));
    }
    if !size.generate_srcset_sizes {
        lines.push(format!("{}Pre-generation: default variant only", detail));
    }
    if !size.show_in_ui {
        lines.push(format!("{}Hidden from size choosers", detail));
    }
    lines
}

/// Format the `check` command output: configured sizes, rendering switches
/// and, when a library was loaded, its size.
pub fn format_check_output(config: &EngineConfig, attachments: Option<usize>) -> Vec<String> {
    let mut lines = vec!["Sizes".to_string()];
    if config.sizes.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, size) in config.sizes.iter().enumerate() {
        lines.extend(size_lines(i + 1, size));
    }

    lines.push(String::new());
    lines.push("Rendering".to_string());
    let lazy = if config.rendering.lazy_loading { "on" } else { "off" };
    lines.push(format!("{}Lazy loading: {}", indent(1), lazy));
    let fallback = match config.rendering.src_default {
        SrcDefaultMode::Placeholder => "placeholder",
        SrcDefaultMode::DefaultVariant => "default variant",
        SrcDefaultMode::Disabled => "disabled",
    };
    lines.push(format!("{}Fallback src: {}", indent(1), fallback));

    if let Some(count) = attachments {
        lines.push(String::new());
        lines.push("Library".to_string());
        let noun = if count == 1 { "attachment" } else { "attachments" };
        lines.push(format!("{}{} {}", indent(1), count, noun));
    }
    lines
}

pub fn print_check_output(config: &EngineConfig, attachments: Option<usize>) {
    for line in format_check_output(config, attachments) {
        println!("{}", line);
    }
}

/// Format the `generate` command output, grouping variants by size.
pub fn format_generate_output(id: u64, variants: &[GeneratedVariant]) -> Vec<String> {
    let mut lines = vec![format!("Attachment {}", id)];
    let mut current: Option<&str> = None;

    for variant in variants {
        if current != Some(variant.size_key.as_str()) {
            lines.push(format!("{}{}", indent(1), variant.size_key));
            current = Some(&variant.size_key);
        }
        lines.push(format!(
            "{}{} × {} \u{2192} {}",
            indent(2),
            variant.width,
            variant.height,
            variant.url
        ));
    }

    let noun = if variants.len() == 1 { "variant" } else { "variants" };
    lines.push(format!("Generated {} {}", variants.len(), noun));
    lines
}

pub fn print_generate_output(id: u64, variants: &[GeneratedVariant]) {
    for line in format_generate_output(id, variants) {
        println!("{}", line);
    }
}
