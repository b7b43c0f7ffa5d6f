//! Generated-file naming for resized and converted variants.
//!
//! Every variant lives next to its original and encodes the operation in
//! its file name, so the URL of a variant is known without touching disk:
//!
//! - resize: `photo.jpg` → `photo-560x0-c-default.jpg` (`-f` appended when forced)
//! - letterbox: `photo.jpg` → `photo-lbox-800x600-000000.jpg`
//! - JPEG conversion: `photo.png` → `photo.jpg`
//! - WebP conversion: `photo-560x0-c-default.jpg` → `photo-560x0-c-default.webp`
//!
//! A 0 dimension stays 0 in the name: the resizer derives it.

use crate::imaging::{CropMode, ResizeParams};

/// An image URL split around its file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUrl<'a> {
    /// Everything up to and including the last `/`.
    pub dir: &'a str,
    /// File name without extension.
    pub stem: &'a str,
    /// Extension without the dot. Empty if none.
    pub extension: &'a str,
}

/// Split a URL into directory, stem and extension. Query strings and
/// fragments are dropped: they never belong to a generated file.
pub fn parse_url(url: &str) -> ParsedUrl<'_> {
    let path = match url.find(['?', '#']) {
        Some(end) => &url[..end],
        None => url,
    };
    let file_start = path.rfind('/').map_or(0, |slash| slash + 1);
    let (dir, file) = path.split_at(file_start);
    match file.rfind('.') {
        Some(dot) if dot > 0 => ParsedUrl {
            dir,
            stem: &file[..dot],
            extension: &file[dot + 1..],
        },
        _ => ParsedUrl {
            dir,
            stem: file,
            extension: "",
        },
    }
}

fn assemble(dir: &str, stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        format!("{dir}{stem}")
    } else {
        format!("{dir}{stem}.{extension}")
    }
}

/// URL of a resized variant.
pub fn resized_url(source: &str, width: u32, height: u32, crop: CropMode, force: bool) -> String {
    let parts = parse_url(source);
    let force = if force { "-f" } else { "" };
    let stem = format!("{}-{width}x{height}-c-{crop}{force}", parts.stem);
    assemble(parts.dir, &stem, parts.extension)
}

/// URL of a letterboxed variant padded with `color`.
pub fn letterbox_url(source: &str, width: u32, height: u32, color: &str) -> String {
    let parts = parse_url(source);
    let color = color.trim_start_matches('#');
    let stem = format!("{}-lbox-{width}x{height}-{color}", parts.stem);
    assemble(parts.dir, &stem, parts.extension)
}

/// URL of the JPEG conversion of `source`.
pub fn jpg_url(source: &str) -> String {
    let parts = parse_url(source);
    assemble(parts.dir, parts.stem, "jpg")
}

/// URL of the WebP conversion of `source`.
pub fn webp_url(source: &str) -> String {
    let parts = parse_url(source);
    assemble(parts.dir, parts.stem, "webp")
}

/// URL of the variant a resize request produces.
///
/// `tojpg` converts the source before resizing. Letterboxing needs a fixed
/// box; with a derived side it falls back to a plain resize.
pub fn variant_url(params: &ResizeParams) -> String {
    let source = match params.to_jpg {
        Some(_) => jpg_url(&params.source_url),
        None => params.source_url.clone(),
    };
    match &params.letterbox {
        Some(color) if params.width > 0 && params.height > 0 => {
            letterbox_url(&source, params.width, params.height, color)
        }
        _ => resized_url(&source, params.width, params.height, params.crop, params.force),
    }
}

/// URL of the unscaled original behind a `-scaled` upload.
///
/// Large uploads are stored downscaled as `photo-scaled.jpg` next to the
/// original `photo.jpg`.
pub fn unscaled_url(url: &str) -> String {
    let parts = parse_url(url);
    match parts.stem.strip_suffix("-scaled") {
        Some(stem) => assemble(parts.dir, stem, parts.extension),
        None => url.to_string(),
    }
}
