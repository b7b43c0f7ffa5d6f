//! Shared fixtures for unit tests: a size registry covering the interesting
//! configurations and a handful of originals.

use crate::config::{EngineConfig, SizeConfig, SizeRegistry, parse_config};
use crate::media::{Attachment, MemoryLibrary};
use std::fs;
use std::path::Path;

pub const UPLOADS: &str = "https://example.org/uploads";

pub const SIZES_TOML: &str = r#"
[sizes.large]
resize = [1400]
srcset = [[560]]
sizes = "100vw"
name = "Large"

[sizes.large-x-descriptors]
resize = [1400]
srcset = [[560], "1x", "1.5x"]
sizes = "100vw"

[sizes.resize-only]
resize = [500]

[sizes.single]
resize = [768]
sizes = "50vw"

[sizes.medium]
resize = [600]

[sizes.upscale-default]
resize = [1400]
srcset = [[150]]
sizes = "100vw"

[sizes.upscale-allow]
resize = [1400]
srcset = [[150]]
sizes = "100vw"
upscale = true

[sizes.upscale-no-style]
resize = [1400]
srcset = [[150]]
sizes = "100vw"
upscale = { style_attr = false }

[sizes.upscale-style-height]
resize = [1400]
srcset = [[150]]
sizes = "100vw"
upscale = { style_attr = "height" }

[sizes.portrait]
resize = [0, 1400]
srcset = [[0, 150]]
sizes = "100vw"

[sizes.webp]
resize = [1400]
srcset = [[560]]
sizes = "100vw"
webp = true

[sizes.webp-square]
resize = [400, 400]
webp = true

[sizes.webp-density]
resize = [260]
srcset = ["1x", "2x"]
webp = true

[sizes.tojpg]
resize = [1400]
srcset = [[560]]
sizes = "100vw"
tojpg = true

[sizes.pages-only]
resize = [300]
post_types = ["page"]

[sizes.responsive-content-image]
resize = [400]
srcset = [[370], [768]]
sizes = "(min-width: 400px) 400px, 100vw"
"#;

pub fn config() -> EngineConfig {
    parse_config(SIZES_TOML).expect("fixture config must parse")
}

pub fn registry() -> SizeRegistry {
    config().sizes
}

pub fn size(key: &str) -> SizeConfig {
    registry()
        .get(key)
        .cloned()
        .unwrap_or_else(|| panic!("no fixture size {key}"))
}

/// 2400×1600 JPEG.
pub fn landscape() -> Attachment {
    let mut a = Attachment::new(1, &format!("{UPLOADS}/test.jpg"), 2400, 1600, "image/jpeg");
    a.alt = "A dog on the beach".into();
    a
}

/// 200×133 JPEG, smaller than most sizes.
pub fn small() -> Attachment {
    Attachment::new(2, &format!("{UPLOADS}/test-200px.jpg"), 200, 133, "image/jpeg")
}

/// 133×200 JPEG.
pub fn portrait() -> Attachment {
    Attachment::new(
        3,
        &format!("{UPLOADS}/test-133px-portrait.jpg"),
        133,
        200,
        "image/jpeg",
    )
}

/// 2400×1600 PNG.
pub fn png() -> Attachment {
    Attachment::new(4, &format!("{UPLOADS}/logo.png"), 2400, 1600, "image/png")
}

/// An SVG written to `dir` with the given markup.
pub fn svg(dir: &Path, id: u64, markup: &str) -> Attachment {
    let path = dir.join(format!("vector-{id}.svg"));
    fs::write(&path, markup).expect("write fixture svg");
    let mut a = Attachment::new(
        id,
        &format!("{UPLOADS}/vector-{id}.svg"),
        0,
        0,
        "image/svg+xml",
    );
    a.path = Some(path);
    a
}

pub fn library() -> MemoryLibrary {
    MemoryLibrary::new()
        .with(landscape())
        .with(small())
        .with(portrait())
        .with(png())
}

pub fn url(file: &str) -> String {
    format!("{UPLOADS}/{file}")
}
