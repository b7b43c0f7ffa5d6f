//! Size configuration module.
//!
//! Loads the `sizes.toml` file that drives every resolution: a `[rendering]`
//! table with environment switches, and one `[sizes.<key>]` table per named
//! image size.
//!
//! ## Config File
//!
//! ```toml
//! [rendering]
//! lazy_loading = true            # Environment allows the `loading` attribute
//! src_default = "placeholder"    # placeholder | default-variant | disabled
//! placeholder = "data:image/gif;base64,..."
//!
//! [sizes.large]
//! resize = [1400]                # [width, height?, crop?, force?]
//! srcset = [[560], 2, "1.5x"]   # explicit dims, ratios, density descriptors
//! sizes = "100vw"
//! upscale = false                # or { allow = false, style_attr = "width" }
//! webp = true                    # or { quality = 80, force = false }
//! tojpg = false                  # or a background colour, e.g. "#FFFFFF"
//! letterbox = false              # or a padding colour, e.g. "#000000"
//! post_types = ["", "page", "post"]
//! show_in_ui = true
//! generate_srcset_sizes = true
//! name = "Large"
//! ```
//!
//! Size tables are loosely shaped on purpose (positional `resize` arrays,
//! bool-or-table options). [`normalize`] turns each one into a strongly
//! typed [`SizeConfig`] once, at load time, and rejects anything malformed.
//! Unknown keys are rejected to catch typos early.
//!
//! Legacy spellings are still accepted with a warning: `oversize` for
//! `upscale` and `size` for `sizes`.

use crate::imaging::{CropMode, Quality, WebpParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Post types a size applies to when `post_types` is not configured.
/// The empty string stands for images that are not attached to any post.
pub const DEFAULT_POST_TYPES: [&str; 3] = ["", "page", "post"];

/// Background colour used by `tojpg = true`.
pub const DEFAULT_TOJPG_COLOR: &str = "#FFFFFF";

/// Padding colour used by `letterbox = true`.
pub const DEFAULT_LETTERBOX_COLOR: &str = "#000000";

/// Size keys the engine handles itself without resizing.
pub const RESERVED_KEYS: [&str; 2] = ["full", "original"];

const SIZE_KEYS: &[&str] = &[
    "resize",
    "srcset",
    "sizes",
    "size",
    "upscale",
    "oversize",
    "webp",
    "tojpg",
    "letterbox",
    "post_types",
    "show_in_ui",
    "generate_srcset_sizes",
    "name",
];

/// Default rendering request of a size: `resize = [width, height, crop, force]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resize {
    /// Requested width; 0 means "derive from height".
    pub width: u32,
    /// Requested height; `None` means "derive from width".
    pub height: Option<u32>,
    pub crop: CropMode,
    pub force: bool,
}

impl Resize {
    /// The `(width, height)` pair handed to the resizer, 0 for a derived side.
    pub fn request(&self) -> (u32, u32) {
        (self.width, self.height.unwrap_or(0))
    }
}

/// One configured `srcset` entry, classified once at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum SrcsetEntry {
    /// `[w]` or `[w, h]`.
    Dimensions { width: u32, height: Option<u32> },
    /// A bare multiplier of the default `resize` dimensions, e.g. `2` or `"1.5"`.
    Ratio(f64),
    /// A density descriptor such as `"2x"`, kept verbatim for the output.
    Density { ratio: f64, descriptor: String },
}

/// Which axis the clamping `style` attribute constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleAttr {
    Off,
    /// Follow whichever axis was clamped.
    #[default]
    Auto,
    Width,
    Height,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Upscale {
    /// Allow variants larger than the natural image.
    pub allow: bool,
    pub style_attr: StyleAttr,
}

/// A normalized image size.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeConfig {
    pub key: String,
    pub name: Option<String>,
    pub resize: Resize,
    pub srcset: Vec<SrcsetEntry>,
    pub sizes: Option<String>,
    pub upscale: Upscale,
    pub webp: Option<WebpParams>,
    /// Background colour when converting to JPEG.
    pub tojpg: Option<String>,
    /// Padding colour when letterboxing.
    pub letterbox: Option<String>,
    pub post_types: Vec<String>,
    pub show_in_ui: bool,
    pub generate_srcset_sizes: bool,
}

impl SizeConfig {
    /// A size with only a `resize` request and every option at its default.
    pub fn new(key: &str, width: u32, height: Option<u32>) -> Self {
        Self {
            key: key.to_string(),
            name: None,
            resize: Resize {
                width,
                height: height.filter(|h| *h > 0),
                crop: CropMode::Default,
                force: false,
            },
            srcset: Vec::new(),
            sizes: None,
            upscale: Upscale::default(),
            webp: None,
            tojpg: None,
            letterbox: None,
            post_types: DEFAULT_POST_TYPES.iter().map(|s| s.to_string()).collect(),
            show_in_ui: true,
            generate_srcset_sizes: true,
        }
    }

    /// Whether images attached to `post_type` (`None` when unattached) get
    /// this size pre-generated.
    pub fn applies_to_post_type(&self, post_type: Option<&str>) -> bool {
        let post_type = post_type.unwrap_or("");
        self.post_types
            .iter()
            .any(|p| p == "all" || p == post_type)
    }

    /// Display name for size choosers.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

// ============================================================================
// Normalization
// ============================================================================

fn invalid(key: &str, message: impl std::fmt::Display) -> ConfigError {
    ConfigError::Validation(format!("size `{key}`: {message}"))
}

/// Non-negative whole pixel count. Floats are rounded.
fn pixels(value: &toml::Value) -> Option<u32> {
    match value {
        toml::Value::Integer(i) => u32::try_from(*i).ok(),
        toml::Value::Float(f) if f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64 => {
            Some(f.round() as u32)
        }
        _ => None,
    }
}

fn positive_ratio(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn expect_bool(key: &str, field: &str, value: &toml::Value) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| invalid(key, format!("`{field}` must be a boolean")))
}

fn expect_str(key: &str, field: &str, value: &toml::Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(key, format!("`{field}` must be a string")))
}

fn parse_resize(key: &str, value: Option<&toml::Value>) -> Result<Resize, ConfigError> {
    let value = value.ok_or_else(|| invalid(key, "missing `resize`"))?;
    let items = value
        .as_array()
        .ok_or_else(|| invalid(key, "`resize` must be an array"))?;
    if items.is_empty() || items.len() > 4 {
        return Err(invalid(key, "`resize` takes 1 to 4 items"));
    }

    let width = pixels(&items[0])
        .ok_or_else(|| invalid(key, "`resize` width must be a non-negative number"))?;
    let height = match items.get(1) {
        Some(v) => pixels(v)
            .ok_or_else(|| invalid(key, "`resize` height must be a non-negative number"))?,
        None => 0,
    };
    if width == 0 && height == 0 {
        return Err(invalid(key, "`resize` needs a width or a height"));
    }
    let crop = match items.get(2) {
        Some(v) => {
            let name = v
                .as_str()
                .ok_or_else(|| invalid(key, "`resize` crop must be a string"))?;
            CropMode::parse(name).ok_or_else(|| invalid(key, format!("unknown crop `{name}`")))?
        }
        None => CropMode::Default,
    };
    let force = match items.get(3) {
        Some(v) => expect_bool(key, "resize[3]", v)?,
        None => false,
    };

    Ok(Resize {
        width,
        height: (height > 0).then_some(height),
        crop,
        force,
    })
}

fn parse_srcset_entry(key: &str, value: &toml::Value) -> Result<SrcsetEntry, ConfigError> {
    match value {
        toml::Value::Array(items) => {
            if items.is_empty() || items.len() > 2 {
                return Err(invalid(key, "srcset dimensions take 1 or 2 items"));
            }
            let width = pixels(&items[0])
                .ok_or_else(|| invalid(key, "srcset width must be a non-negative number"))?;
            let height = match items.get(1) {
                Some(v) => pixels(v)
                    .ok_or_else(|| invalid(key, "srcset height must be a non-negative number"))?,
                None => 0,
            };
            if width == 0 && height == 0 {
                return Err(invalid(key, "srcset dimensions need a width or a height"));
            }
            Ok(SrcsetEntry::Dimensions {
                width,
                height: (height > 0).then_some(height),
            })
        }
        toml::Value::Integer(i) => positive_ratio(*i as f64)
            .map(SrcsetEntry::Ratio)
            .ok_or_else(|| invalid(key, format!("srcset ratio {i} must be positive"))),
        toml::Value::Float(f) => positive_ratio(*f)
            .map(SrcsetEntry::Ratio)
            .ok_or_else(|| invalid(key, format!("srcset ratio {f} must be positive"))),
        toml::Value::String(s) => {
            let trimmed = s.trim();
            if let Some(ratio) = trimmed
                .strip_suffix('x')
                .and_then(|n| n.parse::<f64>().ok())
                .and_then(positive_ratio)
            {
                return Ok(SrcsetEntry::Density {
                    ratio,
                    descriptor: trimmed.to_string(),
                });
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(positive_ratio)
                .map(SrcsetEntry::Ratio)
                .ok_or_else(|| invalid(key, format!("unrecognized srcset entry \"{s}\"")))
        }
        other => Err(invalid(
            key,
            format!("unsupported srcset entry of type {}", other.type_str()),
        )),
    }
}

fn parse_style_attr(key: &str, value: &toml::Value) -> Result<StyleAttr, ConfigError> {
    match value {
        toml::Value::Boolean(true) => Ok(StyleAttr::Auto),
        toml::Value::Boolean(false) => Ok(StyleAttr::Off),
        toml::Value::String(s) if s == "width" => Ok(StyleAttr::Width),
        toml::Value::String(s) if s == "height" => Ok(StyleAttr::Height),
        _ => Err(invalid(
            key,
            "`style_attr` must be a boolean, \"width\" or \"height\"",
        )),
    }
}

fn parse_upscale(key: &str, value: &toml::Value) -> Result<Upscale, ConfigError> {
    match value {
        toml::Value::Boolean(allow) => Ok(Upscale {
            allow: *allow,
            style_attr: if *allow { StyleAttr::Auto } else { StyleAttr::Off },
        }),
        toml::Value::Table(table) => {
            if let Some(unknown) = table
                .keys()
                .find(|k| !matches!(k.as_str(), "allow" | "style_attr"))
            {
                return Err(invalid(key, format!("unknown upscale key `{unknown}`")));
            }
            let defaults = Upscale::default();
            Ok(Upscale {
                allow: match table.get("allow") {
                    Some(v) => expect_bool(key, "upscale.allow", v)?,
                    None => defaults.allow,
                },
                style_attr: match table.get("style_attr") {
                    Some(v) => parse_style_attr(key, v)?,
                    None => defaults.style_attr,
                },
            })
        }
        _ => Err(invalid(key, "`upscale` must be a boolean or a table")),
    }
}

fn parse_webp(key: &str, value: &toml::Value) -> Result<Option<WebpParams>, ConfigError> {
    match value {
        toml::Value::Boolean(false) => Ok(None),
        toml::Value::Boolean(true) => Ok(Some(WebpParams::default())),
        toml::Value::Table(table) => {
            let mut params = WebpParams::default();
            for (name, v) in table {
                match name.as_str() {
                    "quality" => {
                        let q = pixels(v).ok_or_else(|| {
                            invalid(key, "`webp.quality` must be a non-negative number")
                        })?;
                        params.quality = Quality::new(q);
                    }
                    "force" => params.force = expect_bool(key, "webp.force", v)?,
                    other => return Err(invalid(key, format!("unknown webp key `{other}`"))),
                }
            }
            Ok(Some(params))
        }
        _ => Err(invalid(key, "`webp` must be a boolean or a table")),
    }
}

fn parse_color(
    key: &str,
    field: &str,
    value: &toml::Value,
    default: &str,
) -> Result<Option<String>, ConfigError> {
    match value {
        toml::Value::Boolean(false) => Ok(None),
        toml::Value::Boolean(true) => Ok(Some(default.to_string())),
        toml::Value::String(color) => Ok(Some(color.clone())),
        _ => Err(invalid(
            key,
            format!("`{field}` must be a boolean or a colour string"),
        )),
    }
}

fn parse_post_types(key: &str, value: &toml::Value) -> Result<Vec<String>, ConfigError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(key, "`post_types` must be an array of strings"))?;
    items
        .iter()
        .map(|v| expect_str(key, "post_types", v))
        .collect()
}

/// Turn one raw `[sizes.<key>]` table into a [`SizeConfig`].
pub fn normalize(key: &str, raw: &toml::Table) -> Result<SizeConfig, ConfigError> {
    if let Some(unknown) = raw.keys().find(|k| !SIZE_KEYS.contains(&k.as_str())) {
        return Err(invalid(key, format!("unknown key `{unknown}`")));
    }

    let resize = parse_resize(key, raw.get("resize"))?;

    let srcset = match raw.get("srcset") {
        Some(toml::Value::Array(entries)) => entries
            .iter()
            .map(|entry| parse_srcset_entry(key, entry))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(invalid(key, "`srcset` must be an array")),
        None => Vec::new(),
    };

    let sizes = match (raw.get("sizes"), raw.get("size")) {
        (Some(v), _) => Some(expect_str(key, "sizes", v)?),
        (None, Some(v)) => {
            warn!(size = %key, "the `size` key is deprecated, use `sizes` instead");
            Some(expect_str(key, "size", v)?)
        }
        (None, None) => None,
    };

    let upscale = match (raw.get("upscale"), raw.get("oversize")) {
        (Some(v), _) => parse_upscale(key, v)?,
        (None, Some(v)) => {
            warn!(size = %key, "the `oversize` key is deprecated, use `upscale` instead");
            parse_upscale(key, v)?
        }
        (None, None) => Upscale::default(),
    };

    let webp = match raw.get("webp") {
        Some(v) => parse_webp(key, v)?,
        None => None,
    };
    let tojpg = match raw.get("tojpg") {
        Some(v) => parse_color(key, "tojpg", v, DEFAULT_TOJPG_COLOR)?,
        None => None,
    };
    let letterbox = match raw.get("letterbox") {
        Some(v) => parse_color(key, "letterbox", v, DEFAULT_LETTERBOX_COLOR)?,
        None => None,
    };
    let post_types = match raw.get("post_types") {
        Some(v) => parse_post_types(key, v)?,
        None => DEFAULT_POST_TYPES.iter().map(|s| s.to_string()).collect(),
    };
    let show_in_ui = match raw.get("show_in_ui") {
        Some(v) => expect_bool(key, "show_in_ui", v)?,
        None => true,
    };
    let generate_srcset_sizes = match raw.get("generate_srcset_sizes") {
        Some(v) => expect_bool(key, "generate_srcset_sizes", v)?,
        None => true,
    };
    let name = match raw.get("name") {
        Some(v) => Some(expect_str(key, "name", v)?),
        None => None,
    };

    Ok(SizeConfig {
        key: key.to_string(),
        name,
        resize,
        srcset,
        sizes,
        upscale,
        webp,
        tojpg,
        letterbox,
        post_types,
        show_in_ui,
        generate_srcset_sizes,
    })
}

// ============================================================================
// Registry
// ============================================================================

/// A size as the host media system registers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntermediateSize {
    pub key: String,
    pub width: u32,
    pub height: u32,
    pub crop: bool,
}

/// The named sizes of one configuration, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeRegistry {
    sizes: Vec<SizeConfig>,
}

impl SizeRegistry {
    /// Normalize every entry of a `[sizes]` table.
    pub fn from_table(table: &toml::Table) -> Result<Self, ConfigError> {
        let mut sizes = Vec::with_capacity(table.len());
        for (key, value) in table {
            let raw = value.as_table().ok_or_else(|| invalid(key, "must be a table"))?;
            if RESERVED_KEYS.contains(&key.as_str()) {
                warn!(size = %key, "size key is reserved and will never be resized");
            }
            sizes.push(normalize(key, raw)?);
        }
        Ok(Self { sizes })
    }

    pub fn from_sizes(sizes: Vec<SizeConfig>) -> Self {
        Self { sizes }
    }

    /// Look up a size without logging misses.
    pub fn get(&self, key: &str) -> Option<&SizeConfig> {
        self.sizes.iter().find(|s| s.key == key)
    }

    /// Look up a size, warning when the key is not configured.
    pub fn lookup(&self, key: &str) -> Option<&SizeConfig> {
        let found = self.get(key);
        if found.is_none() {
            warn!(size = %key, "image size is not configured");
        }
        found
    }

    /// The `thumbnail` size, or the first configured size.
    pub fn thumbnail(&self) -> Option<&SizeConfig> {
        self.get("thumbnail").or_else(|| self.sizes.first())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizeConfig> {
        self.sizes.iter()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// `(key, display name)` pairs for sizes shown in choosers.
    pub fn ui_choices(&self) -> Vec<(&str, &str)> {
        self.sizes
            .iter()
            .filter(|s| s.show_in_ui)
            .map(|s| (s.key.as_str(), s.display_name()))
            .collect()
    }

    /// Registration data for the host media system. A fixed height means
    /// the host crops.
    pub fn intermediate_sizes(&self) -> Vec<IntermediateSize> {
        self.sizes
            .iter()
            .map(|s| IntermediateSize {
                key: s.key.clone(),
                width: s.resize.width,
                height: s.resize.height.unwrap_or(0),
                crop: s.resize.height.is_some(),
            })
            .collect()
    }
}

// ============================================================================
// Config file
// ============================================================================

/// What the fallback `src` holds when a `srcset` is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SrcDefaultMode {
    #[default]
    Placeholder,
    DefaultVariant,
    Disabled,
}

/// 1×1 transparent GIF.
pub const PLACEHOLDER_GIF: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Rendering switches that belong to the environment, not to one size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderingConfig {
    /// Whether the `loading` attribute may be emitted at all.
    pub lazy_loading: bool,
    pub src_default: SrcDefaultMode,
    /// Fallback `src` used by [`SrcDefaultMode::Placeholder`].
    pub placeholder: String,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            lazy_loading: true,
            src_default: SrcDefaultMode::Placeholder,
            placeholder: PLACEHOLDER_GIF.to_string(),
        }
    }
}

/// A fully loaded configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub rendering: RenderingConfig,
    pub sizes: SizeRegistry,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rendering.src_default == SrcDefaultMode::Placeholder
            && self.rendering.placeholder.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "rendering.placeholder must not be empty when src_default = \"placeholder\""
                    .into(),
            ));
        }
        Ok(())
    }
}

/// Parse and validate a configuration document.
pub fn parse_config(text: &str) -> Result<EngineConfig, ConfigError> {
    let mut doc: toml::Table = toml::from_str(text)?;

    let rendering = match doc.remove("rendering") {
        Some(value) => value.try_into::<RenderingConfig>()?,
        None => RenderingConfig::default(),
    };
    let sizes = match doc.remove("sizes") {
        Some(toml::Value::Table(table)) => SizeRegistry::from_table(&table)?,
        Some(_) => {
            return Err(ConfigError::Validation("`sizes` must be a table".into()));
        }
        None => SizeRegistry::default(),
    };
    if let Some(unknown) = doc.keys().next() {
        return Err(ConfigError::Validation(format!(
            "unknown top-level key `{unknown}`"
        )));
    }

    let config = EngineConfig { rendering, sizes };
    config.validate()?;
    Ok(config)
}

/// Load a configuration file from disk.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load-once holder for a configuration file shared by every resolution.
///
/// The first successful [`get`](Self::get) parses the file; later calls hand
/// out the same `Arc`. With `bypass` set, every call re-reads the file.
#[derive(Debug)]
pub struct RegistryCache {
    path: PathBuf,
    bypass: bool,
    cell: OnceLock<Arc<EngineConfig>>,
}

impl RegistryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bypass: false,
            cell: OnceLock::new(),
        }
    }

    pub fn bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }

    pub fn get(&self) -> Result<Arc<EngineConfig>, ConfigError> {
        if self.bypass {
            return load_config(&self.path).map(Arc::new);
        }
        if let Some(config) = self.cell.get() {
            return Ok(Arc::clone(config));
        }
        let loaded = Arc::new(load_config(&self.path)?);
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }
}

/// Returns a fully-commented `sizes.toml` with a typical set of sizes.
///
/// Printed by `sizeset gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# sizeset configuration
# =====================
# Every image size the templates can ask for lives under [sizes.<key>].
# Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Rendering environment
# ---------------------------------------------------------------------------
[rendering]
# Emit the `loading` attribute. Turn off if something else lazy-loads images.
lazy_loading = true

# What goes into `src` next to a srcset:
#   "placeholder"      the placeholder below (a 1x1 transparent GIF)
#   "default-variant"  the resized default variant
#   "disabled"         no src at all
src_default = "placeholder"
placeholder = "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7"

# ---------------------------------------------------------------------------
# Image sizes
# ---------------------------------------------------------------------------
# resize    = [width, height, crop, force]. 0 or a missing height derives
#             that side from the image's aspect ratio.
# srcset    = extra candidates: [w] or [w, h], a ratio of `resize` such as 2,
#             or a density descriptor such as "2x".
# sizes     = the `sizes` attribute emitted next to a srcset.
# upscale   = allow variants larger than the original. A table form
#             { allow = false, style_attr = "width" } also controls the
#             inline style that clamps an oversized image.
# webp      = true, or { quality = 80, force = false }.
# tojpg     = convert to JPEG, filling transparency with a colour.
# letterbox = pad into the exact box instead of cropping.

[sizes.thumbnail]
resize = [150, 150, "center"]
name = "Thumbnail"

[sizes.medium]
resize = [600]
srcset = [[300], 2]
sizes = "(min-width: 600px) 600px, 100vw"
name = "Medium"

[sizes.large]
resize = [1400]
srcset = [[560], [768], 1.5]
sizes = "100vw"
webp = true
name = "Large"

[sizes.header]
resize = [1400, 600, "center"]
srcset = ["1x", "2x"]
upscale = { allow = false, style_attr = "width" }
post_types = ["page"]
show_in_ui = false
"##
}
