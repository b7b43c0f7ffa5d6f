//! One original resolved against one size.
//!
//! [`ResponsiveImage`] ties together an [`Attachment`], a rendering target
//! (a configured size, or the `full`/`original` passthroughs) and a backend,
//! and answers everything markup needs: `src`, `srcset`, `sizes`, rendered
//! dimensions, the clamping `style`, and the assembled attribute map.
//!
//! SVGs and the passthrough targets are never resized. SVG dimensions come
//! from the file's markup, read once per image.

use crate::attributes::{AttributeMap, Loading, RenderArgs};
use crate::config::{RenderingConfig, SizeConfig, SrcDefaultMode, StyleAttr};
use crate::imaging::svg::svg_dimensions_from_file;
use crate::imaging::{
    Axis, BackendError, ImageBackend, NaturalSize, ResolvedDimensions, height_from_width,
    resize_variant, resolve, width_from_height,
};
use crate::media::Attachment;
use crate::srcset::build_srcset;
use regex::Regex;
use serde::Serialize;
use std::cell::OnceCell;
use std::sync::LazyLock;
use tracing::warn;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Remove HTML tags and surrounding whitespace.
pub fn strip_tags(text: &str) -> String {
    TAG.replace_all(text, "").trim().to_string()
}

/// What an image is rendered as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    /// The uploaded file as served.
    Full,
    /// The unscaled original behind a `-scaled` upload.
    Original,
    Size(&'a SizeConfig),
}

impl<'a> Target<'a> {
    /// `full` and `original` are handled without a size configuration.
    pub fn reserved(key: &str) -> Option<Self> {
        match key {
            "full" => Some(Self::Full),
            "original" => Some(Self::Original),
            _ => None,
        }
    }
}

/// Natural data of the original behind an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalImage {
    pub max_width: u32,
    pub max_height: u32,
    pub mime_type: String,
    pub source_url: String,
}

impl NaturalImage {
    pub fn size(&self) -> NaturalSize {
        NaturalSize::new(self.max_width, self.max_height)
    }
}

/// Text fields of an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageTexts {
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// URL and dimensions as the host's image downsizing expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Downsized {
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// The URL points at a generated variant.
    pub intermediate: bool,
}

pub struct ResponsiveImage<'a, B: ImageBackend + ?Sized> {
    attachment: Attachment,
    target: Target<'a>,
    backend: &'a B,
    rendering: &'a RenderingConfig,
    natural: OnceCell<NaturalImage>,
}

impl<'a, B: ImageBackend + ?Sized> ResponsiveImage<'a, B> {
    pub fn new(
        attachment: Attachment,
        target: Target<'a>,
        backend: &'a B,
        rendering: &'a RenderingConfig,
    ) -> Self {
        Self {
            attachment,
            target,
            backend,
            rendering,
            natural: OnceCell::new(),
        }
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    pub fn target(&self) -> Target<'a> {
        self.target
    }

    /// The size configuration, unless rendering a passthrough target.
    pub fn size(&self) -> Option<&'a SizeConfig> {
        match self.target {
            Target::Size(size) => Some(size),
            Target::Full | Target::Original => None,
        }
    }

    pub fn is_svg(&self) -> bool {
        self.attachment.is_svg()
    }

    pub fn is_pdf(&self) -> bool {
        self.attachment.is_pdf()
    }

    /// SVGs and `full`/`original` render the stored file as is.
    pub fn bypasses_resizing(&self) -> bool {
        self.is_svg() || self.size().is_none()
    }

    /// Whether the size asks for WebP and the original can be converted.
    pub fn is_webp(&self) -> bool {
        self.size().is_some_and(|s| s.webp.is_some()) && self.can_convert()
    }

    fn can_convert(&self) -> bool {
        !self.bypasses_resizing() && !self.is_pdf()
    }

    fn use_webp(&self, requested: bool) -> bool {
        if requested && !self.can_convert() {
            warn!(
                id = self.attachment.id,
                mime = %self.attachment.mime_type,
                "skipping WebP conversion for an image that cannot be converted"
            );
        }
        requested && self.can_convert()
    }

    /// Natural size and source of the original, computed once.
    pub fn natural(&self) -> &NaturalImage {
        self.natural.get_or_init(|| {
            let (max_width, max_height) = if self.is_svg() {
                self.svg_size()
            } else {
                (self.attachment.width, self.attachment.height)
            };
            NaturalImage {
                max_width,
                max_height,
                mime_type: self.attachment.mime_type.clone(),
                source_url: self.attachment.url.clone(),
            }
        })
    }

    fn svg_size(&self) -> (u32, u32) {
        if let Some(path) = &self.attachment.path {
            match svg_dimensions_from_file(path) {
                Ok(Some(dims)) => return dims.pixels(),
                Ok(None) => {}
                Err(e) => warn!(
                    id = self.attachment.id,
                    path = %path.display(),
                    error = %e,
                    "could not read SVG"
                ),
            }
        }
        if self.attachment.width == 0 || self.attachment.height == 0 {
            warn!(
                id = self.attachment.id,
                "SVG has no discoverable dimensions, rendering without width and height"
            );
        }
        (self.attachment.width, self.attachment.height)
    }

    /// The default variant resolved against the natural size.
    pub fn dimensions(&self) -> Option<ResolvedDimensions> {
        let size = self.size()?;
        if self.is_svg() {
            return None;
        }
        Some(resolve(
            size.resize.request(),
            self.natural().size(),
            size.upscale.allow,
        ))
    }

    /// SVG sizes scale the vector to the configured width or height.
    fn svg_dimensions(&self) -> Option<(u32, u32)> {
        let size = self.size()?;
        let natural = self.natural().size();
        if !natural.is_known() {
            return None;
        }
        let (w, h) = size.resize.request();
        let width = if w > 0 { w } else { width_from_height(h, natural) };
        Some((width, height_from_width(width, natural)))
    }

    /// Rendered width of the default variant.
    pub fn width(&self) -> Option<u32> {
        let width = if self.is_svg() {
            self.svg_dimensions()?.0
        } else {
            self.dimensions()?.width
        };
        (width > 0).then_some(width)
    }

    /// Rendered height of the default variant.
    pub fn height(&self) -> Option<u32> {
        let height = if self.is_svg() {
            self.svg_dimensions()?.1
        } else {
            self.dimensions()?.height
        };
        (height > 0).then_some(height)
    }

    /// Rendered dimensions, or the natural ones for `full`/`original`.
    fn orientation_size(&self) -> Option<(u32, u32)> {
        if self.size().is_none() {
            let natural = self.natural().size();
            return natural.is_known().then_some((natural.width, natural.height));
        }
        self.width().zip(self.height())
    }

    /// Width over height of the rendered image, `0.0` when the height is
    /// unknown.
    pub fn aspect_ratio(&self) -> f64 {
        match self.orientation_size() {
            Some((width, height)) => width as f64 / height as f64,
            None => 0.0,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.aspect_ratio() > 1.0
    }

    pub fn is_portrait(&self) -> bool {
        let ratio = self.aspect_ratio();
        ratio > 0.0 && ratio < 1.0
    }

    pub fn is_square(&self) -> bool {
        matches!(self.orientation_size(), Some((w, h)) if w == h)
    }

    /// Square within `deviation` either way, e.g. `0.02` for 2%.
    pub fn is_squarish(&self, deviation: f64) -> bool {
        let ratio = self.aspect_ratio();
        ratio > 0.0 && ratio > 1.0 - deviation && ratio < 1.0 + deviation
    }

    /// URL of the default variant, or of the stored file for passthroughs.
    pub fn src(&self, webp: bool) -> Result<String, BackendError> {
        match self.target {
            Target::Original if !self.is_svg() => Ok(self.attachment.original_url()),
            _ if self.bypasses_resizing() => Ok(self.attachment.url.clone()),
            Target::Size(size) => {
                let Some(resolved) = self.dimensions() else {
                    return Ok(self.attachment.url.clone());
                };
                let webp = self.use_webp(webp);
                resize_variant(self.backend, size, &self.natural().source_url, &resolved, webp)
            }
            Target::Full | Target::Original => Ok(self.attachment.url.clone()),
        }
    }

    /// The `srcset` value, or `None` when the size has a single width.
    pub fn srcset(&self, webp: bool) -> Result<Option<String>, BackendError> {
        let Some(size) = self.size() else {
            return Ok(None);
        };
        if self.is_svg() {
            return Ok(None);
        }
        let webp = self.use_webp(webp);
        let natural = self.natural();
        build_srcset(self.backend, size, natural.size(), &natural.source_url, webp)
    }

    pub fn sizes(&self) -> Option<&'a str> {
        self.size()?.sizes.as_deref()
    }

    /// Inline style that keeps an oversized image at its natural size.
    pub fn style(&self) -> Option<String> {
        let size = self.size()?;
        let axis = self.dimensions()?.oversize_axis?;
        let axis = match size.upscale.style_attr {
            StyleAttr::Off => return None,
            StyleAttr::Auto => axis,
            StyleAttr::Width => Axis::Width,
            StyleAttr::Height => Axis::Height,
        };
        let natural = self.natural();
        Some(match axis {
            Axis::Width => format!("width:{}px;", natural.max_width),
            Axis::Height => format!("height:{}px;", natural.max_height),
        })
    }

    /// The `loading` value, if the environment allows lazy-loading.
    pub fn loading(&self, loading: Loading) -> Option<&'static str> {
        if !self.rendering.lazy_loading {
            return None;
        }
        loading.as_attr()
    }

    /// Fallback `src` emitted next to a srcset.
    pub fn fallback_src(&self, webp: bool) -> Result<Option<String>, BackendError> {
        match self.rendering.src_default {
            SrcDefaultMode::Placeholder => Ok(Some(self.rendering.placeholder.clone())),
            SrcDefaultMode::DefaultVariant => self.src(webp).map(Some),
            SrcDefaultMode::Disabled => Ok(None),
        }
    }

    /// Mime type of the non-WebP variants.
    pub fn fallback_mime_type(&self) -> &str {
        match self.size() {
            Some(size) if size.tojpg.is_some() => "image/jpeg",
            _ => &self.attachment.mime_type,
        }
    }

    /// Alt text, tags stripped.
    pub fn alt(&self) -> String {
        strip_tags(&self.attachment.alt)
    }

    pub fn texts(&self) -> ImageTexts {
        ImageTexts {
            alt: self.alt(),
            caption: self.attachment.caption.clone(),
            description: self.attachment.description.clone(),
        }
    }

    /// Responsive attributes without `alt`.
    ///
    /// Order: `srcset`, `src`, `sizes`, `style`, `width`, `height`,
    /// `loading`. Explicit `width`/`height` replace the clamping style, and
    /// `<source>` elements never carry one.
    pub fn responsive_attributes(&self, args: &RenderArgs) -> Result<AttributeMap, BackendError> {
        let mut attrs = AttributeMap::new();

        if self.bypasses_resizing() {
            attrs.set("src", self.src(false)?);
        } else {
            match self.srcset(args.webp)? {
                Some(srcset) => {
                    attrs.set("srcset", srcset);
                    if args.src_default {
                        attrs.set_opt("src", self.fallback_src(args.webp)?);
                    }
                    attrs.set_opt("sizes", self.sizes());
                }
                None => attrs.set("src", self.src(args.webp)?),
            }
            if !(args.attr_width || args.attr_height || args.is_source) {
                attrs.set_opt("style", self.style());
            }
        }

        if args.attr_width {
            attrs.set_opt("width", self.width().map(|w| w.to_string()));
        }
        if args.attr_height {
            attrs.set_opt("height", self.height().map(|h| h.to_string()));
        }
        attrs.set_opt("loading", self.loading(args.loading));

        if args.is_source {
            attrs.rename("src", "srcset");
        }
        args.apply_lazy_prefixes(&mut attrs);
        attrs.drop_empty();
        Ok(attrs)
    }

    /// Responsive attributes followed by `alt`, as used on an `<img>`.
    pub fn img_attributes(&self, args: &RenderArgs) -> Result<AttributeMap, BackendError> {
        let mut attrs = self.responsive_attributes(args)?;
        attrs.set("alt", self.alt());
        Ok(attrs)
    }

    /// URL and dimensions for host-side downsizing. Never WebP.
    pub fn downsize(&self) -> Result<Downsized, BackendError> {
        let natural = self.natural().size();
        if self.bypasses_resizing() {
            return Ok(Downsized {
                url: self.src(false)?,
                width: self.width().unwrap_or(natural.width),
                height: self.height().unwrap_or(natural.height),
                intermediate: false,
            });
        }
        Ok(Downsized {
            url: self.src(false)?,
            width: self.width().unwrap_or(0),
            height: self.height().unwrap_or(0),
            intermediate: true,
        })
    }
}
