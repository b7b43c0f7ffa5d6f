//! `<picture>` markup.
//!
//! Sources come before the fallback `<img>`: for each colour scheme, a WebP
//! source (when the size converts to WebP) followed by a source in the
//! fallback format. A dark-scheme image, if given, is listed first so that
//! browsers pick it when `prefers-color-scheme: dark` matches.

use crate::attributes::{AttributeMap, RenderArgs};
use crate::image::ResponsiveImage;
use crate::imaging::{BackendError, ImageBackend};

const DARK: &str = "(prefers-color-scheme: dark)";
const LIGHT: &str = "(prefers-color-scheme: light)";

fn sources<B: ImageBackend + ?Sized>(
    image: &ResponsiveImage<'_, B>,
    args: &RenderArgs,
    webp: bool,
    media: Option<&str>,
) -> Result<Vec<String>, BackendError> {
    let mut out = Vec::new();

    if webp {
        let mut attrs = AttributeMap::new();
        attrs.set("type", "image/webp");
        attrs.extend(image.responsive_attributes(&args.for_source(true))?);
        attrs.set_opt("media", media);
        out.push(format!("<source{}>", attrs.to_html()));
    }

    let mut attrs = AttributeMap::new();
    if webp {
        attrs.set("type", image.fallback_mime_type());
    }
    attrs.extend(image.responsive_attributes(&args.for_source(false))?);
    attrs.set_opt("media", media);
    out.push(format!("<source{}>", attrs.to_html()));

    Ok(out)
}

fn fallback_img<B: ImageBackend + ?Sized>(
    image: &ResponsiveImage<'_, B>,
    args: &RenderArgs,
) -> Result<String, BackendError> {
    let mut attrs = AttributeMap::new();
    attrs.set("src", image.src(false)?);
    if args.attr_width {
        attrs.set_opt("width", image.width().map(|w| w.to_string()));
    }
    if args.attr_height {
        attrs.set_opt("height", image.height().map(|h| h.to_string()));
    }
    attrs.set("alt", image.alt());
    attrs.set_opt("loading", image.loading(args.loading));
    if args.lazy_src {
        attrs.rename("src", "data-src");
    }
    attrs.drop_empty();
    Ok(format!("<img{}>", attrs.to_html()))
}

/// Render the inner markup of a `<picture>` element, one tag per line.
///
/// `dark` is an alternative image shown in dark colour schemes. It is
/// rendered with the same size as `image`.
pub fn picture_markup<B: ImageBackend + ?Sized>(
    image: &ResponsiveImage<'_, B>,
    dark: Option<&ResponsiveImage<'_, B>>,
    args: &RenderArgs,
) -> Result<String, BackendError> {
    let webp = image.is_webp();
    let mut lines = Vec::new();

    if let Some(dark) = dark {
        lines.extend(sources(dark, args, webp, Some(DARK))?);
        lines.extend(sources(image, args, webp, Some(LIGHT))?);
    } else {
        lines.extend(sources(image, args, webp, None)?);
    }
    lines.push(fallback_img(image, args)?);

    Ok(lines.join("\n"))
}
