//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take a size configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{
    NaturalSize, ResolvedDimensions, exceeds_natural, resolve, srcset_entry_request,
};
use super::params::ResizeParams;
use crate::config::SizeConfig;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &(impl ImageBackend + ?Sized), path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Request one variant of `source_url` for `size` and return its URL,
/// optionally converted to WebP with the size's WebP settings.
pub fn resize_variant(
    backend: &(impl ImageBackend + ?Sized),
    size: &SizeConfig,
    source_url: &str,
    resolved: &ResolvedDimensions,
    webp: bool,
) -> Result<String> {
    let params = ResizeParams::for_size(
        size,
        source_url,
        resolved.request_width,
        resolved.request_height,
    );
    let url = backend.resize(&params)?;
    if webp {
        backend.to_webp(&url, &size.webp.unwrap_or_default())
    } else {
        Ok(url)
    }
}

/// A variant produced ahead of time.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedVariant {
    pub size_key: String,
    pub width: u32,
    pub height: u32,
    pub url: String,
}

/// Generate every variant `size` can ask for, as done when an image is
/// first uploaded.
///
/// The default variant is clamped like at render time. Srcset variants
/// that would upscale are skipped unless the size allows upscaling, and
/// `generate_srcset_sizes = false` limits generation to the default.
pub fn pregenerate_size(
    backend: &(impl ImageBackend + ?Sized),
    size: &SizeConfig,
    source_url: &str,
    natural: NaturalSize,
) -> Result<Vec<GeneratedVariant>> {
    let allow = size.upscale.allow;
    let mut requests = vec![resolve(size.resize.request(), natural, allow)];

    if size.generate_srcset_sizes {
        for entry in &size.srcset {
            let request = srcset_entry_request(&size.resize, entry);
            if !allow && exceeds_natural(request, natural) {
                continue;
            }
            let resolved = resolve(request, natural, allow);
            if !requests.iter().any(|r| r.request() == resolved.request()) {
                requests.push(resolved);
            }
        }
    }

    let mut variants = Vec::with_capacity(requests.len());
    for resolved in requests {
        let url = resize_variant(backend, size, source_url, &resolved, false)?;
        if let Some(webp) = &size.webp {
            backend.to_webp(&url, webp)?;
        }
        variants.push(GeneratedVariant {
            size_key: size.key.clone(),
            width: resolved.width,
            height: resolved.height,
            url,
        });
    }
    Ok(variants)
}
