//! Naming-convention backend.
//!
//! Derives every variant URL from [`naming`](crate::naming) and identifies
//! raster originals with `image::image_dimensions`, which only reads the
//! file header. Nothing is decoded or written: producing the files behind
//! the URLs is the job of whatever serves them (an on-the-fly resizing
//! proxy, a build step, a CDN).

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ResizeParams, WebpParams};
use super::svg;
use crate::naming;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlBackend;

impl UrlBackend {
    pub fn new() -> Self {
        Self
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

impl ImageBackend for UrlBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        if is_svg(path) {
            let dims = svg::svg_dimensions_from_file(path)?.ok_or_else(|| {
                BackendError::ProcessingFailed(format!(
                    "{}: SVG declares no width, height or viewBox",
                    path.display()
                ))
            })?;
            let (width, height) = dims.pixels();
            return Ok(Dimensions { width, height });
        }

        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("{}: {}", path.display(), e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<String, BackendError> {
        let url = naming::variant_url(params);
        debug!(
            source = %params.source_url,
            width = params.width,
            height = params.height,
            crop = %params.crop,
            %url,
            "resize"
        );
        Ok(url)
    }

    fn to_webp(&self, url: &str, params: &WebpParams) -> Result<String, BackendError> {
        let converted = naming::webp_url(url);
        debug!(source = %url, quality = params.quality.value(), url = %converted, "to_webp");
        Ok(converted)
    }
}
