//! Variant math and the resize/convert boundary.
//!
//! | Operation | Where |
//! |---|---|
//! | **Identify** | `image::image_dimensions` (header only), SVG root attributes via `quick-xml` |
//! | **Resolve dimensions** | [`resolve`]: clamping, zero-side derivation, oversize axis |
//! | **Resize / convert** | [`ImageBackend`]: returns the URL of the generated file |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing resize and convert requests
//! - **Backend**: [`ImageBackend`] trait + [`UrlBackend`]
//! - **SVG**: natural size discovery for vector originals
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod svg;
pub mod url_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    Axis, NaturalSize, ResolvedDimensions, clamp_request, exceeds_natural, height_from_width,
    resolve, srcset_entry_request, width_from_height, width_key,
};
pub use operations::{GeneratedVariant, get_dimensions, pregenerate_size, resize_variant};
pub use params::{CropMode, Quality, ResizeParams, WebpParams};
pub use url_backend::UrlBackend;
