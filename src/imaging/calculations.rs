//! Pure calculation functions for variant dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! A dimension of 0 in a request means "derive this side from the other one
//! and the natural aspect ratio".

use crate::config::{Resize, SrcsetEntry};

/// Natural pixel size of an original image. Zero on both axes when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

impl NaturalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_known(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// The axis a request exceeded the natural size on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// Outcome of resolving one requested variant against a natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDimensions {
    /// Rendered width. Also the variant's width-key.
    pub width: u32,
    /// Rendered height.
    pub height: u32,
    /// Width handed to the resizer (0 kept when derived).
    pub request_width: u32,
    /// Height handed to the resizer (0 kept when derived).
    pub request_height: u32,
    /// Set when the request exceeded the natural size.
    pub oversize_axis: Option<Axis>,
}

impl ResolvedDimensions {
    pub fn request(&self) -> (u32, u32) {
        (self.request_width, self.request_height)
    }
}

fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (value as f64 * numerator as f64 / denominator as f64).round() as u32
}

/// Height that keeps the natural aspect ratio at `width`.
///
/// ```
/// # use sizeset::imaging::{height_from_width, NaturalSize};
/// assert_eq!(height_from_width(1400, NaturalSize::new(2400, 1600)), 933);
/// ```
pub fn height_from_width(width: u32, natural: NaturalSize) -> u32 {
    scale(width, natural.height, natural.width)
}

/// Width that keeps the natural aspect ratio at `height`.
pub fn width_from_height(height: u32, natural: NaturalSize) -> u32 {
    scale(height, natural.width, natural.height)
}

/// The width a request renders at, deriving a 0 width from the height.
///
/// This is the key srcset candidates are deduplicated and sorted by, and
/// the number in their `w` descriptor.
pub fn width_key(request: (u32, u32), natural: NaturalSize) -> u32 {
    match request {
        (0, height) => width_from_height(height, natural),
        (width, _) => width,
    }
}

/// Clamp a request to the natural size.
///
/// The oversize axis is reported whenever the request is larger than the
/// image. Clamping only happens when `allow_upscale` is false: a width clamp
/// keeps the requested aspect ratio, and if the derived height still does
/// not fit, the height is clamped as well.
pub fn clamp_request(
    request: (u32, u32),
    natural: NaturalSize,
    allow_upscale: bool,
) -> ((u32, u32), Option<Axis>) {
    if !natural.is_known() {
        return (request, None);
    }
    let (req_w, req_h) = request;
    let (mut w, mut h) = request;
    let mut axis = None;

    if w > natural.width {
        axis = Some(Axis::Width);
        if !allow_upscale {
            w = natural.width;
            if req_h > 0 {
                h = scale(w, req_h, req_w);
            }
        }
    }

    if h > natural.height && (axis.is_none() || !allow_upscale) {
        axis = Some(Axis::Height);
        if !allow_upscale {
            w = if req_w > 0 && req_h > 0 {
                scale(natural.height, req_w, req_h)
            } else {
                width_from_height(natural.height, natural)
            };
            h = natural.height;
        }
    }

    ((w, h), axis)
}

/// Resolve a requested variant to its rendered dimensions.
///
/// ```
/// # use sizeset::imaging::{resolve, Axis, NaturalSize};
/// // 1400px wide on a 200×133 original, upscaling disallowed
/// let r = resolve((1400, 0), NaturalSize::new(200, 133), false);
/// assert_eq!((r.width, r.height), (200, 133));
/// assert_eq!(r.oversize_axis, Some(Axis::Width));
/// ```
pub fn resolve(request: (u32, u32), natural: NaturalSize, allow_upscale: bool) -> ResolvedDimensions {
    let ((request_width, request_height), oversize_axis) =
        clamp_request(request, natural, allow_upscale);
    let width = width_key((request_width, request_height), natural);
    let height = match request_height {
        0 => height_from_width(width, natural),
        h => h,
    };
    ResolvedDimensions {
        width,
        height,
        request_width,
        request_height,
        oversize_axis,
    }
}

/// Whether a candidate is too large to be offered without upscaling.
///
/// Only the width counts, except for a height-only request.
pub fn exceeds_natural(request: (u32, u32), natural: NaturalSize) -> bool {
    let (w, h) = request;
    (natural.width > 0 && w > natural.width) || (w == 0 && h > natural.height)
}

/// The request a srcset entry makes, based on the size's configured
/// `resize` (not the clamped one).
pub fn srcset_entry_request(resize: &Resize, entry: &SrcsetEntry) -> (u32, u32) {
    match entry {
        SrcsetEntry::Dimensions { width, height } => (*width, height.unwrap_or(0)),
        SrcsetEntry::Ratio(ratio) | SrcsetEntry::Density { ratio, .. } => {
            let (w, h) = resize.request();
            (
                (w as f64 * ratio).round() as u32,
                (h as f64 * ratio).round() as u32,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::CropMode;

    const LANDSCAPE: NaturalSize = NaturalSize { width: 2400, height: 1600 };
    const SMALL: NaturalSize = NaturalSize { width: 200, height: 133 };
    const PORTRAIT: NaturalSize = NaturalSize { width: 133, height: 200 };

    fn resize(width: u32, height: Option<u32>) -> Resize {
        Resize { width, height, crop: CropMode::Default, force: false }
    }

    // =========================================================================
    // aspect helpers
    // =========================================================================

    #[test]
    fn height_follows_natural_ratio() {
        assert_eq!(height_from_width(1400, LANDSCAPE), 933);
        assert_eq!(height_from_width(560, LANDSCAPE), 373);
    }

    #[test]
    fn width_follows_natural_ratio() {
        assert_eq!(width_from_height(150, PORTRAIT), 100);
    }

    #[test]
    fn unknown_natural_size_derives_zero() {
        assert_eq!(height_from_width(1400, NaturalSize::default()), 0);
    }

    #[test]
    fn width_key_derives_zero_width() {
        assert_eq!(width_key((0, 150), PORTRAIT), 100);
        assert_eq!(width_key((560, 0), LANDSCAPE), 560);
    }

    // =========================================================================
    // resolve
    // =========================================================================

    #[test]
    fn resolve_within_bounds() {
        let r = resolve((1400, 0), LANDSCAPE, false);
        assert_eq!((r.width, r.height), (1400, 933));
        assert_eq!(r.request(), (1400, 0));
        assert_eq!(r.oversize_axis, None);
    }

    #[test]
    fn resolve_clamps_width() {
        let r = resolve((1400, 0), SMALL, false);
        assert_eq!((r.width, r.height), (200, 133));
        assert_eq!(r.request(), (200, 0));
        assert_eq!(r.oversize_axis, Some(Axis::Width));
    }

    #[test]
    fn resolve_reports_but_keeps_oversize_when_upscaling() {
        let r = resolve((1400, 0), SMALL, true);
        assert_eq!((r.width, r.height), (1400, 931));
        assert_eq!(r.request(), (1400, 0));
        assert_eq!(r.oversize_axis, Some(Axis::Width));
    }

    #[test]
    fn resolve_clamps_height_only_request() {
        let r = resolve((0, 1400), PORTRAIT, false);
        assert_eq!((r.width, r.height), (133, 200));
        assert_eq!(r.request(), (133, 200));
        assert_eq!(r.oversize_axis, Some(Axis::Height));
    }

    #[test]
    fn resolve_fixed_box_keeps_requested_ratio() {
        // 400x400 on 200x133: width clamp gives 200x200, which is still too tall
        let r = resolve((400, 400), SMALL, false);
        assert_eq!((r.width, r.height), (133, 133));
        assert_eq!(r.oversize_axis, Some(Axis::Height));
    }

    #[test]
    fn resolve_fixed_box_width_clamp() {
        let r = resolve((3000, 1000), LANDSCAPE, false);
        assert_eq!((r.width, r.height), (2400, 800));
        assert_eq!(r.oversize_axis, Some(Axis::Width));
    }

    #[test]
    fn resolve_unknown_natural_size_passes_through() {
        let r = resolve((1400, 700), NaturalSize::default(), false);
        assert_eq!((r.width, r.height), (1400, 700));
        assert_eq!(r.oversize_axis, None);
    }

    #[test]
    fn resolve_is_exact_at_the_boundary() {
        let r = resolve((2400, 0), LANDSCAPE, false);
        assert_eq!((r.width, r.height), (2400, 1600));
        assert_eq!(r.oversize_axis, None);
    }

    // =========================================================================
    // exceeds_natural
    // =========================================================================

    #[test]
    fn exceeds_checks_width() {
        assert!(exceeds_natural((2401, 0), LANDSCAPE));
        assert!(!exceeds_natural((2400, 0), LANDSCAPE));
        // only the width counts when it is given
        assert!(!exceeds_natural((560, 5000), LANDSCAPE));
    }

    #[test]
    fn exceeds_checks_height_for_height_only_requests() {
        assert!(exceeds_natural((0, 201), PORTRAIT));
        assert!(!exceeds_natural((0, 150), PORTRAIT));
    }

    // =========================================================================
    // srcset_entry_request
    // =========================================================================

    #[test]
    fn explicit_dimensions_pass_through() {
        let entry = SrcsetEntry::Dimensions { width: 768, height: Some(329) };
        assert_eq!(srcset_entry_request(&resize(1400, None), &entry), (768, 329));
    }

    #[test]
    fn ratio_scales_configured_resize() {
        let r = resize(260, Some(173));
        assert_eq!(srcset_entry_request(&r, &SrcsetEntry::Ratio(2.0)), (520, 346));
        assert_eq!(srcset_entry_request(&r, &SrcsetEntry::Ratio(0.5)), (130, 87));
    }

    #[test]
    fn density_scales_like_a_ratio() {
        let entry = SrcsetEntry::Density { ratio: 1.5, descriptor: "1.5x".into() };
        assert_eq!(srcset_entry_request(&resize(1400, None), &entry), (2100, 0));
    }
}
