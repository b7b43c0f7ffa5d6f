//! Srcset candidate planning and assembly.
//!
//! Planning is pure: the default variant and every configured srcset entry
//! are resolved against the natural size, keyed by their rendered width,
//! and collapsed so that each width appears once (a later entry replaces an
//! earlier one with the same width). Assembly then asks the backend for one
//! URL per surviving candidate.
//!
//! A size whose candidates collapse to a single width has no srcset at all;
//! callers fall back to a plain `src`.

use crate::config::{SizeConfig, SrcsetEntry};
use crate::imaging::{
    BackendError, ImageBackend, NaturalSize, ResolvedDimensions, exceeds_natural, resize_variant,
    resolve, srcset_entry_request,
};
use std::collections::BTreeMap;
use std::fmt;

/// The descriptor written after a candidate URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// `560w`
    Width(u32),
    /// A configured density descriptor such as `2x`, verbatim.
    Density(String),
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Width(w) => write!(f, "{w}w"),
            Descriptor::Density(d) => f.write_str(d),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SrcsetCandidate {
    pub resolved: ResolvedDimensions,
    pub descriptor: Descriptor,
    /// The candidate is the size's default variant.
    pub is_default: bool,
}

impl SrcsetCandidate {
    pub fn width_key(&self) -> u32 {
        self.resolved.width
    }
}

/// Resolve and collapse the candidates of `size`, ascending by width.
pub fn plan_srcset(size: &SizeConfig, natural: NaturalSize) -> Vec<SrcsetCandidate> {
    let allow = size.upscale.allow;
    let mut by_width = BTreeMap::new();

    let default = resolve(size.resize.request(), natural, allow);
    by_width.insert(
        default.width,
        SrcsetCandidate {
            resolved: default,
            descriptor: Descriptor::Width(default.width),
            is_default: true,
        },
    );

    for entry in &size.srcset {
        let request = srcset_entry_request(&size.resize, entry);
        if !allow && exceeds_natural(request, natural) {
            continue;
        }
        let resolved = resolve(request, natural, allow);
        if resolved.width == 0 {
            continue;
        }
        let descriptor = match entry {
            SrcsetEntry::Density { descriptor, .. } => Descriptor::Density(descriptor.clone()),
            _ => Descriptor::Width(resolved.width),
        };
        by_width.insert(
            resolved.width,
            SrcsetCandidate {
                resolved,
                descriptor,
                is_default: false,
            },
        );
    }

    by_width.into_values().collect()
}

/// Build the `srcset` value for `size`, or `None` if it has fewer than two
/// distinct widths.
///
/// The default variant is requested first, the other candidates in
/// ascending width order.
pub fn build_srcset(
    backend: &(impl ImageBackend + ?Sized),
    size: &SizeConfig,
    natural: NaturalSize,
    source_url: &str,
    webp: bool,
) -> Result<Option<String>, BackendError> {
    let candidates = plan_srcset(size, natural);
    if candidates.len() < 2 {
        return Ok(None);
    }

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| !candidates[i].is_default);

    let mut urls = vec![String::new(); candidates.len()];
    for i in order {
        urls[i] = resize_variant(backend, size, source_url, &candidates[i].resolved, webp)?;
    }

    let entries: Vec<String> = candidates
        .iter()
        .zip(urls)
        .map(|(candidate, url)| format!("{url} {}", candidate.descriptor))
        .collect();
    Ok(Some(entries.join(", ")))
}
