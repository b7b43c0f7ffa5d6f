//! # sizeset
//!
//! A responsive image resolution engine. Given an uploaded original and a
//! named size from a TOML configuration, it works out which variants a page
//! needs and renders the `srcset`, `sizes`, `width`, `height` and related
//! attributes, a `<picture>` element, or a rewritten copy of post content.
//!
//! ```text
//! sizes.toml ─┐
//!             ├─> SizeRegistry ─┐
//! library ────┴─> Attachment ───┼─> ResponsiveImage ─> attributes / <picture>
//!                  ImageBackend ┘        │
//!                                        └─> content rewriting
//! ```
//!
//! Pixels are never touched here. Every variant is requested from an
//! [`imaging::ImageBackend`], which hands back the URL of the generated file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `sizes.toml` loading, size normalization, registry and load-once cache |
//! | [`imaging`] | Dimension resolution, SVG size discovery, resize parameters and the backend trait |
//! | [`naming`] | Generated-file naming convention (`test-560x0-c-default.jpg`) |
//! | [`srcset`] | Candidate planning and `srcset` assembly |
//! | [`attributes`] | Ordered attribute maps and per-call rendering options |
//! | [`image`] | One attachment resolved against one size |
//! | [`picture`] | `<picture>` markup with WebP and dark-scheme sources |
//! | [`content`] | Regex rewriting of images embedded in post content |
//! | [`media`] | Attachments and the media library they come from |
//! | [`engine`] | The public facade templates and the CLI call |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Sizes Are Normalized Once
//!
//! Size tables accept several shorthands (`upscale = true`, `webp = true`,
//! `"2x"` next to `[560]` in a srcset, legacy `oversize`/`size` keys). They
//! are resolved into a single [`config::SizeConfig`] shape when the file is
//! loaded, so the resolver never guesses what an entry means. Unknown keys
//! are errors: a typo in a size table should fail loudly, not silently render
//! the wrong image.
//!
//! ## Never Upscale By Default
//!
//! A variant wider than its original wastes bytes and looks soft. Unless a
//! size opts in, requests are clamped to the natural size and srcset
//! candidates that would exceed it are dropped. An inline `style` keeps the
//! rendered image from being stretched by CSS.
//!
//! ## Failures Render As Nothing
//!
//! The [`engine::Engine`] entry points return `Option` and log a warning
//! instead of failing, the way a template helper should. The underlying
//! [`image::ResponsiveImage`] keeps real errors for callers that want them.

pub mod attributes;
pub mod config;
pub mod content;
pub mod engine;
pub mod image;
pub mod imaging;
pub mod media;
pub mod naming;
pub mod output;
pub mod picture;
pub mod srcset;

#[cfg(test)]
pub(crate) mod test_helpers;
