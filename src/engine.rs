//! The public entry points.
//!
//! An [`Engine`] owns a loaded configuration, a [`MediaLibrary`] and an
//! [`ImageBackend`]. Template-facing calls (`src`, `srcset`, `responsive`,
//! `picture`, ...) never fail loudly: a missing attachment, an unknown size
//! or a backend error is logged with `warn!` and the call returns `None`, so
//! a broken reference renders as nothing instead of breaking a page.
//!
//! [`Engine::image`] exposes the underlying [`ResponsiveImage`] with real
//! errors for callers that want them.

use crate::attributes::{AttributeMap, Loading, RenderArgs, Rendered};
use crate::config::{ConfigError, EngineConfig, RegistryCache, SizeConfig, SizeRegistry};
use crate::content;
use crate::image::{Downsized, ImageTexts, ResponsiveImage, Target};
use crate::imaging::{BackendError, GeneratedVariant, ImageBackend, pregenerate_size};
use crate::media::MediaLibrary;
use crate::picture::picture_markup;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("attachment {0} not found")]
    NotFound(u64),
    #[error("image size `{0}` is not configured")]
    UnknownSize(String),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("unsupported media type `{0}`")]
    Unsupported(String),
    #[error("Image error: {0}")]
    Backend(#[from] BackendError),
}

/// A size given by registry key or as a literal configuration.
#[derive(Debug, Clone, Copy)]
pub enum SizeRef<'a> {
    Key(&'a str),
    Config(&'a SizeConfig),
}

impl<'a> From<&'a str> for SizeRef<'a> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl<'a> From<&'a String> for SizeRef<'a> {
    fn from(key: &'a String) -> Self {
        Self::Key(key)
    }
}

impl<'a> From<&'a SizeConfig> for SizeRef<'a> {
    fn from(size: &'a SizeConfig) -> Self {
        Self::Config(size)
    }
}

impl fmt::Display for SizeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Config(size) => f.write_str(&size.key),
        }
    }
}

pub struct Engine<L: MediaLibrary, B: ImageBackend> {
    config: Arc<EngineConfig>,
    library: L,
    backend: B,
}

impl<L: MediaLibrary, B: ImageBackend> Engine<L, B> {
    pub fn new(config: Arc<EngineConfig>, library: L, backend: B) -> Self {
        Self { config, library, backend }
    }

    /// Build an engine around the configuration held by `cache`.
    pub fn from_cache(cache: &RegistryCache, library: L, backend: B) -> Result<Self, ConfigError> {
        Ok(Self::new(cache.get()?, library, backend))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &SizeRegistry {
        &self.config.sizes
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve attachment `id` against `size`.
    ///
    /// `full` and `original` are always available, configured or not.
    pub fn image<'a>(
        &'a self,
        id: u64,
        size: impl Into<SizeRef<'a>>,
    ) -> Result<ResponsiveImage<'a, B>, EngineError> {
        let target = match size.into() {
            SizeRef::Config(size) => Target::Size(size),
            SizeRef::Key(key) => match Target::reserved(key) {
                Some(target) => target,
                None => Target::Size(
                    self.registry()
                        .get(key)
                        .ok_or_else(|| EngineError::UnknownSize(key.to_string()))?,
                ),
            },
        };
        let attachment = self.library.attachment(id).ok_or(EngineError::NotFound(id))?;
        let mime = &attachment.mime_type;
        if !(mime.starts_with("image/") || attachment.is_pdf()) {
            return Err(EngineError::Unsupported(mime.clone()));
        }
        Ok(ResponsiveImage::new(attachment, target, &self.backend, &self.config.rendering))
    }

    fn report<T>(&self, id: u64, size: SizeRef<'_>, result: Result<T, EngineError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(id, size = %size, error = %e, "could not resolve image");
                None
            }
        }
    }

    fn with_image<'a, T>(
        &'a self,
        id: u64,
        size: SizeRef<'a>,
        f: impl FnOnce(&ResponsiveImage<'a, B>) -> Result<T, EngineError>,
    ) -> Option<T> {
        let result = self.image(id, size).and_then(|image| f(&image));
        self.report(id, size, result)
    }

    /// URL of the default variant.
    pub fn src<'a>(&'a self, id: u64, size: impl Into<SizeRef<'a>>) -> Option<String> {
        self.with_image(id, size.into(), |image| Ok(image.src(false)?))
    }

    /// The `srcset` value. `None` also when the size yields a single width.
    pub fn srcset<'a>(&'a self, id: u64, size: impl Into<SizeRef<'a>>) -> Option<String> {
        self.with_image(id, size.into(), |image| Ok(image.srcset(false)?))
            .flatten()
    }

    pub fn width<'a>(&'a self, id: u64, size: impl Into<SizeRef<'a>>) -> Option<u32> {
        self.with_image(id, size.into(), |image| Ok(image.width())).flatten()
    }

    pub fn height<'a>(&'a self, id: u64, size: impl Into<SizeRef<'a>>) -> Option<u32> {
        self.with_image(id, size.into(), |image| Ok(image.height())).flatten()
    }

    /// Responsive attributes without `alt`.
    pub fn responsive_attributes<'a>(
        &'a self,
        id: u64,
        size: impl Into<SizeRef<'a>>,
        args: &RenderArgs,
    ) -> Option<AttributeMap> {
        self.with_image(id, size.into(), |image| Ok(image.responsive_attributes(args)?))
    }

    /// Rendered `<img>` attributes including `alt`.
    pub fn responsive<'a>(
        &'a self,
        id: u64,
        size: impl Into<SizeRef<'a>>,
        args: &RenderArgs,
    ) -> Option<String> {
        self.with_image(id, size.into(), |image| Ok(image.img_attributes(args)?.to_html()))
    }

    /// `<img>` attributes including `alt`, as a string or a map per
    /// `args.return_format`.
    pub fn render<'a>(
        &'a self,
        id: u64,
        size: impl Into<SizeRef<'a>>,
        args: &RenderArgs,
    ) -> Option<Rendered> {
        self.with_image(id, size.into(), |image| {
            Ok(Rendered::new(image.img_attributes(args)?, args.return_format))
        })
    }

    /// Inner markup of a `<picture>` element. `dark` renders another
    /// attachment at the same size for dark colour schemes.
    pub fn picture<'a>(
        &'a self,
        id: u64,
        size: impl Into<SizeRef<'a>>,
        dark: Option<u64>,
        args: &RenderArgs,
    ) -> Option<String> {
        let size = size.into();
        self.with_image(id, size, |image| {
            let dark = dark.map(|dark| self.image(dark, size)).transpose()?;
            Ok(picture_markup(image, dark.as_ref(), args)?)
        })
    }

    pub fn texts(&self, id: u64) -> Option<ImageTexts> {
        self.with_image(id, SizeRef::Key("full"), |image| Ok(image.texts()))
    }

    /// URL and dimensions for the host's own downsizing. Never WebP.
    pub fn downsize<'a>(&'a self, id: u64, size: impl Into<SizeRef<'a>>) -> Option<Downsized> {
        self.with_image(id, size.into(), |image| Ok(image.downsize()?))
    }

    /// Generate every configured size of attachment `id`, as done on upload.
    ///
    /// SVGs and GIFs are skipped, as are sizes that do not apply to the post
    /// type the attachment belongs to.
    pub fn generate_sizes(&self, id: u64) -> Result<Vec<GeneratedVariant>, EngineError> {
        let attachment = self.library.attachment(id).ok_or(EngineError::NotFound(id))?;
        if attachment.is_svg() || attachment.is_gif() {
            debug!(id, mime = %attachment.mime_type, "not generating sizes");
            return Ok(Vec::new());
        }

        let post_type = attachment.parent_post_type.as_deref();
        let natural = attachment.natural_size();
        let mut variants = Vec::new();
        for size in self.registry().iter() {
            if !size.applies_to_post_type(post_type) {
                debug!(id, size = %size.key, post_type, "size does not apply to post type");
                continue;
            }
            variants.extend(pregenerate_size(&self.backend, size, &attachment.url, natural)?);
        }
        Ok(variants)
    }

    /// Resolver for [`content::rewrite`]: responsive attributes with the
    /// resolved dimensions plus `alt`, without a `loading` attribute.
    pub fn content_resolver(&self) -> impl Fn(u64, &str) -> Option<AttributeMap> + '_ {
        let args = RenderArgs {
            loading: Loading::Off,
            ..RenderArgs::default()
        };
        move |id: u64, size: &str| {
            self.with_image(id, SizeRef::Key(size), |image| Ok(image.img_attributes(&args)?))
        }
    }

    /// Make every recognized image in post content responsive.
    pub fn rewrite_content(&self, html: &str) -> String {
        content::rewrite(html, self.content_resolver())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ReturnFormat;
    use crate::config::PLACEHOLDER_GIF;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::media::{Attachment, MemoryLibrary};
    use crate::test_helpers::{self, url};
    use std::fs;
    use tempfile::TempDir;

    fn engine() -> Engine<MemoryLibrary, MockBackend> {
        Engine::new(
            Arc::new(test_helpers::config()),
            test_helpers::library(),
            MockBackend::new(),
        )
    }

    fn engine_with(attachment: Attachment) -> Engine<MemoryLibrary, MockBackend> {
        Engine::new(
            Arc::new(test_helpers::config()),
            test_helpers::library().with(attachment),
            MockBackend::new(),
        )
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[test]
    fn unknown_size_is_an_error() {
        let err = engine().image(1, "huge").err().unwrap();
        assert!(matches!(err, EngineError::UnknownSize(key) if key == "huge"));
        assert_eq!(engine().src(1, "huge"), None);
    }

    #[test]
    fn unknown_attachment_is_an_error() {
        assert!(matches!(engine().image(404, "large"), Err(EngineError::NotFound(404))));
        assert_eq!(engine().responsive(404, "large", &RenderArgs::default()), None);
    }

    #[test]
    fn non_images_are_unsupported() {
        let engine = engine_with(Attachment::new(50, "/u/clip.mp4", 0, 0, "video/mp4"));
        assert!(matches!(engine.image(50, "large"), Err(EngineError::Unsupported(_))));
    }

    #[test]
    fn reserved_keys_need_no_configuration() {
        let engine = engine();
        assert_eq!(engine.src(1, "full"), Some(url("test.jpg")));
        assert_eq!(engine.src(1, "original"), Some(url("test.jpg")));
    }

    #[test]
    fn literal_size_configuration() {
        let size = SizeConfig::new("inline", 300, None);
        assert_eq!(engine().src(1, &size), Some(url("test-300x0-c-default.jpg")));
    }

    #[test]
    fn from_cache_shares_the_loaded_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sizes.toml");
        fs::write(&path, test_helpers::SIZES_TOML).unwrap();
        let cache = RegistryCache::new(&path);

        let a = Engine::from_cache(&cache, MemoryLibrary::new(), MockBackend::new()).unwrap();
        let b = Engine::from_cache(&cache, MemoryLibrary::new(), MockBackend::new()).unwrap();
        assert!(std::ptr::eq(a.config(), b.config()));
        assert!(a.registry().get("large").is_some());
    }

    // =========================================================================
    // Template entry points
    // =========================================================================

    #[test]
    fn src_srcset_and_dimensions() {
        let engine = engine();
        assert_eq!(engine.src(1, "large"), Some(url("test-1400x0-c-default.jpg")));
        assert_eq!(
            engine.srcset(1, "large"),
            Some(format!(
                "{}, {}",
                url("test-560x0-c-default.jpg 560w"),
                url("test-1400x0-c-default.jpg 1400w")
            ))
        );
        assert_eq!(engine.width(1, "large"), Some(1400));
        assert_eq!(engine.height(1, "large"), Some(933));
    }

    #[test]
    fn srcset_is_none_for_a_single_width() {
        assert_eq!(engine().srcset(1, "resize-only"), None);
    }

    #[test]
    fn responsive_includes_alt() {
        let out = engine().responsive(1, "large", &RenderArgs::default()).unwrap();
        assert!(out.starts_with(" srcset="));
        assert!(out.contains(&format!(r#" src="{PLACEHOLDER_GIF}""#)));
        assert!(out.ends_with(r#" loading="lazy" alt="A dog on the beach""#));
    }

    #[test]
    fn responsive_attributes_omit_alt() {
        let attrs = engine()
            .responsive_attributes(1, "large", &RenderArgs::default())
            .unwrap();
        assert!(!attrs.contains("alt"));
    }

    #[test]
    fn render_follows_return_format() {
        let engine = engine();
        let array = RenderArgs { return_format: ReturnFormat::Array, ..RenderArgs::default() };
        match engine.render(1, "large", &array) {
            Some(Rendered::Map(attrs)) => assert_eq!(attrs.get("width"), Some("1400")),
            other => panic!("expected a map, got {other:?}"),
        }
        assert!(matches!(
            engine.render(1, "large", &RenderArgs::default()),
            Some(Rendered::Html(_))
        ));
    }

    #[test]
    fn picture_with_dark_variant() {
        let mut dark = test_helpers::landscape();
        dark.id = 20;
        dark.url = url("night.jpg");
        let out = engine_with(dark)
            .picture(1, "webp", Some(20), &RenderArgs::default())
            .unwrap();
        assert!(out.lines().next().unwrap().contains("night-560x0-c-default.webp"));
        assert!(out.lines().last().unwrap().starts_with("<img "));
    }

    #[test]
    fn picture_with_missing_dark_variant_is_none() {
        assert_eq!(engine().picture(1, "webp", Some(404), &RenderArgs::default()), None);
    }

    #[test]
    fn texts_strip_tags() {
        let mut a = test_helpers::landscape();
        a.id = 30;
        a.alt = "<em>Dog</em>".into();
        a.caption = Some("On the beach".into());
        let texts = engine_with(a).texts(30).unwrap();
        assert_eq!(texts.alt, "Dog");
        assert_eq!(texts.caption.as_deref(), Some("On the beach"));
        assert_eq!(texts.description, None);
    }

    #[test]
    fn downsize_never_converts_to_webp() {
        let downsized = engine().downsize(1, "webp").unwrap();
        assert_eq!(downsized.url, url("test-1400x0-c-default.jpg"));
        assert!(downsized.intermediate);
    }

    #[test]
    fn backend_failure_is_reported_as_none() {
        let engine = Engine::new(
            Arc::new(test_helpers::config()),
            test_helpers::library(),
            MockBackend::failing(),
        );
        assert_eq!(engine.src(1, "large"), None);
        assert_eq!(engine.responsive(1, "large", &RenderArgs::default()), None);
    }

    // =========================================================================
    // Pre-generation
    // =========================================================================

    #[test]
    fn generate_sizes_for_unattached_image() {
        let engine = engine();
        let variants = engine.generate_sizes(1).unwrap();
        assert!(variants.iter().all(|v| v.size_key != "pages-only"));
        assert!(variants.iter().any(|v| v.size_key == "large" && v.width == 560));
    }

    #[test]
    fn generate_sizes_respects_post_type() {
        let mut a = test_helpers::landscape();
        a.id = 40;
        a.parent_post_type = Some("page".into());
        let engine = engine_with(a);
        let variants = engine.generate_sizes(40).unwrap();
        assert!(variants.iter().any(|v| v.size_key == "pages-only"));
    }

    #[test]
    fn generate_sizes_skips_gifs_and_svgs() {
        let engine = engine_with(Attachment::new(41, "/u/a.gif", 500, 500, "image/gif"));
        assert!(engine.generate_sizes(41).unwrap().is_empty());
        assert!(engine.backend().get_operations().is_empty());
    }

    #[test]
    fn generate_sizes_skips_upscaled_srcset_entries() {
        let engine = engine();
        let variants = engine.generate_sizes(2).unwrap();
        assert!(
            variants
                .iter()
                .filter(|v| v.size_key != "upscale-allow")
                .all(|v| v.width <= 200)
        );
        assert!(
            engine
                .backend()
                .get_operations()
                .iter()
                .any(|op| matches!(op, RecordedOp::ToWebp { .. }))
        );
    }

    // =========================================================================
    // Content
    // =========================================================================

    #[test]
    fn rewrite_content_uses_figure_size() {
        let html = r#"<figure class="wp-block-image size-responsive-content-image"><img src="/u/test.jpg" alt="" class="wp-image-1"/></figure>"#;
        let out = engine().rewrite_content(html);
        assert_eq!(
            out,
            format!(
                r#"<figure class="wp-block-image size-responsive-content-image"><img srcset="{}, {}, {}" src="{PLACEHOLDER_GIF}" sizes="(min-width: 400px) 400px, 100vw" width="400" height="267" alt="A dog on the beach" class="wp-image-1"></figure>"#,
                url("test-370x0-c-default.jpg 370w"),
                url("test-400x0-c-default.jpg 400w"),
                url("test-768x0-c-default.jpg 768w"),
            )
        );
    }

    #[test]
    fn rewrite_content_replaces_dimensions() {
        let html = r#"<img src="/u/test.jpg" width="300" height="200" class="size-responsive-content-image wp-image-1" />"#;
        let out = engine().rewrite_content(html);
        assert!(out.contains(r#" width="400" height="267" "#), "{out}");
        assert!(!out.contains(r#"width="300""#));
        assert!(!out.contains("loading="));
    }

    #[test]
    fn rewrite_content_keeps_resized_dimensions() {
        let html = r#"<figure class="wp-block-image size-responsive-content-image is-resized"><img src="/u/test.jpg" alt="" class="wp-image-1" width="300" height="200"/></figure>"#;
        let out = engine().rewrite_content(html);
        assert!(out.contains(r#"<img width="300" height="200" srcset="#), "{out}");
        assert!(!out.contains(r#"width="400""#));
    }

    #[test]
    fn rewrite_content_leaves_unknown_sizes() {
        let html = r#"<img src="/u/test.jpg" class="size-huge wp-image-1">"#;
        assert_eq!(engine().rewrite_content(html), html);
    }
}
