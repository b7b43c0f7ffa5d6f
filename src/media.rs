//! Media library: where natural image data comes from.
//!
//! The engine never scans disks. It asks a [`MediaLibrary`] for an
//! [`Attachment`] by id and reads the natural size, mime type and URLs from
//! it. [`MemoryLibrary`] is the bundled implementation, loadable from a JSON
//! manifest:
//!
//! ```json
//! [
//!   { "id": 7, "url": "https://example.org/uploads/test.jpg",
//!     "width": 2400, "height": 1600, "mime_type": "image/jpeg",
//!     "alt": "A dog on the beach" }
//! ]
//! ```
//!
//! Entries without `width`/`height` but with a `path` are identified through
//! the backend at load time. Relative paths resolve against the manifest's
//! directory.

use crate::imaging::{BackendError, ImageBackend, NaturalSize, get_dimensions};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Backend(#[from] BackendError),
    #[error("duplicate attachment id {0}")]
    DuplicateId(u64),
}

/// An uploaded original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    pub id: u64,
    /// Public URL. May point at a downscaled `-scaled` copy.
    pub url: String,
    /// URL of the unscaled original, when it differs from `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    pub mime_type: String,
    /// Location on disk, for identification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Post type of the post the image is attached to. `None` when
    /// unattached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_post_type: Option<String>,
}

impl Attachment {
    pub fn new(id: u64, url: &str, width: u32, height: u32, mime_type: &str) -> Self {
        Self {
            id,
            url: url.to_string(),
            original_url: None,
            width,
            height,
            mime_type: mime_type.to_string(),
            path: None,
            alt: String::new(),
            caption: None,
            description: None,
            parent_post_type: None,
        }
    }

    pub fn is_svg(&self) -> bool {
        self.mime_type == "image/svg+xml"
    }

    pub fn is_gif(&self) -> bool {
        self.mime_type == "image/gif"
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == "application/pdf"
    }

    /// URL of the unscaled original.
    pub fn original_url(&self) -> String {
        match &self.original_url {
            Some(url) => url.clone(),
            None => naming::unscaled_url(&self.url),
        }
    }

    pub fn natural_size(&self) -> NaturalSize {
        NaturalSize::new(self.width, self.height)
    }
}

/// Source of attachments.
pub trait MediaLibrary {
    /// Look up an attachment. `None` for unknown ids.
    fn attachment(&self, id: u64) -> Option<Attachment>;
}

/// Attachments held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    attachments: HashMap<u64, Attachment>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an attachment.
    pub fn insert(&mut self, attachment: Attachment) {
        self.attachments.insert(attachment.id, attachment);
    }

    pub fn with(mut self, attachment: Attachment) -> Self {
        self.insert(attachment);
        self
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }
}

impl MediaLibrary for MemoryLibrary {
    fn attachment(&self, id: u64) -> Option<Attachment> {
        self.attachments.get(&id).cloned()
    }
}

/// Load a JSON manifest, identifying originals whose size is missing.
///
/// SVGs are left alone: their size is read from the markup at render time.
pub fn load_library(
    path: &Path,
    backend: &(impl ImageBackend + ?Sized),
) -> Result<MemoryLibrary, LibraryError> {
    let content = fs::read_to_string(path)?;
    let attachments: Vec<Attachment> = serde_json::from_str(&content)?;
    let base = path.parent().unwrap_or(Path::new(""));

    let mut library = MemoryLibrary::new();
    for mut attachment in attachments {
        if let Some(file) = attachment.path.take() {
            attachment.path = Some(if file.is_relative() { base.join(file) } else { file });
        }
        let needs_identify = attachment.width == 0 || attachment.height == 0;
        if needs_identify && !attachment.is_svg() {
            if let Some(file) = &attachment.path {
                let (width, height) = get_dimensions(backend, file)?;
                debug!(id = attachment.id, width, height, "identified attachment");
                attachment.width = width;
                attachment.height = height;
            }
        }
        if library.attachments.contains_key(&attachment.id) {
            return Err(LibraryError::DuplicateId(attachment.id));
        }
        library.insert(attachment);
    }
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use tempfile::TempDir;

    fn write_manifest(json: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("library.json");
        fs::write(&path, json).unwrap();
        (tmp, path)
    }

    #[test]
    fn original_url_prefers_explicit_value() {
        let mut a = Attachment::new(1, "/u/big-scaled.jpg", 2560, 1707, "image/jpeg");
        assert_eq!(a.original_url(), "/u/big.jpg");
        a.original_url = Some("/originals/big.jpg".into());
        assert_eq!(a.original_url(), "/originals/big.jpg");
    }

    #[test]
    fn mime_checks() {
        assert!(Attachment::new(1, "/a.svg", 0, 0, "image/svg+xml").is_svg());
        assert!(Attachment::new(1, "/a.gif", 1, 1, "image/gif").is_gif());
        assert!(Attachment::new(1, "/a.pdf", 1, 1, "application/pdf").is_pdf());
    }

    #[test]
    fn memory_library_lookup() {
        let library = MemoryLibrary::new().with(Attachment::new(7, "/u/a.jpg", 10, 10, "image/jpeg"));
        assert_eq!(library.attachment(7).unwrap().url, "/u/a.jpg");
        assert!(library.attachment(8).is_none());
    }

    #[test]
    fn load_manifest_with_sizes() {
        let (_tmp, path) = write_manifest(
            r#"[{"id": 7, "url": "/u/test.jpg", "width": 2400, "height": 1600,
                "mime_type": "image/jpeg", "alt": "A dog"}]"#,
        );
        let backend = MockBackend::new();
        let library = load_library(&path, &backend).unwrap();

        let a = library.attachment(7).unwrap();
        assert_eq!(a.natural_size(), NaturalSize::new(2400, 1600));
        assert_eq!(a.alt, "A dog");
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn load_manifest_identifies_missing_sizes() {
        let (tmp, path) = write_manifest(
            r#"[{"id": 1, "url": "/u/a.jpg", "mime_type": "image/jpeg", "path": "a.jpg"}]"#,
        );
        let backend = MockBackend::with_dimensions(vec![Dimensions { width: 800, height: 600 }]);
        let library = load_library(&path, &backend).unwrap();

        assert_eq!(library.attachment(1).unwrap().natural_size(), NaturalSize::new(800, 600));
        let expected = tmp.path().join("a.jpg").to_string_lossy().to_string();
        assert_eq!(backend.get_operations(), vec![RecordedOp::Identify(expected)]);
    }

    #[test]
    fn load_manifest_leaves_svgs_for_render_time() {
        let (_tmp, path) = write_manifest(
            r#"[{"id": 1, "url": "/u/logo.svg", "mime_type": "image/svg+xml", "path": "logo.svg"}]"#,
        );
        let backend = MockBackend::new();
        load_library(&path, &backend).unwrap();
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn load_manifest_rejects_duplicates() {
        let (_tmp, path) = write_manifest(
            r#"[{"id": 1, "url": "/u/a.jpg", "width": 1, "height": 1, "mime_type": "image/jpeg"},
                {"id": 1, "url": "/u/b.jpg", "width": 1, "height": 1, "mime_type": "image/jpeg"}]"#,
        );
        let err = load_library(&path, &MockBackend::new()).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateId(1)));
    }

    #[test]
    fn load_manifest_rejects_unknown_fields() {
        let (_tmp, path) = write_manifest(
            r#"[{"id": 1, "url": "/u/a.jpg", "mime_type": "image/jpeg", "widht": 10}]"#,
        );
        assert!(matches!(
            load_library(&path, &MockBackend::new()).unwrap_err(),
            LibraryError::Json(_)
        ));
    }
}
