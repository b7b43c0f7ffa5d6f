//! Resize/convert backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the engine's only boundary to the pixel
//! world. It defines three operations: identify, resize and to_webp. Resize
//! and convert hand back the URL of the generated file. The engine treats
//! them as synchronous calls and never inspects how the file came to be.
//!
//! The bundled implementation is
//! [`UrlBackend`](super::url_backend::UrlBackend), which derives variant URLs
//! from the naming convention and leaves the actual encoding to whatever
//! serves those URLs.

use super::params::{ResizeParams, WebpParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for resize/convert backends.
///
/// Implementations may write files on first call and return a derived URL
/// afterwards. Callers issue requests one at a time, default variant first.
pub trait ImageBackend: Sync {
    /// Get the natural dimensions of an original on disk.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Produce a resized variant and return its URL.
    fn resize(&self, params: &ResizeParams) -> Result<String, BackendError>;

    /// Convert an image to WebP and return the new URL.
    fn to_webp(&self, url: &str, params: &WebpParams) -> Result<String, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::CropMode;
    use crate::naming;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    /// URLs follow the real naming convention so markup assertions read
    /// like production output.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
        /// Make every resize fail.
        pub fail_resize: bool,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Resize {
            source: String,
            width: u32,
            height: u32,
            crop: CropMode,
        },
        ToWebp {
            url: String,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_resize: true,
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        /// `(width, height)` of every recorded resize, in call order.
        pub fn resize_requests(&self) -> Vec<(u32, u32)> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Resize { width, height, .. } => Some((width, height)),
                    _ => None,
                })
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn resize(&self, params: &ResizeParams) -> Result<String, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: params.source_url.clone(),
                width: params.width,
                height: params.height,
                crop: params.crop,
            });
            if self.fail_resize {
                return Err(BackendError::ProcessingFailed("mock resize failure".into()));
            }
            Ok(naming::variant_url(params))
        }

        fn to_webp(&self, url: &str, params: &WebpParams) -> Result<String, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::ToWebp {
                url: url.to_string(),
                quality: params.quality.value(),
            });
            Ok(naming::webp_url(url))
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_without_results_fails() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/x.jpg")).is_err());
    }

    #[test]
    fn mock_records_resize_and_names_the_variant() {
        let backend = MockBackend::new();

        let url = backend
            .resize(&ResizeParams {
                source_url: "/uploads/test.jpg".into(),
                width: 560,
                height: 0,
                crop: CropMode::Default,
                force: false,
                to_jpg: None,
                letterbox: None,
            })
            .unwrap();

        assert_eq!(url, "/uploads/test-560x0-c-default.jpg");
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Resize {
                source: "/uploads/test.jpg".into(),
                width: 560,
                height: 0,
                crop: CropMode::Default,
            }]
        );
    }

    #[test]
    fn mock_records_webp() {
        let backend = MockBackend::new();
        let url = backend
            .to_webp("/uploads/test-560x0-c-default.jpg", &WebpParams::default())
            .unwrap();
        assert_eq!(url, "/uploads/test-560x0-c-default.webp");
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::ToWebp { quality: 80, .. }
        ));
    }
}
