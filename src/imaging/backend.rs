//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three pixel operations the
//! placeholder pipeline needs: load, resize, and encode_preview.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): the `image` crate for
//! decoding and resampling, libwebp (via the `webp` crate) for the lossy
//! preview.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::params::Quality;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("Preview encoding failed: {0}")]
    Encode(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(img: &DynamicImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
        }
    }
}

/// Trait for image backends.
///
/// The pipeline only ever talks to this trait, so tests can swap in a mock
/// that records calls instead of decoding real files.
pub trait ImageBackend {
    /// Decode an image from disk, upright (orientation metadata applied).
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Resample to exactly `target` with a band-limited filter.
    fn resize(&self, img: &DynamicImage, target: Dimensions) -> DynamicImage;

    /// Encode as a lossy preview. `with_alpha` keeps the alpha channel.
    fn encode_preview(
        &self,
        img: &DynamicImage,
        quality: Quality,
        with_alpha: bool,
    ) -> Result<Vec<u8>, BackendError>;
}
