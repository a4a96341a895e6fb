//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they take
//! the user's settings, compute the concrete parameters, and call the
//! backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::fit_dimensions;
use super::opacity::is_opaque;
use super::params::{Quality, ResizeSpec};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// A decoded, upright source image plus what the tag output needs to know
/// about the original file.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: DynamicImage,
    /// Dimensions before any resizing.
    pub dimensions: Dimensions,
    /// Final path component, used as the `<img src>` placeholder.
    pub file_name: String,
    pub opaque: bool,
}

/// Lossy preview bytes and the quality they were encoded at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPreview {
    pub bytes: Vec<u8>,
    pub quality: Quality,
}

impl EncodedPreview {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Load a source image through the backend and inspect its alpha channel.
pub fn load_source(backend: &impl ImageBackend, path: &Path) -> Result<SourceImage> {
    let image = backend.load(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SourceImage {
        dimensions: Dimensions::of(&image),
        opaque: is_opaque(&image),
        file_name,
        image,
    })
}

/// Plan the fitted preview size without touching pixels.
pub fn plan_fit(source: Dimensions, spec: ResizeSpec) -> Dimensions {
    let (width, height) = fit_dimensions((source.width, source.height), spec.max_side());
    Dimensions { width, height }
}

/// Downscale to fit inside the `spec` square.
///
/// Images that already fit are copied through without resampling.
pub fn fit_resize(
    backend: &impl ImageBackend,
    img: &DynamicImage,
    spec: ResizeSpec,
) -> DynamicImage {
    let source = Dimensions::of(img);
    let target = plan_fit(source, spec);
    if target == source {
        return img.clone();
    }
    backend.resize(img, target)
}

/// Encode the (already resized) preview, keeping alpha only when needed.
pub fn encode_preview(
    backend: &impl ImageBackend,
    img: &DynamicImage,
    quality: Quality,
) -> Result<EncodedPreview> {
    let with_alpha = !is_opaque(img);
    let bytes = backend.encode_preview(img, quality, with_alpha)?;
    Ok(EncodedPreview { bytes, quality })
}
