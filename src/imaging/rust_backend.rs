//! Pure Rust decode/resize backend with a libwebp preview encoder.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Sniff format | `image::guess_format` checked against [`DECODERS`] |
//! | Decode (JPEG, PNG, GIF, TIFF, WebP, BMP) | `image` crate decoders |
//! | Auto-orient | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → lossy WebP | `webp::Encoder::encode_simple` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::Quality;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::io::{Cursor, ErrorKind};
use std::path::Path;

/// Formats the loader accepts, keyed by content signature rather than file
/// extension. A format is only routed if its decoder is compiled in.
pub const DECODERS: &[(ImageFormat, &str)] = &[
    (ImageFormat::Jpeg, "JPEG"),
    (ImageFormat::Png, "PNG"),
    (ImageFormat::Gif, "GIF"),
    (ImageFormat::Tiff, "TIFF"),
    (ImageFormat::WebP, "WebP"),
    (ImageFormat::Bmp, "BMP"),
];

/// Identify the image format from its leading bytes.
///
/// Returns `None` for unknown signatures and for formats that have no
/// registered decoder.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    let guessed = image::guess_format(bytes).ok()?;
    DECODERS
        .iter()
        .any(|(format, _)| *format == guessed && format.reading_enabled())
        .then_some(guessed)
}

/// Backend built on the `image` crate ecosystem plus libwebp.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>, BackendError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BackendError::NotFound(path.to_path_buf()),
        _ => BackendError::Io(e),
    })
}

/// Decode an in-memory image and rotate/flip it upright.
fn decode_upright(bytes: &[u8], path: &Path) -> Result<DynamicImage, BackendError> {
    let decode_err = |reason: String| BackendError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let format =
        sniff_format(bytes).ok_or_else(|| decode_err("unrecognized image format".into()))?;
    let mut decoder = ImageReader::with_format(Cursor::new(bytes), format)
        .into_decoder()
        .map_err(|e| decode_err(e.to_string()))?;
    // A broken EXIF block should not block the placeholder; treat it as upright.
    let orientation = decoder
        .orientation()
        .unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_err(e.to_string()))?;
    img.apply_orientation(orientation);
    Ok(img)
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let bytes = read_source(path)?;
        decode_upright(&bytes, path)
    }

    fn resize(&self, img: &DynamicImage, target: Dimensions) -> DynamicImage {
        img.resize_exact(target.width, target.height, FilterType::Lanczos3)
    }

    fn encode_preview(
        &self,
        img: &DynamicImage,
        quality: Quality,
        with_alpha: bool,
    ) -> Result<Vec<u8>, BackendError> {
        let quality = quality.value() as f32;
        // Opaque previews skip the alpha plane entirely
        let encoded = if with_alpha {
            let rgba = img.to_rgba8();
            webp::Encoder::from_rgba(&rgba, rgba.width(), rgba.height())
                .encode_simple(false, quality)
        } else {
            let rgb = img.to_rgb8();
            webp::Encoder::from_rgb(&rgb, rgb.width(), rgb.height()).encode_simple(false, quality)
        };
        let memory = encoded.map_err(|e| BackendError::Encode(format!("{e:?}")))?;
        Ok(memory.to_vec())
    }
}
