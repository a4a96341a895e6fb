//! The placeholder pipeline.
//!
//! ```text
//! load (auto-orient) → opacity check → fit resize → lossy WebP → SVG wrapper
//! ```
//!
//! Each stage consumes the previous stage's output. The only side channel is
//! [`PipelineEvent`]: the opacity check reports transparency as a warning
//! event instead of failing, since the placeholder is still usable.
//!
//! Nothing here writes to stdout. The caller picks an
//! [`OutputMode`](crate::artifact::OutputMode) and renders the returned
//! [`Placeholder`] only after the whole pipeline has succeeded, so a failure
//! never leaves a half-written artifact behind.

use crate::imaging::{
    BackendError, Dimensions, EncodedPreview, ImageBackend, Quality, ResizeSpec, encode_preview,
    fit_resize, load_source,
};
use crate::wrapper::WrapperTemplate;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Imaging(#[from] BackendError),
}

/// Settings for one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceholderSettings {
    pub resize: ResizeSpec,
    pub quality: Quality,
    /// Gaussian blur standard deviation, in SVG user units.
    pub blur_radius: u32,
}

/// Everything the output formatter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Basename of the source image.
    pub file_name: String,
    /// Upright dimensions of the source, before resizing.
    pub source_dimensions: Dimensions,
    pub preview: EncodedPreview,
    /// Rendered, minified SVG with the preview embedded.
    pub document: String,
    pub opaque: bool,
}

/// Non-fatal conditions reported while the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The source has at least one non-opaque pixel.
    Transparency { file_name: String },
}

/// Run the full pipeline for one image.
///
/// Warnings are sent on `events` as they happen; pass `None` to drop them.
pub fn generate(
    backend: &impl ImageBackend,
    path: &Path,
    settings: &PlaceholderSettings,
    template: &WrapperTemplate,
    events: Option<&Sender<PipelineEvent>>,
) -> Result<Placeholder, PipelineError> {
    let source = load_source(backend, path)?;

    if let Some(tx) = events.filter(|_| !source.opaque) {
        tx.send(PipelineEvent::Transparency {
            file_name: source.file_name.clone(),
        })
        .ok();
    }

    let resized = fit_resize(backend, &source.image, settings.resize);
    let preview = encode_preview(backend, &resized, settings.quality)?;
    let document = template.render(settings.blur_radius, &preview.to_base64());

    Ok(Placeholder {
        file_name: source.file_name,
        source_dimensions: source.dimensions,
        preview,
        document,
        opaque: source.opaque,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::{MOCK_PREVIEW, MockBackend, RecordedOp};
    use crate::test_helpers::{write_gradient_png, write_translucent_png};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::sync::mpsc;

    fn settings(max_side: u32, quality: u32, blur_radius: u32) -> PlaceholderSettings {
        PlaceholderSettings {
            resize: ResizeSpec::new(max_side),
            quality: Quality::new(quality),
            blur_radius,
        }
    }

    #[test]
    fn pipeline_runs_stages_in_order() {
        let backend = MockBackend::with_image(DynamicImage::new_rgb8(400, 300));
        let placeholder = generate(
            &backend,
            Path::new("/img/photo.png"),
            &settings(42, 1, 10),
            &WrapperTemplate::new(),
            None,
        )
        .unwrap();

        assert_eq!(
            backend.get_operations(),
            vec![
                RecordedOp::Load("/img/photo.png".into()),
                RecordedOp::Resize {
                    width: 42,
                    height: 32
                },
                RecordedOp::Encode {
                    width: 42,
                    height: 32,
                    quality: 1,
                    with_alpha: false,
                },
            ]
        );
        assert_eq!(placeholder.file_name, "photo.png");
        assert_eq!(
            placeholder.source_dimensions,
            Dimensions {
                width: 400,
                height: 300
            }
        );
        assert!(placeholder.opaque);
    }

    #[test]
    fn pipeline_embeds_preview_in_document() {
        let backend = MockBackend::with_image(DynamicImage::new_rgb8(100, 100));
        let placeholder = generate(
            &backend,
            Path::new("sq.png"),
            &settings(42, 1, 7),
            &WrapperTemplate::new(),
            None,
        )
        .unwrap();

        let expected_b64 = STANDARD.encode(MOCK_PREVIEW);
        assert!(placeholder.document.contains(r#"stdDeviation="7""#));
        assert!(
            placeholder
                .document
                .contains(&format!("data:image/webp;base64,{expected_b64}"))
        );
    }

    #[test]
    fn transparency_emits_warning_event() {
        let img = RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 10]));
        let backend = MockBackend::with_image(DynamicImage::ImageRgba8(img));
        let (tx, rx) = mpsc::channel();

        let placeholder = generate(
            &backend,
            Path::new("ghost.png"),
            &PlaceholderSettings::default(),
            &WrapperTemplate::new(),
            Some(&tx),
        )
        .unwrap();

        assert!(!placeholder.opaque);
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![PipelineEvent::Transparency {
                file_name: "ghost.png".into()
            }]
        );
    }

    #[test]
    fn opaque_image_emits_no_events() {
        let backend = MockBackend::with_image(DynamicImage::new_rgb8(50, 50));
        let (tx, rx) = mpsc::channel();
        generate(
            &backend,
            Path::new("solid.png"),
            &PlaceholderSettings::default(),
            &WrapperTemplate::new(),
            Some(&tx),
        )
        .unwrap();
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn encode_failure_aborts_pipeline() {
        let backend = MockBackend::failing_encode(DynamicImage::new_rgb8(50, 50));
        let err = generate(
            &backend,
            Path::new("x.png"),
            &PlaceholderSettings::default(),
            &WrapperTemplate::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Imaging(BackendError::Encode(_))
        ));
    }

    #[test]
    fn missing_image_aborts_before_resize() {
        let backend = MockBackend::default();
        let err = generate(
            &backend,
            Path::new("nope.png"),
            &PlaceholderSettings::default(),
            &WrapperTemplate::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Imaging(BackendError::NotFound(_))
        ));
        assert_eq!(backend.get_operations().len(), 1);
    }

    // =========================================================================
    // Real backend
    // =========================================================================

    #[test]
    fn real_backend_opaque_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("landscape.png");
        write_gradient_png(&path, 400, 300);

        let placeholder = generate(
            &RustBackend::new(),
            &path,
            &settings(42, 1, 10),
            &WrapperTemplate::new(),
            None,
        )
        .unwrap();

        assert!(placeholder.opaque);
        assert!(!placeholder.preview.bytes.is_empty());
        assert_eq!(&placeholder.preview.bytes[0..4], b"RIFF");
        let decoded = image::load_from_memory(&placeholder.preview.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (42, 32));
    }

    #[test]
    fn real_backend_translucent_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("glass.png");
        write_translucent_png(&path, 120, 60);
        let (tx, rx) = mpsc::channel();

        let placeholder = generate(
            &RustBackend::new(),
            &path,
            &PlaceholderSettings::default(),
            &WrapperTemplate::new(),
            Some(&tx),
        )
        .unwrap();

        assert!(!placeholder.opaque);
        assert_eq!(rx.try_iter().count(), 1);
        let decoded = image::load_from_memory(&placeholder.preview.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (42, 21));
    }
}
