//! Image handling for the placeholder pipeline.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Load** | `image` decoders, picked by content sniffing, auto-oriented |
//! | **Opacity** | alpha scan over the decoded buffer |
//! | **Fit resize** | Lanczos3, never upscales |
//! | **Preview** | lossy WebP via libwebp |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: [`Quality`] and [`ResizeSpec`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod opacity;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::fit_dimensions;
pub use opacity::is_opaque;
pub use operations::{
    EncodedPreview, SourceImage, encode_preview, fit_resize, load_source, plan_fit,
};
pub use params::{Quality, ResizeSpec};
pub use rust_backend::RustBackend;
