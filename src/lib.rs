//! # blurup
//!
//! Turns an image into a tiny inline "blur-up" placeholder: a few hundred
//! bytes of CSS (or an `<img>` tag) that paints a blurred preview while the
//! real image loads.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      file      →  upright pixels     (format sniffed, EXIF orientation applied)
//! 2. Inspect   pixels    →  warning            (transparency only; never fatal)
//! 3. Fit       pixels    →  ≤ 42×42 pixels     (Lanczos3, no upscaling)
//! 4. Encode    pixels    →  lossy WebP         (quality 1 by default)
//! 5. Wrap      WebP      →  SVG                (feGaussianBlur over a Base64 data URI)
//! 6. Format    SVG       →  stdout artifact    (CSS, <img> tag, raw SVG or raw WebP)
//! ```
//!
//! Every stage is a pure transformation of the previous stage's output.
//! Nothing is written to stdout until all of them succeed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Load, opacity check, fit resize, WebP encoding behind the [`imaging::ImageBackend`] trait |
//! | [`wrapper`] | The SVG blur template: one-time minification and rendering |
//! | [`artifact`] | Output mode precedence, CSS escaping, `<img>` tag, the final bytes |
//! | [`pipeline`] | Runs the stages in order and reports warnings as events |
//! | [`config`] | Stock defaults, optional TOML file, CLI overrides |
//! | [`output`] | Human-facing diagnostics on stderr |
//!
//! # Design Decisions
//!
//! ## WebP inside SVG
//!
//! A 42-pixel WebP at quality 1 is a few hundred bytes but looks awful when
//! stretched. Letting the browser blur it through an SVG filter hides the
//! blockiness for free, and the SVG can be inlined as a CSS data URI so the
//! placeholder paints with the stylesheet, before any image request.
//!
//! ## Minimal escaping
//!
//! The literal (non-Base64) CSS form only escapes `"`, `<`, `>` and `#`.
//! That is enough for a single-quoted `url()` inside a double-quoted HTML
//! attribute and keeps the output about a quarter smaller than Base64.
//!
//! ## One output mode
//!
//! The CLI flags are collapsed into a single [`artifact::OutputMode`] by one
//! function, so flag interactions are defined in exactly one place.

pub mod artifact;
pub mod config;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod test_helpers;
