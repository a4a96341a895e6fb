//! SVG wrapper around the lossy preview.
//!
//! The preview WebP is tiny and blocky; browsers would upscale it with a
//! cheap filter. Wrapping it in an SVG with a Gaussian blur gives the smooth
//! blur-up look instead. The whole document is self-contained: the WebP rides
//! along as a Base64 data URI, so nothing is fetched.
//!
//! # Template
//!
//! The skeleton is kept readable in source and minified once, when a
//! [`WrapperTemplate`] is built:
//!
//! ```text
//! <svg xmlns="http://www.w3.org/2000/svg"><defs><filter id="f">
//! <feGaussianBlur stdDeviation="{{BLUR}}"/></filter></defs>
//! <image width="100%" height="100%" filter="url(#f)" href="data:image/webp;base64,{{WEBP}}"/></svg>
//! ```
//!
//! (shown wrapped; the minified template is a single line)
//!
//! Build one with [`WrapperTemplate::new`] before processing and pass it
//! down by reference. Hosts that render many placeholders from several
//! threads can use [`WrapperTemplate::shared`] instead.

use std::sync::LazyLock;

const BLUR_SLOT: &str = "{{BLUR}}";
const PREVIEW_SLOT: &str = "{{WEBP}}";

const SVG_TEMPLATE: &str = r#"
<svg xmlns="http://www.w3.org/2000/svg">
  <defs>
    <filter id="f">
      <feGaussianBlur stdDeviation="{{BLUR}}"/>
    </filter>
  </defs>
  <image width="100%" height="100%" filter="url(#f)" href="data:image/webp;base64,{{WEBP}}"/>
</svg>"#;

static SHARED: LazyLock<WrapperTemplate> = LazyLock::new(WrapperTemplate::new);

/// Collapse insignificant whitespace in a markup template.
///
/// A whitespace character is dropped when it opens the document, follows a
/// `>`, or follows another whitespace character. Everything else is kept, so
/// the single space separating two attributes survives while indentation and
/// newlines between tags disappear. Applying it twice changes nothing.
pub fn minify(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut prev: Option<char> = None;

    for c in template.chars() {
        let droppable = c.is_ascii_whitespace()
            && match prev {
                None => true,
                Some(p) => p == '>' || p.is_ascii_whitespace(),
            };
        if !droppable {
            out.push(c);
        }
        prev = Some(c);
    }

    out
}

/// The minified SVG skeleton, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperTemplate {
    minified: String,
}

impl WrapperTemplate {
    pub fn new() -> Self {
        Self {
            minified: minify(SVG_TEMPLATE),
        }
    }

    /// Process-wide instance, minified on first access.
    pub fn shared() -> &'static WrapperTemplate {
        &SHARED
    }

    pub fn as_str(&self) -> &str {
        &self.minified
    }

    /// Fill in the blur radius (in stdDeviation units) and the Base64 WebP.
    pub fn render(&self, blur_radius: u32, preview_base64: &str) -> String {
        self.minified
            .replace(BLUR_SLOT, &blur_radius.to_string())
            .replace(PREVIEW_SLOT, preview_base64)
    }
}

impl Default for WrapperTemplate {
    fn default() -> Self {
        Self::new()
    }
}
