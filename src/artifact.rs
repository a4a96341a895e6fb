//! Final artifact selection and text encoding.
//!
//! One invocation produces exactly one artifact, chosen by [`OutputMode`]:
//!
//! | Mode | stdout |
//! |---|---|
//! | [`OutputMode::RawPreview`] | the lossy WebP bytes |
//! | [`OutputMode::RawDocument`] | the minified SVG |
//! | [`OutputMode::Css`] | `background: url('data:image/svg+xml…') no-repeat 100%` |
//! | [`OutputMode::Tag`] | `<img … style="background: …">` |
//!
//! ## Flag precedence
//!
//! The CLI exposes four independent booleans. [`OutputMode::resolve`] is the
//! only place they are combined:
//!
//! 1. `--webp` wins over everything.
//! 2. `--svg` wins over the CSS and tag forms.
//! 3. `--tag` wraps the CSS form.
//! 4. `--base64` picks the CSS data encoding and has no effect on 1 and 2.

use crate::pipeline::Placeholder;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::Write;

/// How the SVG is embedded in the CSS `url()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CssEncoding {
    /// `data:image/svg+xml,<svg …>` with four characters percent-escaped.
    #[default]
    Literal,
    /// `data:image/svg+xml;base64,…`
    Base64,
}

/// Raw output flags as given on the command line or in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputFlags {
    pub tag: bool,
    pub raw_preview: bool,
    pub raw_document: bool,
    pub base64: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    RawPreview,
    RawDocument,
    Css(CssEncoding),
    Tag(CssEncoding),
}

impl OutputMode {
    /// Collapse the output flags into a single mode. See the module docs for
    /// the precedence order.
    pub fn resolve(flags: OutputFlags) -> Self {
        let encoding = if flags.base64 {
            CssEncoding::Base64
        } else {
            CssEncoding::Literal
        };

        if flags.raw_preview {
            OutputMode::RawPreview
        } else if flags.raw_document {
            OutputMode::RawDocument
        } else if flags.tag {
            OutputMode::Tag(encoding)
        } else {
            OutputMode::Css(encoding)
        }
    }
}

/// The bytes destined for stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Binary(Vec<u8>),
    Text(String),
}

impl Artifact {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Artifact::Binary(bytes) => bytes.as_slice(),
            Artifact::Text(text) => text.as_bytes(),
        }
    }

    /// Write the whole artifact in one go.
    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        out.write_all(self.as_bytes())?;
        out.flush()
    }
}

/// Percent-escape the characters that would break a single-quoted CSS
/// `url()` inside a double-quoted HTML attribute: `"`, `<`, `>` and `#`.
///
/// Everything else, including spaces, passes through; this is not general
/// URL encoding.
pub fn escape_css_literal(svg: &str) -> String {
    let mut out = String::with_capacity(svg.len() + svg.len() / 4);
    for c in svg.chars() {
        match c {
            '"' => out.push_str("%22"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '#' => out.push_str("%23"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the CSS `background` declaration for an SVG document.
pub fn css_declaration(svg: &str, encoding: CssEncoding) -> String {
    let data = match encoding {
        CssEncoding::Base64 => format!(";base64,{}", STANDARD.encode(svg)),
        CssEncoding::Literal => format!(",{}", escape_css_literal(svg)),
    };
    format!("background: url('data:image/svg+xml{data}') no-repeat 100%")
}

/// Escape a value for a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Wrap a CSS declaration in an `<img>` pointing at the original file.
///
/// The `src` is the real image; the preview rides in the inline style.
pub fn img_tag(file_name: &str, width: u32, height: u32, css: &str) -> String {
    format!(
        r#"<img src="{}" width="{}" height="{}" alt="" style="{}">"#,
        escape_attr(file_name),
        width,
        height,
        css
    )
}

/// Produce the artifact for `mode`.
///
/// Text forms end with a newline; raw forms are emitted verbatim.
pub fn render(mode: OutputMode, placeholder: &Placeholder) -> Artifact {
    match mode {
        OutputMode::RawPreview => Artifact::Binary(placeholder.preview.bytes.clone()),
        OutputMode::RawDocument => Artifact::Text(placeholder.document.clone()),
        OutputMode::Css(encoding) => {
            let css = css_declaration(&placeholder.document, encoding);
            Artifact::Text(format!("{css}\n"))
        }
        OutputMode::Tag(encoding) => {
            let css = css_declaration(&placeholder.document, encoding);
            let dims = placeholder.source_dimensions;
            let tag = img_tag(&placeholder.file_name, dims.width, dims.height, &css);
            Artifact::Text(format!("{tag}\n"))
        }
    }
}
