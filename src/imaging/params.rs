//! Parameter types for placeholder operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the [`operations`](super::operations) module and the
//! [`backend`](super::backend), so a mock backend can stand in for the real
//! codecs in tests.
//!
//! - [`Quality`]: lossy WebP quality (0–100, default 1). Clamped on construction.
//! - [`ResizeSpec`]: the bounding square the preview must fit in (default 42).

/// Quality setting for the lossy preview encoder (0-100).
///
/// Lower is smaller. The preview is blurred heavily downstream, so the
/// default sits at the very bottom of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u32 {
        self.0 as u32
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(1)
    }
}

/// Maximum side of the square bounding box for the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    max_side: u32,
}

impl ResizeSpec {
    /// A zero side is bumped to 1; an empty preview can't be encoded.
    pub fn new(max_side: u32) -> Self {
        Self {
            max_side: max_side.max(1),
        }
    }

    pub fn max_side(self) -> u32 {
        self.max_side
    }
}

impl Default for ResizeSpec {
    fn default() -> Self {
        Self { max_side: 42 }
    }
}
