//! Pure calculation functions for preview dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the dimensions of an image fitted inside a `max_side` square.
///
/// The longer edge becomes `max_side`, the shorter edge is scaled by the same
/// ratio and rounded to the nearest pixel (never below 1). Images that
/// already fit are returned unchanged: the preview is never upscaled.
///
/// # Examples
/// ```
/// # use blurup::imaging::fit_dimensions;
/// assert_eq!(fit_dimensions((400, 300), 42), (42, 32));
/// assert_eq!(fit_dimensions((20, 10), 42), (20, 10));
/// ```
pub fn fit_dimensions(source: (u32, u32), max_side: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w <= max_side && src_h <= max_side {
        return (src_w, src_h);
    }

    if src_w >= src_h {
        // Landscape or square: width is the long edge
        let h = (src_h as f64 * max_side as f64 / src_w as f64).round() as u32;
        (max_side, h.max(1))
    } else {
        // Portrait
        let w = (src_w as f64 * max_side as f64 / src_h as f64).round() as u32;
        (w.max(1), max_side)
    }
}
