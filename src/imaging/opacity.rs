//! Transparency detection.
//!
//! Lossy WebP and the SVG blur filter both smear transparent edges, so the
//! CLI warns when a source image has any non-opaque pixel.

use image::{DynamicImage, GenericImageView, Pixel};

/// Returns `true` if every pixel is fully opaque.
///
/// Images without an alpha channel are trivially opaque.
pub fn is_opaque(img: &DynamicImage) -> bool {
    match img {
        DynamicImage::ImageLumaA8(buf) => buf.pixels().all(|p| p.0[1] == u8::MAX),
        DynamicImage::ImageRgba8(buf) => buf.pixels().all(|p| p.0[3] == u8::MAX),
        DynamicImage::ImageLumaA16(buf) => buf.pixels().all(|p| p.0[1] == u16::MAX),
        DynamicImage::ImageRgba16(buf) => buf.pixels().all(|p| p.0[3] == u16::MAX),
        DynamicImage::ImageRgba32F(buf) => buf.pixels().all(|p| p.0[3] >= 1.0),
        other if other.color().has_alpha() => {
            // Future variants: go through the generic 8-bit view
            other.pixels().all(|(_, _, p)| p.to_rgba().0[3] == u8::MAX)
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{LumaA, Rgba, Rgba32FImage, RgbaImage};

    #[test]
    fn rgb_is_always_opaque() {
        assert!(is_opaque(&DynamicImage::new_rgb8(4, 4)));
        assert!(is_opaque(&DynamicImage::new_luma8(4, 4)));
    }

    #[test]
    fn rgba_all_opaque() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        assert!(is_opaque(&DynamicImage::ImageRgba8(img)));
    }

    #[test]
    fn rgba_single_translucent_pixel() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        img.put_pixel(3, 3, Rgba([10, 20, 30, 254]));
        assert!(!is_opaque(&DynamicImage::ImageRgba8(img)));
    }

    #[test]
    fn empty_alpha_channel_is_transparent() {
        // new_rgba8 is zero-filled: fully transparent
        assert!(!is_opaque(&DynamicImage::new_rgba8(2, 2)));
    }

    #[test]
    fn luma_alpha_checks_alpha_channel() {
        let img = image::ImageBuffer::from_pixel(2, 2, LumaA([0u8, 128]));
        assert!(!is_opaque(&DynamicImage::ImageLumaA8(img)));
    }

    #[test]
    fn sixteen_bit_alpha_uses_full_range() {
        let img = image::ImageBuffer::from_pixel(2, 2, Rgba([0u16, 0, 0, u16::MAX]));
        assert!(is_opaque(&DynamicImage::ImageRgba16(img)));
        let img = image::ImageBuffer::from_pixel(2, 2, Rgba([0u16, 0, 0, 255]));
        assert!(!is_opaque(&DynamicImage::ImageRgba16(img)));
    }

    #[test]
    fn float_alpha() {
        let img = Rgba32FImage::from_pixel(2, 2, Rgba([0.5, 0.5, 0.5, 1.0]));
        assert!(is_opaque(&DynamicImage::ImageRgba32F(img)));
        let img = Rgba32FImage::from_pixel(2, 2, Rgba([0.5, 0.5, 0.5, 0.25]));
        assert!(!is_opaque(&DynamicImage::ImageRgba32F(img)));
    }
}
