//! RGB565 to RGB888 conversion
//!
//! Each channel is rescaled linearly to 0..=255 with integer truncating
//! division: `value * 255 / channel_max`. No lookup table, no gamma.

use image::Rgb;

use crate::frame::{FrameBuffer, PackedPixel};

pub const RED_MAX: u16 = 31;
pub const GREEN_MAX: u16 = 63;
pub const BLUE_MAX: u16 = 31;
pub const COLOR_MAX: u16 = 255;

/// Converted frame: one `Rgb<u8>` per source pixel, same order.
#[derive(Debug, Clone)]
pub struct ConvertedBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb<u8>>,
}

impl ConvertedBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb<u8>] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Scanlines, top row first
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb<u8>]> {
        // chunks_exact panics on a zero chunk size
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }
}

/// Rescale a channel value from `0..=max` to `0..=255`.
///
/// `value` must not exceed `max`, and `max` must be non-zero.
#[inline]
pub fn expand_channel(value: u8, max: u16) -> u8 {
    debug_assert!(max > 0 && u16::from(value) <= max, "channel value {value} out of range 0..={max}");
    (u16::from(value) * COLOR_MAX / max) as u8
}

#[inline]
pub fn expand_pixel(pixel: PackedPixel) -> Rgb<u8> {
    Rgb([
        expand_channel(pixel.red(), RED_MAX),
        expand_channel(pixel.green(), GREEN_MAX),
        expand_channel(pixel.blue(), BLUE_MAX),
    ])
}

/// Convert a whole frame in one pass.
pub fn convert_frame(frame: &FrameBuffer) -> ConvertedBuffer {
    ConvertedBuffer {
        width: frame.width(),
        height: frame.height(),
        pixels: frame.pixels().iter().copied().map(expand_pixel).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_endpoints() {
        assert_eq!(expand_channel(0, RED_MAX), 0);
        assert_eq!(expand_channel(31, RED_MAX), 255);
        assert_eq!(expand_channel(0, GREEN_MAX), 0);
        assert_eq!(expand_channel(63, GREEN_MAX), 255);
    }

    #[test]
    fn test_channel_monotonic() {
        for max in [RED_MAX, GREEN_MAX] {
            let mut previous = 0;
            for value in 0..=max as u8 {
                let expanded = expand_channel(value, max);
                assert!(expanded >= previous, "{value}/{max} went backwards");
                previous = expanded;
            }
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_channel_value_above_max() {
        expand_channel(40, RED_MAX);
    }

    #[test]
    fn test_truncating_division() {
        // 16 * 255 / 31 = 131.6 -> 131
        assert_eq!(expand_channel(16, RED_MAX), 131);
        // 32 * 255 / 63 = 129.5 -> 129
        assert_eq!(expand_channel(32, GREEN_MAX), 129);
    }

    #[test]
    fn test_expand_pixel() {
        assert_eq!(expand_pixel(PackedPixel::from_raw(0xFFFF)), Rgb([255, 255, 255]));
        assert_eq!(expand_pixel(PackedPixel::from_raw(0x0000)), Rgb([0, 0, 0]));
        assert_eq!(expand_pixel(PackedPixel::from_raw(0xF800)), Rgb([255, 0, 0]));
        assert_eq!(expand_pixel(PackedPixel::from_raw(0x07E0)), Rgb([0, 255, 0]));
        assert_eq!(expand_pixel(PackedPixel::from_raw(0x001F)), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_convert_preserves_length_and_order() {
        let pixels = vec![
            PackedPixel::from_raw(0xF800),
            PackedPixel::from_raw(0x07E0),
            PackedPixel::from_raw(0x001F),
            PackedPixel::from_raw(0x0000),
            PackedPixel::from_raw(0xFFFF),
            PackedPixel::from_raw(0xF800),
        ];
        let frame = FrameBuffer::new(3, 2, pixels).unwrap();
        let converted = convert_frame(&frame);

        assert_eq!(converted.len(), frame.len());
        assert_eq!(converted.pixels()[1], Rgb([0, 255, 0]));
        assert_eq!(converted.pixels()[4], Rgb([255, 255, 255]));

        let rows: Vec<_> = converted.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], Rgb([0, 0, 0]));
    }

    #[test]
    fn test_full_display_frame() {
        let frame = FrameBuffer::filled(crate::WIDTH, crate::HEIGHT, PackedPixel::from_raw(0xFFFF));
        let converted = convert_frame(&frame);

        assert_eq!(converted.len(), (crate::WIDTH * crate::HEIGHT) as usize);
        assert!(converted.pixels().iter().all(|p| *p == Rgb([255, 255, 255])));
    }
}
