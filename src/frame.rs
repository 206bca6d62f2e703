//! Raw framebuffer acquisition
//!
//! Reads one full RGB565 frame from the display device. The device holds no
//! header or metadata, just `width * height` little-endian 16-bit words.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::error::CaptureError;
use crate::BYTES_PER_PIXEL;

const RED_SHIFT: u16 = 11;
const GREEN_SHIFT: u16 = 5;
const RED_MASK: u16 = 0x1F;
const GREEN_MASK: u16 = 0x3F;
const BLUE_MASK: u16 = 0x1F;

/// One packed 5/6/5 pixel: red in the top 5 bits, green in the middle 6,
/// blue in the bottom 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedPixel(u16);

impl PackedPixel {
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Decode a pixel as stored on the device (little-endian word)
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Build a pixel from channel values, masking each to its bit width
    #[cfg(test)]
    pub(crate) const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        let red = (red as u16) & RED_MASK;
        let green = (green as u16) & GREEN_MASK;
        let blue = (blue as u16) & BLUE_MASK;
        Self((red << RED_SHIFT) | (green << GREEN_SHIFT) | blue)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Red channel, 0..=31
    pub const fn red(self) -> u8 {
        ((self.0 >> RED_SHIFT) & RED_MASK) as u8
    }

    /// Green channel, 0..=63
    pub const fn green(self) -> u8 {
        ((self.0 >> GREEN_SHIFT) & GREEN_MASK) as u8
    }

    /// Blue channel, 0..=31
    pub const fn blue(self) -> u8 {
        (self.0 & BLUE_MASK) as u8
    }
}

/// A full raw frame, row-major, top row first.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<PackedPixel>,
}

impl FrameBuffer {
    /// Wrap a pixel vector; its length must be exactly `width * height`
    pub fn new(width: u32, height: u32, pixels: Vec<PackedPixel>) -> Result<Self, CaptureError> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(CaptureError::InvalidFrame {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Frame filled with a single pixel value
    #[cfg(test)]
    pub(crate) fn filled(width: u32, height: u32, pixel: PackedPixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; pixel_count(width, height)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[PackedPixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Read one frame from the framebuffer device at `path`.
///
/// Blocks until the whole frame has been read. Not retried on failure.
pub fn read_frame(path: &Path, width: u32, height: u32) -> Result<FrameBuffer, CaptureError> {
    let file = File::open(path).map_err(|source| CaptureError::DeviceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    read_frame_from(file, path, width, height)
}

/// Read one frame from any byte source. `origin` names the source in errors.
///
/// A source that ends before `width * height * 2` bytes is an
/// [`CaptureError::IncompleteFrame`]; the partial data is dropped.
pub fn read_frame_from<R: Read>(
    mut reader: R,
    origin: &Path,
    width: u32,
    height: u32,
) -> Result<FrameBuffer, CaptureError> {
    let expected = pixel_count(width, height) * BYTES_PER_PIXEL;
    let mut bytes = vec![0u8; expected];

    let actual = fill_buffer(&mut reader, &mut bytes).map_err(|source| CaptureError::DeviceRead {
        path: origin.to_path_buf(),
        source,
    })?;

    if actual < expected {
        return Err(CaptureError::IncompleteFrame { expected, actual });
    }

    debug!("[Frame] Read {} bytes from {}", actual, origin.display());

    let pixels = bytes
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|pair| PackedPixel::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(FrameBuffer { width, height, pixels })
}

/// Read until `buf` is full or the source reports end of stream.
/// Returns the number of bytes read.
fn fill_buffer<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
