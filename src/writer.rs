//! PNG output
//!
//! Streams a [`ConvertedBuffer`] into an 8-bit RGB PNG one scanline at a time.
//! Only one row of raw bytes is held beyond the input buffer; the encoded
//! stream goes straight to the file through a `BufWriter`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};
use tracing::debug;

use crate::convert::ConvertedBuffer;
use crate::error::CaptureError;

const CHANNELS: usize = 3;

/// Write `image` as a PNG file at `path`.
///
/// The file is created (or truncated) first. On failure it may be left
/// behind partially written; the returned error is the only signal.
pub fn write_png(path: &Path, image: &ConvertedBuffer) -> Result<(), CaptureError> {
    let file = File::create(path).map_err(|source| CaptureError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    encode_png(&mut out, image)?;

    out.flush()
        .map_err(|e| CaptureError::EncoderFinish(format!("flush {}: {}", path.display(), e)))?;

    debug!("[Writer] Wrote {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Encode `image` as PNG into any byte sink.
pub fn encode_png<W: Write>(sink: W, image: &ConvertedBuffer) -> Result<(), CaptureError> {
    let mut encoder = Encoder::new(sink, image.width(), image.height());
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder.write_header().map_err(CaptureError::EncoderHeader)?;

    {
        let mut stream = writer.stream_writer().map_err(CaptureError::EncoderInit)?;
        let mut row_bytes = Vec::with_capacity(image.width() as usize * CHANNELS);

        for (y, row) in image.rows().enumerate() {
            row_bytes.clear();
            for pixel in row {
                row_bytes.extend_from_slice(&pixel.0);
            }
            stream.write_all(&row_bytes).map_err(|source| CaptureError::EncoderRow {
                row: y as u32,
                source,
            })?;
        }

        stream
            .finish()
            .map_err(|e| CaptureError::EncoderFinish(e.to_string()))?;
    }

    writer
        .finish()
        .map_err(|e| CaptureError::EncoderFinish(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert_frame;
    use crate::error::ErrorKind;
    use crate::frame::{FrameBuffer, PackedPixel};
    use image::Rgb;
    use tempfile::TempDir;

    fn gradient(width: u32, height: u32) -> ConvertedBuffer {
        let pixels = (0..width * height)
            .map(|i| PackedPixel::from_raw((i.wrapping_mul(2_654_435_761) >> 7) as u16))
            .collect();
        convert_frame(&FrameBuffer::new(width, height, pixels).unwrap())
    }

    /// Sink that accepts `limit` bytes and then fails
    struct FailingSink {
        written: usize,
        limit: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.written >= self.limit {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            let n = buf.len().min(self.limit - self.written);
            self.written += n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encode_decodes_to_same_pixels() {
        let image = gradient(7, 5);
        let mut bytes = Vec::new();
        encode_png(&mut bytes, &image).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);

        let decoded = decoded.to_rgb8();
        assert_eq!(decoded.dimensions(), (7, 5));
        for (i, pixel) in decoded.pixels().enumerate() {
            assert_eq!(pixel, &image.pixels()[i]);
        }
    }

    #[test]
    fn test_write_png_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("white.png");
        let frame = FrameBuffer::filled(4, 3, PackedPixel::from_raw(0xFFFF));

        write_png(&path, &convert_frame(&frame)).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert!(decoded.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("shot.png");

        let err = write_png(&path, &gradient(2, 2)).unwrap_err();
        assert!(matches!(err, CaptureError::CreateOutput { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_header_failure() {
        let sink = FailingSink { written: 0, limit: 0 };
        let err = encode_png(sink, &gradient(2, 2)).unwrap_err();
        assert!(matches!(err, CaptureError::EncoderHeader(_)));
    }

    #[test]
    fn test_failure_while_streaming_rows() {
        // Enough room for the signature and IHDR, not for the image data
        let sink = FailingSink { written: 0, limit: 64 };
        let err = encode_png(sink, &gradient(crate::WIDTH, crate::HEIGHT)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoder);
        assert!(!matches!(err, CaptureError::EncoderHeader(_)));
    }
}
