//! Framebuffer screenshots for the TXT 4.0 display.
//!
//! A capture runs as one linear pipeline: pick a free output path, read a raw
//! RGB565 frame from the framebuffer device, expand it to RGB888 and stream it
//! into a PNG file scanline by scanline.

// ============================================================================
// Display configuration (TXT 4.0)
// ============================================================================

/// Display width in pixels
pub const WIDTH: u32 = 240;
/// Display height in pixels
pub const HEIGHT: u32 = 320;
/// Framebuffer device holding the current frame
pub const DEVICE_PATH: &str = "/dev/fb0";
/// Size of one packed RGB565 pixel on the device
pub const BYTES_PER_PIXEL: usize = 2;

pub mod capture;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod frame;
pub mod naming;
pub mod writer;

pub use capture::{capture, CaptureRequest};
pub use config::Settings;
pub use convert::{convert_frame, expand_channel, expand_pixel, ConvertedBuffer};
pub use error::{CaptureError, ErrorKind};
pub use frame::{read_frame, read_frame_from, FrameBuffer, PackedPixel};
pub use naming::{allocate_output_path, allocate_output_path_with_cap, timestamp_now, OutputName};
pub use writer::{encode_png, write_png};
