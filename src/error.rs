//! Error types for the capture pipeline.

use std::path::PathBuf;

/// Which part of the system a [`CaptureError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Framebuffer device could not be read
    Device,
    /// Destination directory or file is inaccessible
    Filesystem,
    /// The PNG encoder failed
    Encoder,
}

impl ErrorKind {
    /// Short name used when reporting a failed capture
    pub fn label(self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Filesystem => "filesystem",
            Self::Encoder => "encoder",
        }
    }
}

/// Errors that can occur while taking a screenshot.
///
/// Every variant is fatal for the current capture.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The framebuffer device could not be opened.
    #[error("device unavailable: {}", path.display())]
    DeviceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an opened device failed part way through.
    #[error("failed to read frame from {}", path.display())]
    DeviceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The device ran out of data before a full frame was read.
    #[error("incomplete frame: expected {expected} bytes, got {actual}")]
    IncompleteFrame { expected: usize, actual: usize },

    /// A pixel buffer did not match the frame dimensions.
    #[error("invalid frame: expected {expected} pixels, got {actual}")]
    InvalidFrame { expected: usize, actual: usize },

    /// Checking whether an output candidate exists failed.
    #[error("cannot check whether {} exists", path.display())]
    ExistenceProbe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every counter suffix up to the cap is already taken.
    #[error("no free file name for {} after {cap} attempts", base.display())]
    CounterExhausted { base: PathBuf, cap: u32 },

    /// The output file could not be created.
    #[error("cannot create {}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoder could not set up its image data stream.
    #[error("failed to initialise PNG encoder")]
    EncoderInit(#[source] png::EncodingError),

    /// Writing the PNG signature and header chunk failed.
    #[error("failed to write PNG header")]
    EncoderHeader(#[source] png::EncodingError),

    /// The encoder failed while emitting a scanline.
    #[error("failed to write PNG row {row}")]
    EncoderRow {
        row: u32,
        #[source]
        source: std::io::Error,
    },

    /// Closing the image stream or flushing the file failed.
    #[error("failed to finish PNG file: {0}")]
    EncoderFinish(String),
}

impl CaptureError {
    /// Which part of the system failed, for the error report.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DeviceUnavailable { .. }
            | Self::DeviceRead { .. }
            | Self::IncompleteFrame { .. }
            | Self::InvalidFrame { .. } => ErrorKind::Device,
            Self::ExistenceProbe { .. }
            | Self::CounterExhausted { .. }
            | Self::CreateOutput { .. } => ErrorKind::Filesystem,
            Self::EncoderInit(_)
            | Self::EncoderHeader(_)
            | Self::EncoderRow { .. }
            | Self::EncoderFinish(_) => ErrorKind::Encoder,
        }
    }
}
