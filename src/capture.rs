//! Capture pipeline: name -> read -> convert -> write.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Settings;
use crate::convert::convert_frame;
use crate::error::CaptureError;
use crate::frame::read_frame;
use crate::naming::{allocate_output_path_with_cap, timestamp_now, OutputName};
use crate::writer::write_png;
use crate::{HEIGHT, WIDTH};

/// Inputs for one screenshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Output directory (empty = current directory)
    pub directory: PathBuf,
    pub base_name: String,
    pub include_timestamp: bool,
    /// Framebuffer device to read
    pub device: PathBuf,
    /// Highest counter suffix tried when the name is taken
    pub max_counter: u32,
}

impl From<&Settings> for CaptureRequest {
    fn from(settings: &Settings) -> Self {
        Self {
            directory: settings.directory.clone(),
            base_name: settings.base_name.clone(),
            include_timestamp: settings.include_timestamp,
            device: settings.device.clone(),
            max_counter: settings.max_counter,
        }
    }
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Take one screenshot and return the path it was saved to.
///
/// The output path is chosen first so an unusable directory fails before the
/// device is touched. Nothing is written unless a full frame was read.
pub fn capture(request: &CaptureRequest) -> Result<PathBuf, CaptureError> {
    let timestamp = request.include_timestamp.then(timestamp_now);
    let name = OutputName::new(&request.directory, &request.base_name, timestamp);
    let output = allocate_output_path_with_cap(&name, request.max_counter)?;
    debug!("[Capture] Output path: {}", output.display());

    let frame = read_frame(&request.device, WIDTH, HEIGHT)?;
    let image = convert_frame(&frame);
    drop(frame);

    write_png(&output, &image)?;

    info!("[Capture] Saved {}x{} screenshot to {}", WIDTH, HEIGHT, output.display());
    Ok(output)
}
