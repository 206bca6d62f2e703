//! Output file naming
//!
//! Names look like `[directory/]base[-YYYY-MM-DD-HH-MM-SS][-N].png`. The
//! counter suffix is only added when the plain name is already taken, and
//! every candidate is probed again before it is returned.
//!
//! The check is best-effort: another process can still create the same file
//! between the probe and the write.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::error::CaptureError;

/// `strftime` layout of the timestamp suffix (one second resolution)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
pub const EXTENSION: &str = "png";
/// Highest counter suffix tried before giving up
pub const MAX_COUNTER: u32 = 10_000;

/// The fixed parts of an output file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName {
    directory: PathBuf,
    base_name: String,
    timestamp: Option<String>,
}

impl OutputName {
    /// An empty `directory` means the current working directory.
    pub fn new(directory: impl Into<PathBuf>, base_name: impl Into<String>, timestamp: Option<String>) -> Self {
        Self {
            directory: directory.into(),
            base_name: base_name.into(),
            timestamp,
        }
    }

    /// Path for the given counter suffix (`None` = no suffix)
    ///
    /// The base name is appended after a `/` as plain text, so a rooted or
    /// nested base name still lands inside the directory.
    pub fn candidate(&self, counter: Option<u32>) -> PathBuf {
        let mut file_name = self.base_name.clone();
        if let Some(timestamp) = &self.timestamp {
            file_name.push('-');
            file_name.push_str(timestamp);
        }
        if let Some(n) = counter {
            file_name.push('-');
            file_name.push_str(&n.to_string());
        }
        file_name.push('.');
        file_name.push_str(EXTENSION);

        if self.directory.as_os_str().is_empty() {
            return PathBuf::from(file_name);
        }

        let mut path = OsString::from(self.directory.as_os_str());
        path.push("/");
        path.push(file_name);
        PathBuf::from(path)
    }
}

/// Current local time formatted with [`TIMESTAMP_FORMAT`]
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Pick a path in `directory` that does not exist yet.
pub fn allocate_output_path(
    directory: &Path,
    base_name: &str,
    include_timestamp: bool,
) -> Result<PathBuf, CaptureError> {
    let timestamp = include_timestamp.then(timestamp_now);
    allocate_output_path_with_cap(&OutputName::new(directory, base_name, timestamp), MAX_COUNTER)
}

/// Like [`allocate_output_path`] but with a fixed name and counter cap.
///
/// Fails with [`CaptureError::CounterExhausted`] once suffixes `1..=cap` are
/// all taken, and with [`CaptureError::ExistenceProbe`] if a candidate cannot
/// be checked (an unreadable directory is never treated as "free").
pub fn allocate_output_path_with_cap(name: &OutputName, cap: u32) -> Result<PathBuf, CaptureError> {
    let path = name.candidate(None);
    if !is_taken(&path)? {
        return Ok(path);
    }

    for counter in 1..=cap {
        let path = name.candidate(Some(counter));
        if !is_taken(&path)? {
            debug!("[Naming] {} taken, using counter {}", name.candidate(None).display(), counter);
            return Ok(path);
        }
    }

    Err(CaptureError::CounterExhausted {
        base: name.candidate(None),
        cap,
    })
}

fn is_taken(path: &Path) -> Result<bool, CaptureError> {
    path.try_exists().map_err(|source| CaptureError::ExistenceProbe {
        path: path.to_path_buf(),
        source,
    })
}
