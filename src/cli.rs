//! Command-line options.
//!
//! Any parse problem falls back to printing the usage text, same as `--help`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::capture::CaptureRequest;
use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "txt-screenshot")]
#[command(about = "Capture the TXT 4.0 display and save it as a PNG file")]
#[command(after_help = "Defaults are read from <config dir>/txt-screenshot/settings.json; options given here take precedence.")]
pub struct Cli {
    /// Base name for the screenshot file [default: from settings.json, else "screenshot"]
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory to save the screenshot [default: from settings.json, else the current directory]
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Do not include the date in the filename
    #[arg(short = 'x', long)]
    pub no_date: bool,

    /// Framebuffer device to read [default: from settings.json, else /dev/fb0]
    #[arg(long)]
    pub device: Option<PathBuf>,
}

/// What the binary should do after parsing its arguments.
#[derive(Debug)]
pub enum Invocation {
    Capture(Cli),
    /// Print this usage text and exit successfully
    Help(String),
}

impl Cli {
    /// Parse arguments (including the program name).
    pub fn parse_invocation<I, T>(args: I) -> Invocation
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Invocation::Capture(cli),
            Err(e) => {
                if e.kind() != clap::error::ErrorKind::DisplayHelp {
                    tracing::debug!("[Cli] Invalid arguments: {}", e);
                }
                Invocation::Help(Self::usage())
            }
        }
    }

    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    /// Merge these options over `settings`.
    pub fn into_request(self, settings: &Settings) -> CaptureRequest {
        let mut request = CaptureRequest::from(settings);
        if let Some(name) = self.name {
            request.base_name = name;
        }
        if let Some(directory) = self.directory {
            request.directory = directory;
        }
        if self.no_date {
            request.include_timestamp = false;
        }
        if let Some(device) = self.device {
            request.device = device;
        }
        request
    }
}
