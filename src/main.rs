use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use txt_screenshot_lib::cli::{Cli, Invocation};
use txt_screenshot_lib::{capture, CaptureError, Settings};

fn main() -> ExitCode {
    // stdout is reserved for the saved path
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .try_init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CaptureError>() {
                Some(capture_err) => eprintln!("Error ({}): {err:#}", capture_err.kind().label()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = match Cli::parse_invocation(std::env::args_os()) {
        Invocation::Capture(cli) => cli,
        Invocation::Help(usage) => {
            print!("{usage}");
            return Ok(());
        }
    };

    let request = cli.into_request(&Settings::load());
    let path = capture(&request)?;

    println!("Screenshot saved as {}", path.display());
    Ok(())
}
