//! butler-launcher entry point.
//!
//! Parses the forwarded argument list, runs the update-then-launch flow, and
//! exits with butler's exit code. Fatal launcher-internal failures print a
//! user-friendly error and exit 1 without ever spawning butler.

use butler_launcher::cli::Cli;
use butler_launcher::core::user_friendly_error;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    match cli.execute().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}

/// Initialize tracing from `RUST_LOG`, defaulting to warnings only.
///
/// Log lines go to stderr so they never mix with butler's stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
