//! Core library entry for the `perfgen` CLI.
//!
//! Synthesizes gateway `Host` and `Mapping` resources for load tests and
//! waits for the routes they create to come up or go away.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod ports;
pub mod range;
pub mod request;
pub mod wait;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use error::{Error, Result};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns [`Error::Usage`] when argument parsing fails, or the command's
/// error when execution fails.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    commands::dispatch(&cli.command)
}

/// Loads `.env` if present and installs the stderr log subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`, so standard
/// output only ever carries documents and reports.
pub fn init() {
    let _ = dotenvy::dotenv();

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
