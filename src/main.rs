//! Binary entrypoint for the `perfgen` CLI.

use clap::Parser;

use perfgen::cli::Cli;

fn main() {
    perfgen::init();

    let cli = Cli::try_parse().unwrap_or_else(|err| perfgen::Error::from(err).exit());
    if let Err(err) = perfgen::commands::dispatch(&cli.command) {
        err.exit();
    }
}
