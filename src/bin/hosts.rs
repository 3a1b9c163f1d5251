//! Standalone `Host` generator.
//!
//! Usage: `hosts [--count N | --id N] --hostname HOST [--namespace NS]`

use std::io::{self, BufWriter};

use clap::Parser;

use perfgen::cli::HostArgs;
use perfgen::commands::hosts;

fn main() {
    perfgen::init();

    let args = HostArgs::try_parse().unwrap_or_else(|err| perfgen::Error::from(err).exit());
    if let Err(err) = hosts::write(&args, &mut BufWriter::new(io::stdout().lock())) {
        err.exit();
    }
}
