//! Standalone `Mapping` generator.
//!
//! Usage: `mappings [--count N | --id N] [--target SERVICE] [--namespace NS]`

use std::io::{self, BufWriter};

use clap::Parser;

use perfgen::cli::MappingArgs;
use perfgen::commands::mappings;

fn main() {
    perfgen::init();

    let args = MappingArgs::try_parse().unwrap_or_else(|err| perfgen::Error::from(err).exit());
    if let Err(err) = mappings::write(&args, &mut BufWriter::new(io::stdout().lock())) {
        err.exit();
    }
}
