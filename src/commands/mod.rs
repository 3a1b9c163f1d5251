//! Command dispatch and handlers.

pub mod hosts;
pub mod mappings;
pub mod wait;

use std::io::{self, BufWriter};

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a parsed command to its handler.
///
/// Generated documents and wait reports go to standard output.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<()> {
    match command {
        Command::Hosts(args) => {
            hosts::write(args, &mut BufWriter::new(io::stdout().lock()))?;
            Ok(())
        }
        Command::Mappings(args) => {
            mappings::write(args, &mut BufWriter::new(io::stdout().lock()))?;
            Ok(())
        }
        Command::Wait(args) => wait::run(args),
    }
}
