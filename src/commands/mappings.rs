//! `perfgen mappings` command.

use std::io::Write;

use crate::cli::MappingArgs;
use crate::error::Result;
use crate::generate::Generator;
use crate::manifest::MappingTemplate;

/// Writes one `Mapping` document per requested identifier to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write<W: Write>(args: &MappingArgs, out: &mut W) -> Result<u64> {
    let request = args.request();
    let range = request.range();
    tracing::debug!(
        first = range.first(),
        last = range.last(),
        service = %request.target,
        "generating mappings"
    );

    let template = MappingTemplate { service: request.target, namespace: request.namespace };
    Ok(Generator::new(template, range).write_to(out)?)
}
