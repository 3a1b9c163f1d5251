//! `perfgen hosts` command.

use std::io::Write;

use crate::cli::HostArgs;
use crate::error::Result;
use crate::generate::Generator;
use crate::manifest::HostTemplate;

/// Writes one `Host` document per requested identifier to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write<W: Write>(args: &HostArgs, out: &mut W) -> Result<u64> {
    let request = args.request();
    let range = request.range();
    tracing::debug!(
        first = range.first(),
        last = range.last(),
        namespace = %request.namespace,
        "generating hosts"
    );

    let template = HostTemplate { hostname: request.target, namespace: request.namespace };
    Ok(Generator::new(template, range).write_to(out)?)
}
