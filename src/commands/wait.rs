//! `perfgen wait` command.

use std::sync::Arc;

use crate::adapters::live::http::HttpProber;
use crate::cli::WaitArgs;
use crate::error::{Error, Result};
use crate::wait::{Reporter, WaitConfig, Waiter};

/// Execute the `wait` command on a single-threaded runtime.
///
/// # Errors
///
/// Returns an error if the index range is empty, the runtime cannot start,
/// or any URL misses the deadline.
pub fn run(args: &WaitArgs) -> Result<()> {
    let config = WaitConfig::from_args(args)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;

    let waiter = Waiter::new(Arc::new(HttpProber::new()), Arc::new(Reporter::stdout()));
    let summary = runtime.block_on(waiter.run(&config));

    if summary.is_success() {
        Ok(())
    } else {
        Err(Error::TimedOut { count: summary.timed_out })
    }
}
