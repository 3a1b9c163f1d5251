//! Error types shared by every `perfgen` command.

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the generators and the URL waiter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Command-line arguments could not be parsed.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// Writing generated output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The waiter's index range is empty.
    #[error("invalid index range: start {start} is greater than end {end}")]
    InvalidRange {
        /// First index requested.
        start: u64,
        /// Last index requested.
        end: u64,
    },

    /// Some URLs did not meet their condition before the deadline.
    #[error("{count} URL(s) did not meet the condition before the timeout")]
    TimedOut {
        /// Number of URLs still unmet at the deadline.
        count: usize,
    },
}

impl Error {
    /// Hands usage errors back to clap, which prints help or usage and exits
    /// with its own status. Other errors are printed and exit with status 1.
    pub fn exit(self) -> ! {
        if let Error::Usage(err) = self {
            err.exit();
        }
        tracing::debug!(error = ?self, "command failed");
        eprintln!("{self}");
        std::process::exit(1);
    }
}
