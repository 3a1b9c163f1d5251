//! Clock port for timestamping report lines.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Report lines are stamped through this trait so tests can pin the time.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
