//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the waiter and an external
//! system (time, HTTP endpoints). Implementations live in `src/adapters/`.

pub mod clock;
pub mod probe;

pub use clock::Clock;
pub use probe::{ProbeFuture, ProbeOutcome, Prober};
