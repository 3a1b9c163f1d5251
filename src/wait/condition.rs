//! What counts as "ready" for a probed URL.

use std::fmt;

use crate::ports::probe::ProbeOutcome;

/// Condition a URL must meet before the waiter stops probing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    /// A response with exactly this status.
    Status(u16),
    /// Any response at all.
    AnyResponse,
    /// The endpoint is gone: no response, or a 404/503.
    Error,
}

impl WaitCondition {
    /// Builds the condition from `--wait-code` and `--wait-error`.
    ///
    /// `--wait-error` wins over any code, and a code of 0 accepts any
    /// response.
    #[must_use]
    pub fn from_flags(wait_code: u16, wait_error: bool) -> Self {
        match (wait_error, wait_code) {
            (true, _) => WaitCondition::Error,
            (false, 0) => WaitCondition::AnyResponse,
            (false, code) => WaitCondition::Status(code),
        }
    }

    /// Whether `outcome` satisfies this condition.
    #[must_use]
    pub fn is_met(&self, outcome: &ProbeOutcome) -> bool {
        match (self, outcome) {
            (WaitCondition::Error, ProbeOutcome::Failed { .. }) => true,
            (WaitCondition::Error, ProbeOutcome::Response { status }) => {
                matches!(status, 404 | 503)
            }
            (WaitCondition::AnyResponse, ProbeOutcome::Response { .. }) => true,
            (WaitCondition::Status(code), ProbeOutcome::Response { status }) => code == status,
            (_, ProbeOutcome::Failed { .. }) => false,
        }
    }
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitCondition::Status(code) => write!(f, "code {code}"),
            WaitCondition::AnyResponse => f.write_str("any response"),
            WaitCondition::Error => f.write_str("an error"),
        }
    }
}
