//! Timestamped progress lines written by the waiter.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ports::clock::Clock;

/// Wall clock used to stamp report lines on a real run.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Writes `[<time>] <message>` lines to a shared sink.
pub struct Reporter {
    clock: Box<dyn Clock>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl Reporter {
    /// Creates a reporter writing to `out`.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, out: Box<dyn Write + Send>) -> Self {
        Self { clock, out: Mutex::new(out) }
    }

    /// Creates a reporter stamping lines with [`SystemClock`] and writing
    /// them to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(SystemClock), Box::new(io::stdout()))
    }

    /// Writes one line. A failed write is logged and otherwise ignored so a
    /// closed pipe never aborts the wait.
    pub fn line(&self, message: impl Display) {
        let stamp = self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "[{stamp}] {message}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "failed to write report line");
        }
    }
}

/// Formats a duration as seconds with millisecond precision, e.g. `12.345s`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{DateTime, Utc};

    use super::testing::{FixedClock, SharedBuffer};
    use super::{format_duration, Reporter, SystemClock};

    #[test]
    fn lines_are_timestamped() {
        let buffer = SharedBuffer::default();
        let reporter = Reporter::new(Box::new(FixedClock), Box::new(buffer.clone()));

        reporter.line("http://gw/echo-1/: OK");

        assert_eq!(buffer.contents(), "[2025-03-15T14:30:00.000Z] http://gw/echo-1/: OK\n");
    }

    #[test]
    fn system_clock_stamps_parse_as_rfc3339() {
        let buffer = SharedBuffer::default();
        let reporter = Reporter::new(Box::new(SystemClock), Box::new(buffer.clone()));
        let before = Utc::now();

        reporter.line("banner");

        let line = buffer.contents();
        let stamp = line
            .strip_prefix('[')
            .and_then(|rest| rest.split_once("] banner\n"))
            .map(|(stamp, _)| stamp)
            .unwrap();
        let stamped = DateTime::parse_from_rfc3339(stamp).unwrap().with_timezone(&Utc);
        assert!(stamp.ends_with('Z'));
        assert!(stamped.timestamp_millis() >= before.timestamp_millis());
        assert!(stamped <= Utc::now());
    }

    #[test]
    fn durations_use_millisecond_precision() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
        assert_eq!(format_duration(Duration::from_secs(300)), "300.000s");
    }
}
