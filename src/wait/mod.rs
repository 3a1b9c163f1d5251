//! Waits for a set of URLs to reach an expected state.
//!
//! Used between load-test phases: after applying generated mappings, wait
//! until every `/echo-<i>/` route answers 200; after deleting them, wait
//! until every route is gone.

pub mod condition;
pub mod pattern;
pub mod report;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{sleep, sleep_until, Instant};

use crate::cli::WaitArgs;
use crate::error::Result;
use crate::ports::probe::Prober;

pub use condition::WaitCondition;
pub use pattern::UrlSet;
pub use report::{format_duration, Reporter};

/// Delay between probes of a URL that has not met its condition.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Minimum delay between "still trying" lines for one URL.
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(30);

/// Everything a wait run needs besides its ports.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// URLs to watch.
    pub urls: UrlSet,
    /// Condition every URL must meet.
    pub condition: WaitCondition,
    /// Global deadline, measured from the start of the run.
    pub timeout: Duration,
    /// Maximum number of URLs probed at once.
    pub concurrency: usize,
    /// Delay between probes of one URL.
    pub retry_interval: Duration,
    /// Delay between "still trying" lines.
    pub progress_interval: Duration,
    /// Label printed with the elapsed time.
    pub reason: Option<String>,
    /// Report unmet probes too.
    pub verbose: bool,
}

impl WaitConfig {
    /// Builds the configuration from parsed CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL pattern's index range is empty.
    pub fn from_args(args: &WaitArgs) -> Result<Self> {
        Ok(Self {
            urls: UrlSet::new(args.url.clone(), args.start, args.end)?,
            condition: WaitCondition::from_flags(args.wait_code, args.wait_error),
            timeout: Duration::from_secs(args.timeout),
            concurrency: usize::try_from(args.concurrency).unwrap_or(usize::MAX),
            retry_interval: RETRY_INTERVAL,
            progress_interval: PROGRESS_INTERVAL,
            reason: args.reason.clone(),
            verbose: args.verbose,
        })
    }
}

/// Outcome of a wait run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSummary {
    /// URLs that met the condition.
    pub met: usize,
    /// URLs still unmet when the deadline passed.
    pub timed_out: usize,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}

impl WaitSummary {
    /// Whether every URL met its condition.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.timed_out == 0
    }

    fn record(&mut self, joined: std::result::Result<bool, JoinError>) {
        match joined {
            Ok(true) => self.met += 1,
            Ok(false) => self.timed_out = self.timed_out.saturating_add(1),
            Err(e) => {
                tracing::error!(error = %e, "probe task failed");
                self.timed_out = self.timed_out.saturating_add(1);
            }
        }
    }
}

/// Probes URLs until they meet a [`WaitCondition`] or time runs out.
pub struct Waiter {
    prober: Arc<dyn Prober>,
    reporter: Arc<Reporter>,
}

/// Per-URL settings shared by every probing task.
#[derive(Clone, Copy)]
struct UrlPolicy {
    condition: WaitCondition,
    deadline: Instant,
    retry_interval: Duration,
    progress_interval: Duration,
    verbose: bool,
}

impl Waiter {
    /// Creates a waiter probing through `prober` and reporting to `reporter`.
    #[must_use]
    pub fn new(prober: Arc<dyn Prober>, reporter: Arc<Reporter>) -> Self {
        Self { prober, reporter }
    }

    /// Waits for every URL in `config` and reports progress as it goes.
    pub async fn run(&self, config: &WaitConfig) -> WaitSummary {
        let started = Instant::now();
        let policy = UrlPolicy {
            condition: config.condition,
            deadline: started + config.timeout,
            retry_interval: config.retry_interval,
            progress_interval: config.progress_interval,
            verbose: config.verbose,
        };
        self.banner(config);

        // A URL only gets a task once it holds a permit, so at most
        // `concurrency` tasks exist however wide the index range is.
        let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
        let mut summary = WaitSummary { met: 0, timed_out: 0, elapsed: Duration::ZERO };
        let mut tasks = JoinSet::new();
        let mut started_urls: u128 = 0;
        for url in config.urls.urls() {
            let permit = tokio::select! {
                biased;
                () = sleep_until(policy.deadline) => break,
                permit = Arc::clone(&semaphore).acquire_owned() => permit,
            };
            let Ok(permit) = permit else { break };
            started_urls += 1;

            let prober = Arc::clone(&self.prober);
            let reporter = Arc::clone(&self.reporter);
            tasks.spawn(async move {
                let _permit = permit;
                wait_for_url(&url, prober.as_ref(), &reporter, policy).await
            });
            while let Some(joined) = tasks.try_join_next() {
                summary.record(joined);
            }
        }

        let never_started = config.urls.count() - started_urls;
        if never_started > 0 {
            self.reporter.line(format!("{never_started} URLs not probed before the deadline"));
            let skipped = usize::try_from(never_started).unwrap_or(usize::MAX);
            summary.timed_out = summary.timed_out.saturating_add(skipped);
        }
        while let Some(joined) = tasks.join_next().await {
            summary.record(joined);
        }

        summary.elapsed = started.elapsed();
        let elapsed = format_duration(summary.elapsed);
        match &config.reason {
            Some(reason) => self.reporter.line(format!("Elapsed time: {reason}: {elapsed}")),
            None => self.reporter.line(format!("Elapsed time: {elapsed}")),
        }
        tracing::debug!(met = summary.met, timed_out = summary.timed_out, "wait finished");
        summary
    }

    fn banner(&self, config: &WaitConfig) {
        let timeout = format_duration(config.timeout);
        match &config.urls {
            UrlSet::Pattern { pattern, .. } => self.reporter.line(format!(
                "Waiting for all {pattern} ({} URLs) to return {} (for up to {timeout}, concurrency {})",
                config.urls.count(),
                config.condition,
                config.concurrency,
            )),
            UrlSet::Single(url) => self.reporter.line(format!(
                "Waiting for single URL {url} to return {} (for up to {timeout})",
                config.condition,
            )),
        }
    }
}

/// Probes one URL until it meets the condition; false on timeout.
async fn wait_for_url(
    url: &str,
    prober: &dyn Prober,
    reporter: &Reporter,
    policy: UrlPolicy,
) -> bool {
    if check(url, prober, reporter, &policy).await {
        reporter.line(format!("{url}: OK"));
        return true;
    }

    let mut last_progress = Instant::now();
    loop {
        tokio::select! {
            () = sleep(policy.retry_interval) => {
                if check(url, prober, reporter, &policy).await {
                    reporter.line(format!("{url}: OK"));
                    return true;
                }
                let now = Instant::now();
                if now.duration_since(last_progress) > policy.progress_interval {
                    let left = format_duration(policy.deadline.saturating_duration_since(now));
                    reporter.line(format!(
                        "{url}: (condition not met yet. still trying: {left} left...)"
                    ));
                    last_progress = now;
                }
            }
            () = sleep_until(policy.deadline) => {
                reporter.line(format!("{url}: TIMEOUT"));
                return false;
            }
        }
    }
}

async fn check(url: &str, prober: &dyn Prober, reporter: &Reporter, policy: &UrlPolicy) -> bool {
    let outcome = prober.probe(url).await;
    tracing::debug!(%url, %outcome, "probed");
    if policy.condition.is_met(&outcome) {
        reporter.line(format!("{url}: condition met: {outcome}"));
        return true;
    }
    if policy.verbose {
        reporter.line(format!("{url}: not what we are waiting for: {outcome}"));
    }
    false
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::report::testing::{FixedClock, SharedBuffer};
    use super::*;
    use crate::ports::probe::{ProbeFuture, ProbeOutcome};

    /// Serves scripted outcomes per URL; the last one repeats forever.
    #[derive(Default)]
    struct ScriptedProber {
        scripts: Mutex<HashMap<String, Vec<ProbeOutcome>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProber {
        fn script(self, url: &str, outcomes: Vec<ProbeOutcome>) -> Self {
            self.scripts.lock().unwrap().insert(url.to_owned(), outcomes);
            self
        }

        fn calls_for(&self, url: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
        }
    }

    impl Prober for ScriptedProber {
        fn probe(&self, url: &str) -> ProbeFuture<'_> {
            self.calls.lock().unwrap().push(url.to_owned());
            let mut scripts = self.scripts.lock().unwrap();
            let outcome = match scripts.get_mut(url) {
                Some(script) if script.len() > 1 => script.remove(0),
                Some(script) => script[0].clone(),
                None => ProbeOutcome::Failed { error: "connection refused".into() },
            };
            Box::pin(async move { outcome })
        }
    }

    fn ok() -> ProbeOutcome {
        ProbeOutcome::Response { status: 200 }
    }

    fn config(urls: UrlSet, condition: WaitCondition, timeout: Duration) -> WaitConfig {
        WaitConfig {
            urls,
            condition,
            timeout,
            concurrency: 2,
            retry_interval: Duration::from_millis(5),
            progress_interval: Duration::from_secs(30),
            reason: None,
            verbose: false,
        }
    }

    fn waiter(prober: Arc<ScriptedProber>) -> (Waiter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let reporter = Arc::new(Reporter::new(Box::new(FixedClock), Box::new(buffer.clone())));
        (Waiter::new(prober, reporter), buffer)
    }

    #[tokio::test]
    async fn all_urls_ready_immediately() {
        let urls = UrlSet::new("http://gw/echo-@/", 1, 3).unwrap();
        let mut prober = ScriptedProber::default();
        for url in urls.urls() {
            prober = prober.script(&url, vec![ok()]);
        }
        let prober = Arc::new(prober);
        let (waiter, buffer) = waiter(Arc::clone(&prober));

        let summary =
            waiter.run(&config(urls, WaitCondition::Status(200), Duration::from_secs(5))).await;

        assert!(summary.is_success());
        assert_eq!(summary.met, 3);
        let report = buffer.contents();
        assert!(report.contains("Waiting for all http://gw/echo-@/ (3 URLs) to return code 200"));
        assert!(report.contains("http://gw/echo-2/: condition met: code=200"));
        assert!(report.contains("http://gw/echo-3/: OK"));
        assert!(report.contains("Elapsed time: "));
        assert_eq!(prober.calls_for("http://gw/echo-1/"), 1);
    }

    #[tokio::test]
    async fn retries_until_condition_met() {
        let url = "http://gw/echo-1/";
        let prober = Arc::new(ScriptedProber::default().script(
            url,
            vec![
                ProbeOutcome::Response { status: 404 },
                ProbeOutcome::Response { status: 503 },
                ok(),
            ],
        ));
        let (waiter, _buffer) = waiter(Arc::clone(&prober));

        let cfg = config(
            UrlSet::new(url, 1, 1).unwrap(),
            WaitCondition::Status(200),
            Duration::from_secs(5),
        );
        let summary = waiter.run(&cfg).await;

        assert_eq!(summary.met, 1);
        assert_eq!(prober.calls_for(url), 3);
    }

    #[tokio::test]
    async fn unmet_url_times_out() {
        let url = "http://gw/health";
        let prober = Arc::new(
            ScriptedProber::default().script(url, vec![ProbeOutcome::Response { status: 500 }]),
        );
        let (waiter, buffer) = waiter(prober);

        let mut cfg = config(
            UrlSet::new(url, 1, 1).unwrap(),
            WaitCondition::Status(200),
            Duration::from_millis(50),
        );
        cfg.reason = Some("mappings ready".into());
        let summary = waiter.run(&cfg).await;

        assert!(!summary.is_success());
        assert_eq!(summary.timed_out, 1);
        let report = buffer.contents();
        assert!(report.contains("Waiting for single URL http://gw/health to return code 200"));
        assert!(report.contains("http://gw/health: TIMEOUT"));
        assert!(report.contains("Elapsed time: mappings ready: "));
    }

    #[tokio::test]
    async fn waiting_for_errors_accepts_refused_connections() {
        // Unscripted URLs always fail to connect.
        let prober = Arc::new(ScriptedProber::default());
        let (waiter, buffer) = waiter(prober);

        let summary = waiter
            .run(&config(
                UrlSet::new("http://gw/echo-@/", 5, 6).unwrap(),
                WaitCondition::Error,
                Duration::from_secs(5),
            ))
            .await;

        assert_eq!(summary.met, 2);
        assert!(buffer.contents().contains("http://gw/echo-5/: condition met: connection refused"));
    }

    #[tokio::test]
    async fn verbose_reports_unmet_probes() {
        let url = "http://gw/echo-1/";
        let prober = Arc::new(
            ScriptedProber::default()
                .script(url, vec![ProbeOutcome::Response { status: 404 }, ok()]),
        );
        let (waiter, buffer) = waiter(prober);

        let mut cfg = config(
            UrlSet::new(url, 1, 1).unwrap(),
            WaitCondition::Status(200),
            Duration::from_secs(5),
        );
        cfg.verbose = true;
        waiter.run(&cfg).await;

        let report = buffer.contents();
        assert!(report.contains("http://gw/echo-1/: not what we are waiting for: code=404"));
    }

    #[tokio::test]
    async fn unmet_url_reports_progress_while_waiting() {
        let url = "http://gw/echo-1/";
        let prober = Arc::new(
            ScriptedProber::default().script(url, vec![ProbeOutcome::Response { status: 404 }]),
        );
        let (waiter, buffer) = waiter(prober);

        let mut cfg = config(
            UrlSet::new(url, 1, 1).unwrap(),
            WaitCondition::Status(200),
            Duration::from_millis(80),
        );
        cfg.progress_interval = Duration::from_millis(2);
        let summary = waiter.run(&cfg).await;

        assert_eq!(summary.timed_out, 1);
        let report = buffer.contents();
        assert!(report.contains("http://gw/echo-1/: (condition not met yet. still trying: "));
        assert!(report.contains(" left...)"));
    }

    #[tokio::test]
    async fn wait_code_zero_accepts_any_response() {
        let urls = UrlSet::new("http://gw/echo-@/", 1, 2).unwrap();
        let prober = Arc::new(
            ScriptedProber::default()
                .script("http://gw/echo-1/", vec![ProbeOutcome::Response { status: 418 }])
                .script("http://gw/echo-2/", vec![ProbeOutcome::Response { status: 500 }]),
        );
        let (waiter, buffer) = waiter(prober);

        let condition = WaitCondition::from_flags(0, false);
        let summary = waiter.run(&config(urls, condition, Duration::from_secs(5))).await;

        assert!(summary.is_success());
        assert_eq!(summary.met, 2);
        let report = buffer.contents();
        assert!(report.contains("(2 URLs) to return any response"));
        assert!(report.contains("http://gw/echo-1/: condition met: code=418"));
        assert!(report.contains("http://gw/echo-2/: condition met: code=500"));
    }

    #[tokio::test]
    async fn urls_wait_for_a_permit_before_starting() {
        let urls = UrlSet::new("http://gw/echo-@/", 1, 1000).unwrap();
        let prober = Arc::new(ScriptedProber::default().script(
            "http://gw/echo-1/",
            vec![ProbeOutcome::Response { status: 500 }],
        ));
        let (waiter, buffer) = waiter(Arc::clone(&prober));

        let mut cfg = config(urls, WaitCondition::Status(200), Duration::from_millis(40));
        cfg.concurrency = 1;
        let summary = waiter.run(&cfg).await;

        assert_eq!(summary.met, 0);
        assert_eq!(summary.timed_out, 1000);
        assert_eq!(prober.calls_for("http://gw/echo-2/"), 0);
        let total_calls = prober.calls.lock().unwrap().len();
        assert_eq!(total_calls, prober.calls_for("http://gw/echo-1/"));
        let report = buffer.contents();
        assert!(report.contains("http://gw/echo-1/: TIMEOUT"));
        assert!(report.contains("999 URLs not probed before the deadline"));
    }

    #[tokio::test]
    async fn full_index_range_times_out_without_overflow() {
        let urls = UrlSet::new("http://gw/echo-@/", 0, u64::MAX).unwrap();
        let prober = Arc::new(ScriptedProber::default().script(
            "http://gw/echo-0/",
            vec![ProbeOutcome::Response { status: 500 }],
        ));
        let (waiter, buffer) = waiter(prober);

        let mut cfg = config(urls, WaitCondition::Status(200), Duration::from_millis(20));
        cfg.concurrency = 1;
        let summary = waiter.run(&cfg).await;

        assert!(!summary.is_success());
        assert!(buffer.contents().contains("(18446744073709551616 URLs)"));
    }

    #[test]
    fn config_from_args_uses_defaults() {
        use clap::Parser;

        use crate::cli::{Cli, Command};

        let cli = Cli::parse_from(["perfgen", "wait", "--url", "http://gw/echo-@/", "--end", "10"]);
        let Command::Wait(args) = cli.command else { panic!("expected wait") };
        let cfg = WaitConfig::from_args(&args).unwrap();

        assert_eq!(cfg.urls.count(), 10);
        assert_eq!(cfg.condition, WaitCondition::Status(200));
        assert_eq!(cfg.timeout, Duration::from_secs(300));
        assert_eq!(cfg.concurrency, 50);
        assert_eq!(cfg.retry_interval, RETRY_INTERVAL);
    }
}
