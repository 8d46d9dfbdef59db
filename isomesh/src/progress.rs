//! Task contexts for long extractions.
//!
//! [`ProgressReporter`] logs progress through `log` at a fixed interval and stops
//! the extraction when its [`CancelToken`] is triggered from another thread.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use isomesh_core::{Progress, TaskContext};

/// Default time between two progress log lines.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_millis(250);

/// Shared cancellation flag.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// [`TaskContext`] that logs progress and honours a [`CancelToken`].
#[derive(Debug)]
pub struct ProgressReporter {
    label: String,
    interval: Duration,
    last_report: Option<Instant>,
    cancel: CancelToken,
    latest: Option<Progress>,
}

impl ProgressReporter {
    /// Reporter logging under `label` every [`DEFAULT_REPORT_INTERVAL`].
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            interval: DEFAULT_REPORT_INTERVAL,
            last_report: None,
            cancel: CancelToken::new(),
            latest: None,
        }
    }

    /// Set the minimum time between two reports. Zero reports every slice.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Observe an existing cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels this reporter's extraction.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Most recent progress received.
    pub fn latest(&self) -> Option<Progress> {
        self.latest
    }
}

impl TaskContext for ProgressReporter {
    fn should_update(&self) -> bool {
        if self.cancel.is_cancelled() {
            return true;
        }
        match self.last_report {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    fn update(&mut self, progress: Progress) -> ControlFlow<()> {
        self.last_report = Some(Instant::now());
        self.latest = Some(progress);

        if self.cancel.is_cancelled() {
            log::warn!(
                "{}: cancelled at {}/{}",
                self.label,
                progress.current,
                progress.max
            );
            return ControlFlow::Break(());
        }

        let percent = if progress.max == 0 {
            100.0
        } else {
            100.0 * progress.current as f64 / progress.max as f64
        };
        log::info!(
            "{}: {} {}/{} ({:.1}%)",
            self.label,
            progress.message,
            progress.current,
            progress.max,
            percent
        );
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(current: usize) -> Progress {
        Progress {
            message: "Computing surface...",
            current,
            max: 10,
        }
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_reporter_respects_interval() {
        let mut reporter = ProgressReporter::new("test").with_interval(Duration::from_secs(3600));
        assert!(reporter.should_update());
        assert_eq!(reporter.update(progress(1)), ControlFlow::Continue(()));
        assert!(!reporter.should_update());
        assert_eq!(reporter.latest(), Some(progress(1)));
    }

    #[test]
    fn test_zero_interval_reports_every_time() {
        let mut reporter = ProgressReporter::new("test").with_interval(Duration::ZERO);
        for i in 0..3 {
            assert!(reporter.should_update());
            let _ = reporter.update(progress(i));
        }
    }

    #[test]
    fn test_cancel_breaks_at_next_checkpoint() {
        let mut reporter = ProgressReporter::new("test").with_interval(Duration::from_secs(3600));
        let _ = reporter.update(progress(1));
        reporter.cancel_token().cancel();
        assert!(reporter.should_update());
        assert_eq!(reporter.update(progress(2)), ControlFlow::Break(()));
    }
}
