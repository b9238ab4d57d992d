use std::time::Duration;

use async_trait::async_trait;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// First delay after a failed poll.
pub const POLL_RETRY_INITIAL: Duration = Duration::from_millis(500);
/// Upper bound for the delay between failed polls.
pub const POLL_RETRY_MAX: Duration = Duration::from_secs(30);

/// Source of pauses for the worker loop, swappable in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Delay schedule applied between consecutive failed polls.
///
/// Doubles from [`POLL_RETRY_INITIAL`] up to [`POLL_RETRY_MAX`] and starts over
/// after [`PollBackoff::reset`].
#[derive(Debug)]
pub struct PollBackoff {
    schedule: ExponentialBackoff,
    jitter: bool,
}

impl PollBackoff {
    #[must_use]
    pub fn new() -> Self {
        Self {
            schedule: Self::fresh_schedule(),
            jitter: true,
        }
    }

    /// Same schedule with exact delays.
    #[must_use]
    pub fn without_jitter() -> Self {
        Self {
            jitter: false,
            ..Self::new()
        }
    }

    fn fresh_schedule() -> ExponentialBackoff {
        // 2^n * 250ms: 500ms, 1s, 2s, ...
        ExponentialBackoff::from_millis(2)
            .factor(250)
            .max_delay(POLL_RETRY_MAX)
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.schedule.next().unwrap_or(POLL_RETRY_MAX);
        if self.jitter { jitter(delay) } else { delay }
    }

    pub fn reset(&mut self) {
        self.schedule = Self::fresh_schedule();
    }
}

impl Default for PollBackoff {
    fn default() -> Self {
        Self::new()
    }
}
