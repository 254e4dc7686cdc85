//! Polling for host objects that appear some time after a scene loads.
//!
//! The check is retried at a short interval for an initial window, then at a
//! long interval indefinitely, and the loop ends on the first success.

use std::future::Future;
use std::time::Duration;

/// Two-phase retry schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub fast_interval: Duration,
    pub fast_window: Duration,
    pub slow_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            fast_interval: Duration::from_millis(500),
            fast_window: Duration::from_secs(10),
            slow_interval: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before the next attempt, given the time already spent waiting.
    pub fn delay_for(&self, elapsed: Duration) -> Duration {
        if elapsed < self.fast_window {
            self.fast_interval
        } else {
            self.slow_interval
        }
    }
}

/// Call `check` until it returns `Some`, sleeping per `policy` between tries.
///
/// # Arguments
/// * `policy` - Fast/slow retry schedule
/// * `check` - Looks for the object; `None` means not there yet
///
/// # Returns
/// The first value `check` produces. Elapsed time is the sum of the scheduled
/// delays, not wall-clock time. Never gives up; wrap in `tokio::time::timeout`
/// for a bound.
pub async fn wait_until_ready<T, F>(policy: RetryPolicy, mut check: F) -> T
where
    F: FnMut() -> Option<T>,
{
    poll_until(policy, || std::future::ready(check())).await
}

/// Async-check form of [`wait_until_ready`]
pub async fn poll_until<T, F, Fut>(policy: RetryPolicy, mut check: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let mut elapsed = Duration::ZERO;
    let mut announced_slow_phase = false;
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;
        if let Some(found) = check().await {
            tracing::info!("Ready after {} attempt(s) ({:.1}s)", attempts, elapsed.as_secs_f32());
            return found;
        }

        let delay = policy.delay_for(elapsed);
        if elapsed >= policy.fast_window && !announced_slow_phase {
            tracing::info!(
                "Initial timeout reached ({:?}) - continuing to check every {:?} indefinitely...",
                policy.fast_window,
                policy.slow_interval
            );
            announced_slow_phase = true;
        } else {
            tracing::debug!(
                "Not ready yet (elapsed: {:.1}s), retrying in {:?}",
                elapsed.as_secs_f32(),
                delay
            );
        }

        tokio::time::sleep(delay).await;
        elapsed += delay;
    }
}
