//! Explicit waits
//!
//! Polls a condition at a fixed interval until it yields a value or the
//! timeout elapses.

use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::error::UiError;

/// Poll interval used by the page objects
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug)]
pub struct Wait {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: POLL_INTERVAL,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Poll `probe` until it returns `Some`
    ///
    /// Transient probe errors (a lookup or script evaluation failing while
    /// the page navigates) count as "not yet". If the last probe before the
    /// deadline failed, that error is returned instead of a timeout. Other
    /// errors end the wait immediately. The condition is always checked at
    /// least once, and once more after the deadline passes.
    pub async fn until<T, F, Fut>(&self, condition: &str, mut probe: F) -> Result<T, UiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, UiError>>,
    {
        let deadline = Instant::now() + self.timeout;

        loop {
            let last_error = match probe().await {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => None,
                Err(e) if e.is_transient() => {
                    debug!("Ignoring error while waiting for {}: {}", condition, e);
                    Some(e)
                }
                Err(e) => return Err(e),
            };

            let now = Instant::now();
            if now >= deadline {
                return Err(last_error.unwrap_or_else(|| UiError::Timeout {
                    condition: condition.to_string(),
                    secs: self.timeout.as_secs(),
                }));
            }

            trace!("Waiting for {}", condition);
            tokio::time::sleep(self.interval.min(deadline - now)).await;
        }
    }
}

impl Default for Wait {
    fn default() -> Self {
        Self::from_secs(10)
    }
}
