//! Bounded retry with a fixed or exponential delay schedule.
//!
//! [`RetryPolicy::run`] wraps any fallible async operation, applies a
//! per-attempt timeout, and retries errors that report themselves as
//! transient through [`Retriable`]. Non-retriable errors are returned
//! immediately.

use std::future::Future;
use std::time::Duration;

/// Classification hook for errors passed through [`RetryPolicy::run`].
pub trait Retriable: std::fmt::Display {
    /// Returns `true` for errors worth another attempt after a delay.
    fn is_retriable(&self) -> bool;

    /// The error recorded when an attempt exceeds the policy timeout.
    fn timed_out(after: Duration) -> Self;
}

/// Attempt budget and delay schedule shared by search paging, content
/// extraction, and analysis calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Always at least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub delay: Duration,
    /// Multiplier applied to `delay` for each later attempt. `1` is a fixed delay.
    pub backoff_factor: u32,
    /// Adds up to 25 % random jitter to each delay.
    pub jitter: bool,
    /// Per-attempt timeout; `None` relies on the caller's own timeouts.
    pub timeout: Option<Duration>,
}

impl RetryPolicy {
    /// Fixed-delay policy without jitter.
    #[must_use]
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff_factor: 1,
            jitter: false,
            timeout: None,
        }
    }

    /// Exponential policy (`delay * 2^(n-1)`, capped at 60 s) with jitter.
    #[must_use]
    pub fn exponential(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay: base_delay,
            backoff_factor: 2,
            jitter: true,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Delay to wait after `attempt` (1-based) failed.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        const MAX_DELAY: Duration = Duration::from_secs(60);
        let exponent = attempt.saturating_sub(1).min(10);
        let factor = self.backoff_factor.max(1).saturating_pow(exponent);
        let computed = self.delay.saturating_mul(factor).min(MAX_DELAY);
        if self.jitter && !computed.is_zero() {
            let spread: f64 = rand::random::<f64>() * 0.25;
            computed + computed.mul_f64(spread)
        } else {
            computed
        }
    }

    /// Sleep for the delay that follows `attempt`. Used by loops that own
    /// their own iteration but share this schedule.
    pub async fn pause(&self, attempt: u32) {
        let delay = self.delay_after(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Runs `operation` until it succeeds, fails with a non-retriable error,
    /// or the attempt budget is spent. The last error is returned.
    ///
    /// # Errors
    ///
    /// Returns the operation's error (or its timeout error) once retries are
    /// exhausted or the error is not retriable.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        E: Retriable,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let result = match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, operation()).await {
                    Ok(inner) => inner,
                    Err(_) => Err(E::timed_out(limit)),
                },
                None => operation().await,
            };

            match result {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !err.is_retriable() {
                        tracing::debug!(label, attempt, error = %err, "non-retriable error");
                        return Err(err);
                    }
                    if attempt >= max_attempts {
                        tracing::warn!(
                            label,
                            attempt,
                            max_attempts,
                            error = %err,
                            "retry budget exhausted"
                        );
                        return Err(err);
                    }
                    let delay = self.delay_after(attempt);
                    tracing::warn!(
                        label,
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "transient error, retrying after delay"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }
}
