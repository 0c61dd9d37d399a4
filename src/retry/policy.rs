//! Retry Mechanism Module
//!
//! Exponential backoff with additive jitter for LLM API calls.
//!
//! The delay before attempt `k` (`k >= 2`) is
//! `min(initial_delay * 2^(k-2), max_delay)`, plus a jitter term drawn
//! uniformly from `[0, jitter_factor * delay]`. Jitter only ever lengthens a
//! wait.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::{
    DEFAULT_INITIAL_BACKOFF_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF_MS, ProviderConfig,
};
use crate::error::LlmError;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (the first call included)
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_delay: Duration,
    /// Maximum delay between attempts, before jitter
    pub max_delay: Duration,
    /// Whether to add jitter to delays
    pub use_jitter: bool,
    /// Maximum jitter as a fraction of the delay (0.0 to 1.0)
    pub jitter_factor: f64,
    /// Custom retry condition; `None` retries every error
    pub retry_condition: Option<fn(&LlmError) -> bool>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_BACKOFF_MS),
            use_jitter: true,
            jitter_factor: 0.1,
            retry_condition: None,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy from the retry tuning in `config`, defaults for absent fields.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: config.max_attempts.unwrap_or(defaults.max_attempts),
            initial_delay: config
                .initial_backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.initial_delay),
            max_delay: config
                .max_backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.max_delay),
            ..defaults
        }
    }

    /// Set maximum attempts
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set initial delay
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set maximum delay
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enable or disable jitter
    pub const fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    /// Set custom retry condition
    pub fn with_retry_condition(mut self, condition: fn(&LlmError) -> bool) -> Self {
        self.retry_condition = Some(condition);
        self
    }

    /// Attempts actually made; zero is treated as a single attempt.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Check if an error should be retried
    pub fn should_retry(&self, error: &LlmError) -> bool {
        self.retry_condition.is_none_or(|condition| condition(error))
    }

    /// Delay before `attempt` (1-based, `attempt >= 2`), without jitter.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(2).min(31);
        self.initial_delay
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Delay before `attempt` with jitter applied on top.
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay = self.base_delay(attempt);
        if self.use_jitter {
            self.add_jitter(delay)
        } else {
            delay
        }
    }

    fn add_jitter(&self, delay: Duration) -> Duration {
        let jitter_range = delay.as_secs_f64() * self.jitter_factor.clamp(0.0, 1.0);
        if jitter_range <= 0.0 {
            return delay;
        }
        let jitter = rand::thread_rng().gen_range(0.0..=jitter_range);
        delay + Duration::from_secs_f64(jitter)
    }
}

/// Retry executor that handles the actual retry logic
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create a new retry executor
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Get the retry policy
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute a function with retry logic.
    ///
    /// Returns the first success, or the last error once attempts run out
    /// (or as soon as the retry condition rejects an error).
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, LlmError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        let max_attempts = self.policy.attempts();
        let mut attempt = 1;

        loop {
            let error = match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };

            if attempt >= max_attempts || !self.policy.should_retry(&error) {
                return Err(error);
            }

            attempt += 1;
            let delay = self.policy.calculate_delay(attempt);
            tracing::warn!(
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "operation failed, retrying"
            );
            sleep(delay).await;
        }
    }
}

/// Run `operation` under `policy`.
pub async fn with_backoff<F, Fut, T>(operation: F, policy: RetryPolicy) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    RetryExecutor::new(policy).execute(operation).await
}
