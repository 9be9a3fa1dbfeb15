//! Retry utilities with exponential backoff for resilient API calls.

use std::time::Duration;
use tokio::time::sleep;

use crate::sources::SourceError;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts (1 means no retry)
    pub max_attempts: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// A single attempt, no retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Set maximum attempts
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set initial delay
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Backoff delay before retry number `attempt` (1-based)
    fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self.initial_delay.as_secs_f64()
            * self.backoff_multiplier.powf(attempt.saturating_sub(1) as f64);
        Duration::from_secs_f64(exp.min(self.max_delay.as_secs_f64()))
    }
}

/// Transient errors that should trigger a retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientError {
    /// Network connectivity issues
    Network,
    /// Rate limit exceeded (429)
    RateLimit,
    /// Request timeout
    Timeout,
}

impl TransientError {
    /// Check if a SourceError represents a transient error
    pub fn from_source_error(err: &SourceError) -> Option<Self> {
        match err {
            SourceError::Network(_) => Some(TransientError::Network),
            SourceError::RateLimit => Some(TransientError::RateLimit),
            SourceError::Timeout(_) => Some(TransientError::Timeout),
            SourceError::Api(msg) => {
                let msg_lower = msg.to_lowercase();
                if msg_lower.contains("503") || msg_lower.contains("service unavailable") {
                    Some(TransientError::Network)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Minimum delay to wait before retrying this error
    pub fn minimum_delay(&self) -> Duration {
        match self {
            TransientError::RateLimit => Duration::from_secs(1),
            TransientError::Network | TransientError::Timeout => Duration::ZERO,
        }
    }
}

/// Execute an async operation with retry logic
///
/// Transient errors are retried with exponential backoff until
/// `max_attempts` is reached; permanent errors return immediately.
pub async fn with_retry<T, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, SourceError>>,
{
    let mut attempts = 0;

    loop {
        attempts += 1;

        let error = match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    tracing::debug!("Operation succeeded on attempt {}", attempts);
                }
                return Ok(result);
            }
            Err(error) => error,
        };

        let Some(transient) = TransientError::from_source_error(&error) else {
            return Err(error);
        };

        if attempts >= config.max_attempts {
            tracing::warn!("Operation failed after {} attempts: {}", attempts, error);
            return Err(error);
        }

        let delay = std::cmp::max(config.delay_for(attempts), transient.minimum_delay());
        tracing::debug!(
            "Transient error on attempt {}: {:?}, retrying in {:?}",
            attempts,
            transient,
            delay
        );
        sleep(delay).await;
    }
}
