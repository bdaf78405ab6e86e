//! Polling with exponential backoff

use std::time::{Duration, Instant};
use anyhow::Result;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub timeout: Duration,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub exponential_base: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            initial_delay_ms: 200,
            max_delay_ms: 2000,
            exponential_base: 1.5,
        }
    }
}

/// Re-run `operation` until it yields `Some`, an error, or the timeout passes.
///
/// `Ok(None)` means "not ready yet". Errors are returned immediately.
pub async fn poll_until<F, Fut, T>(
    operation: F,
    config: &PollConfig,
    context: &str,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<Option<T>>>,
{
    let started = Instant::now();
    let mut attempt = 0u32;
    let mut delay = config.initial_delay_ms;

    loop {
        attempt += 1;

        if let Some(result) = operation().await? {
            return Ok(result);
        }

        if started.elapsed() >= config.timeout {
            anyhow::bail!("{} not ready after {} attempts ({:?})", context, attempt, config.timeout);
        }

        debug!("{} not ready (attempt {}), polling again in {}ms", context, attempt, delay);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        delay = (delay as f64 * config.exponential_base) as u64;
        delay = delay.min(config.max_delay_ms);
        let jitter = (delay as f64 * 0.1 * rand::random::<f64>()) as u64;
        delay = delay.saturating_add(jitter);
    }
}
