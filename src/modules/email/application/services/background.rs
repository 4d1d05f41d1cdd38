use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Runs `send` on a detached task, retrying with `2^attempt` second backoff.
///
/// The caller never waits; the final failure is only logged.
pub fn send_in_background<F, Fut, E>(kind: &'static str, max_attempts: u32, send: F)
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        for attempt in 1..=max_attempts {
            match send().await {
                Ok(()) => {
                    tracing::debug!(kind, attempt, "Email sent");
                    return;
                }
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(kind, attempt, max_attempts, error = %e, "Email attempt failed, retrying");
                    tokio::time::sleep(Duration::from_secs(2_u64.pow(attempt))).await;
                }
                Err(e) => {
                    tracing::error!(kind, attempts = max_attempts, error = %e, "Giving up on email");
                }
            }
        }
    });
}
