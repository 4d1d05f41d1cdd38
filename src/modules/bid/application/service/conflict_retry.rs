use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::modules::bid::application::ports::outgoing::BidLedgerError;

pub const MAX_ATTEMPTS: u32 = 3;

/// Re-runs a ledger transaction that lost a race, up to `MAX_ATTEMPTS` in total.
pub async fn retry_on_conflict<T, F, Fut>(
    operation: &'static str,
    mut run: F,
) -> Result<T, BidLedgerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BidLedgerError>>,
{
    let mut attempt = 1;
    loop {
        match run().await {
            Err(BidLedgerError::Conflict(reason)) if attempt < MAX_ATTEMPTS => {
                warn!(operation, attempt, reason = %reason, "Transaction conflicted, retrying");
                tokio::time::sleep(Duration::from_millis(25 * u64::from(attempt))).await;
                attempt += 1;
            }
            Err(BidLedgerError::Conflict(reason)) => {
                warn!(operation, attempts = attempt, reason = %reason, "Transaction kept conflicting");
                return Err(BidLedgerError::Conflict(reason));
            }
            outcome => return outcome,
        }
    }
}
