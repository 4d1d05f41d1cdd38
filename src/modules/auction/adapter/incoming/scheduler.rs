use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::{parse_or, ConfigError};
use crate::modules::auction::application::ports::incoming::SettleAuctionsUseCase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub interval: Duration,
    pub batch: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            batch: 50,
        }
    }
}

impl SchedulerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let interval_secs = parse_or(
            "AUCTION_SETTLEMENT_INTERVAL_SECS",
            defaults.interval.as_secs(),
        )?;
        let batch = parse_or("AUCTION_SETTLEMENT_BATCH", defaults.batch)?;

        if interval_secs == 0 || batch == 0 {
            return Err(ConfigError::Invalid {
                key: "AUCTION_SETTLEMENT_INTERVAL_SECS/AUCTION_SETTLEMENT_BATCH".to_string(),
                reason: "must both be greater than zero".to_string(),
            });
        }

        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            batch,
        })
    }
}

/// Runs a settlement pass on every tick until the runtime shuts down.
///
/// A pass that overruns the interval delays the next tick instead of queueing a burst.
pub fn spawn_settlement_scheduler(
    settle: Arc<dyn SettleAuctionsUseCase>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match settle.settle_due().await {
                Ok(report) if report.is_empty() => {}
                Ok(report) => tracing::info!(
                    sold = report.sold,
                    ended = report.ended,
                    skipped = report.skipped,
                    failed = report.failed,
                    "Settlement pass finished"
                ),
                Err(e) => tracing::warn!(error = %e, "Settlement pass failed"),
            }
        }
    })
}
