use async_trait::async_trait;

use crate::modules::auction::application::ports::outgoing::SettlementStoreError;

/// Tally of one settlement pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SettlementReport {
    pub sold: usize,
    pub ended: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SettlementReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SettleAuctionsError {
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<SettlementStoreError> for SettleAuctionsError {
    fn from(err: SettlementStoreError) -> Self {
        match err {
            SettlementStoreError::Unavailable(msg) => SettleAuctionsError::Unavailable(msg),
            SettlementStoreError::DatabaseError(msg) => SettleAuctionsError::RepositoryError(msg),
        }
    }
}

#[async_trait]
pub trait SettleAuctionsUseCase: Send + Sync {
    /// Settles one batch of due auctions. Only the due-item lookup can fail the pass.
    async fn settle_due(&self) -> Result<SettlementReport, SettleAuctionsError>;
}
