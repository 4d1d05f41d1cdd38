pub mod bid_ledger;
pub mod bid_query;

pub use bid_ledger::{
    BidLedger, BidLedgerError, CancelOutcome, CancelledBid, PlacedBid, PlacementOutcome,
    PreviousLeader,
};
pub use bid_query::{
    BidItemSummary, BidQuery, BidQueryError, BidWithBidder, BidWithItem, BidderSummary,
};
