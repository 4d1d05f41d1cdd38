//! A `BidLedger` over process memory. One mutex stands in for the item row lock,
//! and the same domain rules run under it as in the Postgres ledger. It also reads
//! the catalogue back through `ItemQuery`, so bid effects can be observed the way
//! the item routes see them.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::modules::bid::application::domain::entities::{Bid, BidParty, BidStatus};
use crate::modules::bid::application::domain::rules::{
    check_cancellation, check_placement, successor, CancelRejection, PlaceBid, PlacementRejection,
};
use crate::modules::bid::application::ports::outgoing::{
    BidLedger, BidLedgerError, CancelOutcome, CancelledBid, PlacedBid, PlacementOutcome,
    PreviousLeader,
};
use crate::modules::item::application::domain::entities::Item;
use crate::modules::item::application::ports::outgoing::item_query::{
    ItemListFilter, ItemQuery, ItemQueryError, ItemSort, ItemView, SellerSummary, WinnerSummary,
};
use crate::shared::api::{PageRequest, PageResult};

#[derive(Default)]
struct LedgerState {
    items: HashMap<Uuid, Item>,
    users: HashMap<Uuid, BidParty>,
    bids: Vec<Bid>,
    successful_bids: HashMap<Uuid, i32>,
}

#[derive(Clone, Default)]
pub struct InMemoryBidLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl InMemoryBidLedger {
    pub async fn add_user(&self, user: BidParty) {
        self.state.lock().await.users.insert(user.id, user);
    }

    pub async fn add_item(&self, item: Item) {
        self.state.lock().await.items.insert(item.id, item);
    }

    pub async fn item(&self, item_id: Uuid) -> Option<Item> {
        self.state.lock().await.items.get(&item_id).cloned()
    }

    pub async fn active_bids(&self, item_id: Uuid) -> Vec<Bid> {
        self.state
            .lock()
            .await
            .bids
            .iter()
            .filter(|b| b.item_id == item_id && b.status == BidStatus::Active)
            .cloned()
            .collect()
    }

    pub async fn successful_bids(&self, user_id: Uuid) -> i32 {
        self.state
            .lock()
            .await
            .successful_bids
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }

    /// Moves a bid's placement time into the past.
    pub async fn age_bid(&self, bid_id: Uuid, by: Duration) {
        let mut state = self.state.lock().await;
        if let Some(bid) = state.bids.iter_mut().find(|b| b.id == bid_id) {
            bid.created_at -= by;
        }
    }
}

#[async_trait]
impl BidLedger for InMemoryBidLedger {
    async fn place(
        &self,
        bidder_id: Uuid,
        request: PlaceBid,
        now: DateTime<Utc>,
    ) -> Result<PlacementOutcome, BidLedgerError> {
        let mut state = self.state.lock().await;

        let Some(item) = state.items.get(&request.item_id).cloned() else {
            return Ok(PlacementOutcome::Rejected(PlacementRejection::ItemNotFound));
        };
        let bidder = state.users.get(&bidder_id).cloned();
        if let Err(rejection) =
            check_placement(&item, bidder.is_some(), bidder_id, request.amount_cents, now)
        {
            return Ok(PlacementOutcome::Rejected(rejection));
        }
        let Some(bidder) = bidder else {
            return Ok(PlacementOutcome::Rejected(PlacementRejection::BidderNotFound));
        };

        let mut previous_leader = None;
        let mut first_on_item = true;
        for bid in state.bids.iter_mut().filter(|b| b.item_id == item.id) {
            if bid.bidder_id == bidder_id {
                first_on_item = false;
            }
            if bid.status == BidStatus::Active {
                bid.status = BidStatus::Outbid;
                bid.updated_at = now;
                previous_leader = Some((bid.bidder_id, bid.amount_cents));
            }
        }
        let previous_leader = previous_leader.and_then(|(id, amount_cents)| {
            state.users.get(&id).map(|party| PreviousLeader {
                party: party.clone(),
                amount_cents,
            })
        });

        let bid = Bid {
            id: Uuid::new_v4(),
            item_id: item.id,
            bidder_id,
            amount_cents: request.amount_cents,
            status: BidStatus::Active,
            created_at: now,
            updated_at: now,
        };
        state.bids.push(bid.clone());

        let item = match state.items.get_mut(&item.id) {
            Some(stored) => {
                stored.current_bid_cents = request.amount_cents;
                stored.bid_count += 1;
                stored.updated_at = now;
                stored.clone()
            }
            None => return Ok(PlacementOutcome::Rejected(PlacementRejection::ItemNotFound)),
        };

        if first_on_item {
            *state.successful_bids.entry(bidder_id).or_insert(0) += 1;
        }

        Ok(PlacementOutcome::Placed(PlacedBid {
            bid,
            item,
            bidder,
            previous_leader,
        }))
    }

    async fn cancel(
        &self,
        caller_id: Uuid,
        bid_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<CancelOutcome, BidLedgerError> {
        let mut state = self.state.lock().await;

        let Some(bid) = state.bids.iter().find(|b| b.id == bid_id).cloned() else {
            return Ok(CancelOutcome::Rejected(CancelRejection::BidNotFound));
        };
        if let Err(rejection) = check_cancellation(&bid, caller_id, now) {
            return Ok(CancelOutcome::Rejected(rejection));
        }

        state.bids.retain(|b| b.id != bid_id);
        let others: Vec<Bid> = state
            .bids
            .iter()
            .filter(|b| b.item_id == bid.item_id)
            .cloned()
            .collect();
        let next = successor(&bid, &others).map(|b| (b.id, b.amount_cents));

        if let Some((next_id, _)) = next {
            if let Some(promoted) = state.bids.iter_mut().find(|b| b.id == next_id) {
                promoted.status = BidStatus::Active;
                promoted.updated_at = now;
            }
        }

        let Some(item) = state.items.get_mut(&bid.item_id) else {
            return Ok(CancelOutcome::Rejected(CancelRejection::BidNotFound));
        };
        item.current_bid_cents = next.map_or(item.starting_price_cents, |(_, amount)| amount);
        item.bid_count = (item.bid_count - 1).max(0);
        item.updated_at = now;

        Ok(CancelOutcome::Cancelled(CancelledBid {
            item_id: item.id,
            new_current_bid_cents: item.current_bid_cents,
            new_bid_count: item.bid_count,
        }))
    }
}

impl LedgerState {
    /// Inner join on the seller, like the Postgres read model. Ratings are not tracked here.
    fn view(&self, item: &Item) -> Option<ItemView> {
        let seller = self.users.get(&item.seller_id)?;
        let winner = item
            .winner_id
            .and_then(|id| self.users.get(&id))
            .map(|w| WinnerSummary {
                id: w.id,
                name: w.name.clone(),
            });
        Some(ItemView {
            item: item.clone(),
            seller: SellerSummary {
                id: seller.id,
                name: seller.name.clone(),
                profile_image: seller.profile_image.clone(),
                rating: 0.0,
                member_since: item.created_at,
            },
            winner,
        })
    }

    fn biddable(&self, now: DateTime<Utc>) -> Vec<&Item> {
        self.items.values().filter(|i| i.is_biddable(now)).collect()
    }
}

#[async_trait]
impl ItemQuery for InMemoryBidLedger {
    async fn list_biddable(
        &self,
        filter: ItemListFilter,
        sort: ItemSort,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<PageResult<ItemView>, ItemQueryError> {
        let state = self.state.lock().await;
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut items: Vec<&Item> = state
            .biddable(now)
            .into_iter()
            .filter(|i| filter.category.map_or(true, |c| c == i.category))
            .filter(|i| {
                needle.as_ref().map_or(true, |n| {
                    i.name.to_lowercase().contains(n) || i.description.to_lowercase().contains(n)
                })
            })
            .collect();

        match sort {
            ItemSort::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ItemSort::Oldest => items.sort_by_key(|i| i.created_at),
            ItemSort::PriceLow => items.sort_by_key(|i| i.current_bid_cents),
            ItemSort::PriceHigh => items.sort_by(|a, b| b.current_bid_cents.cmp(&a.current_bid_cents)),
            ItemSort::EndingSoon => items.sort_by_key(|i| i.auction_end_date),
            ItemSort::MostBids => items.sort_by(|a, b| b.bid_count.cmp(&a.bid_count)),
        }

        let total = items.len() as u64;
        let views = items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .filter_map(|i| state.view(i))
            .collect();

        Ok(PageResult {
            items: views,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn find_view(&self, item_id: Uuid) -> Result<Option<ItemView>, ItemQueryError> {
        let state = self.state.lock().await;
        Ok(state.items.get(&item_id).and_then(|item| state.view(item)))
    }

    async fn featured(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<ItemView>, ItemQueryError> {
        let state = self.state.lock().await;
        let mut items: Vec<&Item> = state
            .biddable(now)
            .into_iter()
            .filter(|i| i.is_featured)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items
            .into_iter()
            .take(limit as usize)
            .filter_map(|i| state.view(i))
            .collect())
    }

    async fn ending_soon(
        &self,
        now: DateTime<Utc>,
        window: Duration,
        limit: u64,
    ) -> Result<Vec<ItemView>, ItemQueryError> {
        let state = self.state.lock().await;
        let mut items: Vec<&Item> = state
            .biddable(now)
            .into_iter()
            .filter(|i| i.auction_end_date <= now + window)
            .collect();
        items.sort_by_key(|i| i.auction_end_date);
        Ok(items
            .into_iter()
            .take(limit as usize)
            .filter_map(|i| state.view(i))
            .collect())
    }
}
