//! Hand-written use-case doubles for handler tests, and recording notifiers.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{sample_user, User};
use crate::modules::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserOutput, ICreateUserUseCase, SignupRequest,
};
use crate::modules::auth::application::use_cases::fetch_profile::{
    FetchUserError, FetchUserProfileUseCase,
};
use crate::modules::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginOutput, LoginRequest,
};
use crate::modules::auth::application::use_cases::resend_verification::{
    IResendVerificationUseCase, ResendVerificationError, ResendVerificationOutput,
};
use crate::modules::auth::application::use_cases::verify_user_email::{
    IVerifyUserEmailUseCase, VerifyEmailOutput, VerifyEmailRequest, VerifyUserEmailError,
};
use crate::modules::bid::application::domain::entities::{sample_bid, BidParty};
use crate::modules::bid::application::domain::rules::{CancelRejection, PlaceBid, PlacementRejection};
use crate::modules::bid::application::ports::incoming::use_cases::{
    CancelBidError, CancelBidUseCase, ItemBidHistory, ItemBids, ItemBidsUseCase, PlaceBidError,
    PlaceBidUseCase, ReadBidsError, UserBids, UserBidsUseCase,
};
use crate::modules::bid::application::ports::outgoing::bid_query::summary_of;
use crate::modules::bid::application::ports::outgoing::{
    BidWithBidder, BidWithItem, BidderSummary, CancelledBid, PlacedBid,
};
use crate::modules::email::application::ports::outgoing::{
    AuctionEmailNotifier, AuctionWonEmail, BidConfirmationEmail, OutbidEmail,
    UserEmailNotificationError, UserEmailNotifier, VerificationEmail,
};
use crate::modules::item::application::domain::entities::sample_item;
use crate::modules::item::application::domain::validation::{ItemChanges, ItemDraft};
use crate::modules::item::application::ports::incoming::use_cases::{
    BrowseItemsUseCase, CreateItemError, CreateItemUseCase, DeleteItemUseCase, GetItemError,
    GetItemUseCase, ListItemsError, ListItemsRequest, ListItemsUseCase, ManageItemError,
    UpdateItemUseCase,
};
use crate::modules::item::application::ports::outgoing::item_query::view_of;
use crate::modules::item::application::ports::outgoing::ItemView;
use crate::shared::api::{PageRequest, PageResult};

const TEST_TOKEN: &str = "test.jwt.token";

// ============================================================================
// Auth
// ============================================================================

pub struct StubFetchUserProfile {
    user: Option<User>,
}

impl StubFetchUserProfile {
    pub fn not_found() -> Self {
        Self { user: None }
    }

    pub fn returning(user: User) -> Self {
        Self { user: Some(user) }
    }
}

#[async_trait]
impl FetchUserProfileUseCase for StubFetchUserProfile {
    async fn execute(&self, user_id: Uuid) -> Result<User, FetchUserError> {
        match &self.user {
            Some(user) if user.id == user_id => Ok(user.clone()),
            _ => Err(FetchUserError::UserNotFound(user_id)),
        }
    }
}

fn campus_user() -> User {
    let mut user = sample_user();
    user.email = "jane@campus.edu".to_string();
    user
}

pub struct StubCreateUser {
    result: Result<CreateUserOutput, CreateUserError>,
}

impl StubCreateUser {
    /// A fresh unverified account with code `123456`.
    pub fn succeeding() -> Self {
        Self {
            result: Ok(CreateUserOutput {
                user: campus_user(),
                token: TEST_TOKEN.to_string(),
                verification_code: "123456".to_string(),
            }),
        }
    }

    pub fn failing(err: CreateUserError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl ICreateUserUseCase for StubCreateUser {
    async fn execute(&self, _: SignupRequest) -> Result<CreateUserOutput, CreateUserError> {
        self.result.clone()
    }
}

pub struct StubResendVerification {
    result: Result<ResendVerificationOutput, ResendVerificationError>,
}

impl StubResendVerification {
    /// Re-issues code `654321`.
    pub fn succeeding() -> Self {
        Self {
            result: Ok(ResendVerificationOutput {
                user: campus_user(),
                verification_code: "654321".to_string(),
            }),
        }
    }

    pub fn not_found() -> Self {
        Self::failing(ResendVerificationError::UserNotFound)
    }

    pub fn failing(err: ResendVerificationError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl IResendVerificationUseCase for StubResendVerification {
    async fn execute(&self, _: &str) -> Result<ResendVerificationOutput, ResendVerificationError> {
        self.result.clone()
    }
}

pub struct StubLogin {
    result: Result<LoginOutput, LoginError>,
}

impl StubLogin {
    pub fn succeeding() -> Self {
        Self {
            result: Ok(LoginOutput {
                user: campus_user(),
                token: TEST_TOKEN.to_string(),
            }),
        }
    }

    pub fn failing(err: LoginError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl ILoginUserUseCase for StubLogin {
    async fn execute(&self, _: LoginRequest) -> Result<LoginOutput, LoginError> {
        self.result.clone()
    }
}

pub struct StubVerifyEmail {
    result: Result<VerifyEmailOutput, VerifyUserEmailError>,
}

impl StubVerifyEmail {
    pub fn succeeding() -> Self {
        let mut user = campus_user();
        user.is_email_verified = true;
        user.email_verification_code = None;
        user.email_verification_expires = None;
        Self {
            result: Ok(VerifyEmailOutput {
                user,
                token: TEST_TOKEN.to_string(),
            }),
        }
    }

    pub fn failing(err: VerifyUserEmailError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl IVerifyUserEmailUseCase for StubVerifyEmail {
    async fn execute(
        &self,
        _: VerifyEmailRequest,
    ) -> Result<VerifyEmailOutput, VerifyUserEmailError> {
        self.result.clone()
    }
}

pub struct StubUserEmailNotifier;

#[async_trait]
impl UserEmailNotifier for StubUserEmailNotifier {
    async fn send_verification_email(
        &self,
        _: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError> {
        Ok(())
    }
}

// ============================================================================
// Items
// ============================================================================

/// Serves every item use case from one optional listing.
#[derive(Clone)]
pub struct StubItems {
    views: Vec<ItemView>,
    total: Option<u64>,
    manage_error: Option<ManageItemError>,
    unavailable: bool,
}

impl StubItems {
    pub fn with_item(view: ItemView) -> Self {
        Self {
            views: vec![view],
            ..Self::empty()
        }
    }

    pub fn empty() -> Self {
        Self {
            views: Vec::new(),
            total: None,
            manage_error: None,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::empty()
        }
    }

    pub fn failing_manage(err: ManageItemError) -> Self {
        Self {
            manage_error: Some(err),
            ..Self::empty()
        }
    }

    /// Reported match count, independent of the items on the page.
    pub fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    fn outage() -> String {
        "pool timed out".to_string()
    }
}

#[async_trait]
impl ListItemsUseCase for StubItems {
    async fn execute(&self, request: ListItemsRequest) -> Result<PageResult<ItemView>, ListItemsError> {
        if self.unavailable {
            return Err(ListItemsError::Unavailable(Self::outage()));
        }
        Ok(PageResult {
            items: self.views.clone(),
            page: request.page.page,
            per_page: request.page.per_page,
            total: self.total.unwrap_or(self.views.len() as u64),
        })
    }
}

#[async_trait]
impl BrowseItemsUseCase for StubItems {
    async fn featured(&self) -> Result<Vec<ItemView>, ListItemsError> {
        if self.unavailable {
            return Err(ListItemsError::Unavailable(Self::outage()));
        }
        Ok(self.views.clone())
    }

    async fn ending_soon(&self) -> Result<Vec<ItemView>, ListItemsError> {
        if self.unavailable {
            return Err(ListItemsError::Unavailable(Self::outage()));
        }
        Ok(self.views.clone())
    }
}

#[async_trait]
impl GetItemUseCase for StubItems {
    async fn execute(&self, item_id: Uuid) -> Result<ItemView, GetItemError> {
        if self.unavailable {
            return Err(GetItemError::Unavailable(Self::outage()));
        }
        self.views
            .iter()
            .find(|view| view.item.id == item_id)
            .cloned()
            .ok_or(GetItemError::NotFound)
    }
}

#[async_trait]
impl CreateItemUseCase for StubItems {
    async fn execute(&self, seller_id: Uuid, draft: ItemDraft) -> Result<ItemView, CreateItemError> {
        if self.unavailable {
            return Err(CreateItemError::Unavailable(Self::outage()));
        }
        let mut item = sample_item(seller_id);
        item.name = draft.name;
        item.description = draft.description;
        item.category = draft.category;
        item.starting_price_cents = draft.starting_price_cents;
        item.current_bid_cents = draft.starting_price_cents;
        item.auction_end_date = draft.auction_end_date;
        item.photo = draft.photo;
        item.condition = draft.condition;
        item.location = draft.location;
        item.min_bid_increment_cents = draft.min_bid_increment_cents;
        Ok(view_of(item))
    }
}

#[async_trait]
impl UpdateItemUseCase for StubItems {
    async fn execute(
        &self,
        _caller_id: Uuid,
        item_id: Uuid,
        changes: ItemChanges,
    ) -> Result<ItemView, ManageItemError> {
        if self.unavailable {
            return Err(ManageItemError::Unavailable(Self::outage()));
        }
        if let Some(err) = &self.manage_error {
            return Err(err.clone());
        }
        let mut view = self
            .views
            .iter()
            .find(|view| view.item.id == item_id)
            .cloned()
            .ok_or(ManageItemError::NotFound)?;
        if let Some(name) = changes.name {
            view.item.name = name;
        }
        if let Some(location) = changes.location {
            view.item.location = location;
        }
        Ok(view)
    }
}

#[async_trait]
impl DeleteItemUseCase for StubItems {
    async fn execute(&self, _caller_id: Uuid, _item_id: Uuid) -> Result<(), ManageItemError> {
        if self.unavailable {
            return Err(ManageItemError::Unavailable(Self::outage()));
        }
        match &self.manage_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Bids
// ============================================================================

/// Canned bid outcomes. Reads describe one open item bid by Jane Doe,
/// plus one bid on an ended auction in the user listing.
#[derive(Clone)]
pub struct StubBids {
    placement: Result<(), PlaceBidError>,
    cancellation: Result<(), CancelBidError>,
    read_error: Option<ReadBidsError>,
    total: u64,
}

impl StubBids {
    pub fn accepting() -> Self {
        Self {
            placement: Ok(()),
            cancellation: Ok(()),
            read_error: None,
            total: 1,
        }
    }

    pub fn rejecting_placement(rejection: PlacementRejection) -> Self {
        Self {
            placement: Err(PlaceBidError::Rejected(rejection)),
            ..Self::accepting()
        }
    }

    pub fn rejecting_cancel(rejection: CancelRejection) -> Self {
        Self {
            cancellation: Err(CancelBidError::Rejected(rejection)),
            ..Self::accepting()
        }
    }

    pub fn conflicting() -> Self {
        Self {
            placement: Err(PlaceBidError::Conflict),
            cancellation: Err(CancelBidError::Conflict),
            ..Self::accepting()
        }
    }

    pub fn failing_reads(err: ReadBidsError) -> Self {
        Self {
            read_error: Some(err),
            ..Self::accepting()
        }
    }

    pub fn total(mut self, total: u64) -> Self {
        self.total = total;
        self
    }

    fn check_reads(&self) -> Result<(), ReadBidsError> {
        match &self.read_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn bidder_row(item_id: Uuid) -> BidWithBidder {
        let bidder = sample_user();
        BidWithBidder {
            bid: sample_bid(item_id, bidder.id, 2_100),
            bidder: BidderSummary {
                id: bidder.id,
                name: bidder.name,
                profile_image: bidder.profile_image,
            },
        }
    }

    fn user_row(bidder_id: Uuid, ended: bool, with_seller: bool) -> BidWithItem {
        let mut item = sample_item(Uuid::new_v4());
        if ended {
            item.auction_end_date = Utc::now() - chrono::Duration::hours(1);
        }
        let seller = with_seller.then(|| BidderSummary {
            id: item.seller_id,
            name: "Sam Seller".to_string(),
            profile_image: "https://via.placeholder.com/100x100?text=User".to_string(),
        });
        BidWithItem {
            bid: sample_bid(item.id, bidder_id, 2_100),
            item: summary_of(&item),
            seller,
        }
    }
}

#[async_trait]
impl PlaceBidUseCase for StubBids {
    async fn execute(&self, bidder_id: Uuid, request: PlaceBid) -> Result<PlacedBid, PlaceBidError> {
        self.placement.clone()?;

        let mut item = sample_item(Uuid::new_v4());
        item.id = request.item_id;
        item.current_bid_cents = request.amount_cents;
        item.bid_count = 1;
        let bidder = sample_user();
        Ok(PlacedBid {
            bid: sample_bid(request.item_id, bidder_id, request.amount_cents),
            item,
            bidder: BidParty {
                id: bidder_id,
                name: bidder.name,
                email: bidder.email,
                profile_image: bidder.profile_image,
            },
            previous_leader: None,
        })
    }
}

#[async_trait]
impl CancelBidUseCase for StubBids {
    async fn execute(&self, _caller_id: Uuid, _bid_id: Uuid) -> Result<CancelledBid, CancelBidError> {
        self.cancellation.clone()?;
        Ok(CancelledBid {
            item_id: Uuid::new_v4(),
            new_current_bid_cents: 2_000,
            new_bid_count: 0,
        })
    }
}

#[async_trait]
impl ItemBidsUseCase for StubBids {
    async fn list(
        &self,
        item_id: Uuid,
        page: PageRequest,
    ) -> Result<ItemBids, ReadBidsError> {
        self.check_reads()?;
        let mut item = sample_item(Uuid::new_v4());
        item.id = item_id;
        Ok(ItemBids {
            item: summary_of(&item),
            bids: PageResult {
                items: vec![Self::bidder_row(item_id)],
                page: page.page,
                per_page: page.per_page,
                total: self.total,
            },
        })
    }

    async fn history(&self, item_id: Uuid, _limit: u32) -> Result<ItemBidHistory, ReadBidsError> {
        self.check_reads()?;
        let mut item = sample_item(Uuid::new_v4());
        item.id = item_id;
        Ok(ItemBidHistory {
            item: summary_of(&item),
            bids: vec![Self::bidder_row(item_id)],
            total_bids: self.total,
        })
    }
}

#[async_trait]
impl UserBidsUseCase for StubBids {
    async fn all(&self, _caller_id: Uuid, user_id: Uuid) -> Result<UserBids, ReadBidsError> {
        self.check_reads()?;
        Ok(UserBids {
            user_name: sample_user().name,
            active: vec![Self::user_row(user_id, false, false)],
            past: vec![Self::user_row(user_id, true, false)],
        })
    }

    async fn winning(&self, _caller_id: Uuid, user_id: Uuid) -> Result<Vec<BidWithItem>, ReadBidsError> {
        self.check_reads()?;
        Ok(vec![Self::user_row(user_id, false, true)])
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Keeps every auction email it is asked to send.
#[derive(Default)]
pub struct RecordingAuctionNotifier {
    confirmations: Mutex<Vec<BidConfirmationEmail>>,
    outbid: Mutex<Vec<OutbidEmail>>,
    won: Mutex<Vec<AuctionWonEmail>>,
    sent: Notify,
}

impl RecordingAuctionNotifier {
    pub fn confirmations(&self) -> Vec<BidConfirmationEmail> {
        self.confirmations.lock().unwrap().clone()
    }

    pub fn outbid(&self) -> Vec<OutbidEmail> {
        self.outbid.lock().unwrap().clone()
    }

    pub fn won(&self) -> Vec<AuctionWonEmail> {
        self.won.lock().unwrap().clone()
    }

    fn count(&self) -> usize {
        self.confirmations.lock().unwrap().len()
            + self.outbid.lock().unwrap().len()
            + self.won.lock().unwrap().len()
    }

    /// Waits until at least `count` emails of any kind were recorded.
    pub async fn wait_for(&self, count: usize, timeout: Duration) {
        let deadline = tokio::time::Instant::now() + timeout;
        while self.count() < count {
            if tokio::time::timeout_at(deadline, self.sent.notified())
                .await
                .is_err()
            {
                panic!("expected {count} emails, got {}", self.count());
            }
        }
    }
}

#[async_trait]
impl AuctionEmailNotifier for RecordingAuctionNotifier {
    async fn send_bid_confirmation(
        &self,
        message: BidConfirmationEmail,
    ) -> Result<(), UserEmailNotificationError> {
        self.confirmations.lock().unwrap().push(message);
        self.sent.notify_one();
        Ok(())
    }

    async fn send_outbid_notice(&self, message: OutbidEmail) -> Result<(), UserEmailNotificationError> {
        self.outbid.lock().unwrap().push(message);
        self.sent.notify_one();
        Ok(())
    }

    async fn send_auction_won(
        &self,
        message: AuctionWonEmail,
    ) -> Result<(), UserEmailNotificationError> {
        self.won.lock().unwrap().push(message);
        self.sent.notify_one();
        Ok(())
    }
}
