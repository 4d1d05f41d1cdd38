use actix_web::web;
use std::sync::Arc;

use crate::modules::auth::application::auth_use_cases::AuthUseCases;
use crate::modules::auth::application::orchestrator::UserRegistrationOrchestrator;
use crate::modules::auth::application::use_cases::create_user::ICreateUserUseCase;
use crate::modules::auth::application::use_cases::fetch_profile::FetchUserProfileUseCase;
use crate::modules::auth::application::use_cases::login_user::ILoginUserUseCase;
use crate::modules::auth::application::use_cases::resend_verification::IResendVerificationUseCase;
use crate::modules::auth::application::use_cases::verify_user_email::IVerifyUserEmailUseCase;
use crate::modules::bid::application::bid_use_cases::BidUseCases;
use crate::modules::bid::application::ports::incoming::use_cases::PlaceBidUseCase;
use crate::modules::item::application::item_use_cases::ItemUseCases;
use crate::modules::item::application::ports::incoming::use_cases::GetItemUseCase;
use crate::tests::support::stubs::*;
use crate::AppState;

/// Builds `AppState` from stubs; every slot has a default so tests set only what they exercise.
pub struct TestAppStateBuilder {
    create_user: Arc<dyn ICreateUserUseCase>,
    resend_verification: Arc<dyn IResendVerificationUseCase>,
    login: Arc<dyn ILoginUserUseCase>,
    verify_email: Arc<dyn IVerifyUserEmailUseCase>,
    fetch_profile: Arc<dyn FetchUserProfileUseCase>,
    items: StubItems,
    bids: StubBids,
    get_item: Option<Arc<dyn GetItemUseCase>>,
    place_bid: Option<Arc<dyn PlaceBidUseCase>>,
    expose_verification_code: bool,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            create_user: Arc::new(StubCreateUser::succeeding()),
            resend_verification: Arc::new(StubResendVerification::not_found()),
            login: Arc::new(StubLogin::succeeding()),
            verify_email: Arc::new(StubVerifyEmail::succeeding()),
            fetch_profile: Arc::new(StubFetchUserProfile::not_found()),
            items: StubItems::empty(),
            bids: StubBids::accepting(),
            get_item: None,
            place_bid: None,
            expose_verification_code: true,
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_fetch_profile(mut self, uc: Arc<dyn FetchUserProfileUseCase>) -> Self {
        self.fetch_profile = uc;
        self
    }

    pub fn with_registration(
        mut self,
        create: impl ICreateUserUseCase + 'static,
        resend: impl IResendVerificationUseCase + 'static,
    ) -> Self {
        self.create_user = Arc::new(create);
        self.resend_verification = Arc::new(resend);
        self
    }

    pub fn with_login(mut self, uc: impl ILoginUserUseCase + 'static) -> Self {
        self.login = Arc::new(uc);
        self
    }

    pub fn with_verify_email(mut self, uc: impl IVerifyUserEmailUseCase + 'static) -> Self {
        self.verify_email = Arc::new(uc);
        self
    }

    pub fn expose_verification_code(mut self, expose: bool) -> Self {
        self.expose_verification_code = expose;
        self
    }

    pub fn with_items(mut self, items: StubItems) -> Self {
        self.items = items;
        self
    }

    pub fn with_bids(mut self, bids: StubBids) -> Self {
        self.bids = bids;
        self
    }

    /// Replaces the stubbed item lookup, e.g. with a real service over shared state.
    pub fn with_get_item(mut self, uc: Arc<dyn GetItemUseCase>) -> Self {
        self.get_item = Some(uc);
        self
    }

    pub fn with_place_bid(mut self, uc: Arc<dyn PlaceBidUseCase>) -> Self {
        self.place_bid = Some(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let registration = UserRegistrationOrchestrator::new(
            self.create_user,
            self.resend_verification,
            Arc::new(StubUserEmailNotifier),
        );
        let items = Arc::new(self.items);
        let bids = Arc::new(self.bids);

        web::Data::new(AppState {
            auth: AuthUseCases {
                registration: Arc::new(registration),
                login: self.login,
                verify_email: self.verify_email,
                fetch_profile: self.fetch_profile,
            },
            items: ItemUseCases {
                list: items.clone(),
                browse: items.clone(),
                get: self
                    .get_item
                    .unwrap_or_else(|| items.clone() as Arc<dyn GetItemUseCase>),
                create: items.clone(),
                update: items.clone(),
                delete: items,
            },
            bids: BidUseCases {
                place: self
                    .place_bid
                    .unwrap_or_else(|| bids.clone() as Arc<dyn PlaceBidUseCase>),
                cancel: bids.clone(),
                item_bids: bids.clone(),
                user_bids: bids,
            },
            expose_verification_code: self.expose_verification_code,
        })
    }
}
