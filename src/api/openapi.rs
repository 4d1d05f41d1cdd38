use crate::api::schemas::{ErrorResponse, MessageResponse};
use crate::shared::validation::FieldError;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Auth
use crate::modules::auth::adapter::incoming::web::routes::{
    ProfileResponse, ResendVerificationRequestDto, ResendVerificationResponse, SigninRequestDto,
    SigninResponse, SignupRequestDto, SignupResponse, UserProfile, UserSummary,
    VerifyEmailRequestDto, VerifyEmailResponse,
};
// Items
use crate::modules::item::adapter::incoming::web::routes::{
    AppliedFilters, ItemEnvelope, ItemRequestDto, ItemResponse, ItemsPagination, ItemsResponse,
    ListItemsResponse, SellerDto, WinnerDto,
};
use crate::modules::item::application::domain::entities::{Category, Condition, ItemStatus, TimeLeft};
// Bids
use crate::modules::bid::adapter::incoming::web::routes::{
    BidHistoryResponse, BidItemDto, BidResponse, BidderDto, BidsPagination, CancelBidResponse,
    ItemBidResponse, ItemBidsResponse, PlaceBidRequestDto, PlaceBidResponse, UserBidResponse,
    UserBidsResponse, WinningBidsResponse,
};
use crate::modules::bid::application::domain::entities::BidStatus;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AuctionHub API",
        version = "1.0.0",
        description = "Campus marketplace auctions: accounts, listings and bidding",
        contact(
            name = "API Support",
            email = "support@auctionhub.com"
        )
    ),
    paths(
        // Auth endpoints
        crate::modules::auth::adapter::incoming::web::routes::signup_handler,
        crate::modules::auth::adapter::incoming::web::routes::signin_handler,
        crate::modules::auth::adapter::incoming::web::routes::verify_email_handler,
        crate::modules::auth::adapter::incoming::web::routes::resend_verification_handler,
        crate::modules::auth::adapter::incoming::web::routes::profile_handler,

        // Item endpoints
        crate::modules::item::adapter::incoming::web::routes::list_items_handler,
        crate::modules::item::adapter::incoming::web::routes::featured_items_handler,
        crate::modules::item::adapter::incoming::web::routes::ending_soon_items_handler,
        crate::modules::item::adapter::incoming::web::routes::get_item_handler,
        crate::modules::item::adapter::incoming::web::routes::create_item_handler,
        crate::modules::item::adapter::incoming::web::routes::update_item_handler,
        crate::modules::item::adapter::incoming::web::routes::delete_item_handler,

        // Bid endpoints
        crate::modules::bid::adapter::incoming::web::routes::place_bid_handler,
        crate::modules::bid::adapter::incoming::web::routes::item_bids_handler,
        crate::modules::bid::adapter::incoming::web::routes::item_bid_history_handler,
        crate::modules::bid::adapter::incoming::web::routes::user_bids_handler,
        crate::modules::bid::adapter::incoming::web::routes::winning_bids_handler,
        crate::modules::bid::adapter::incoming::web::routes::cancel_bid_handler,
    ),
    components(
        schemas(
            // Response wrappers
            ErrorResponse,
            MessageResponse,
            FieldError,

            // Auth DTOs
            SignupRequestDto,
            SignupResponse,
            SigninRequestDto,
            SigninResponse,
            VerifyEmailRequestDto,
            VerifyEmailResponse,
            ResendVerificationRequestDto,
            ResendVerificationResponse,
            ProfileResponse,
            UserProfile,
            UserSummary,

            // Item DTOs
            ItemRequestDto,
            ItemResponse,
            ItemEnvelope,
            ItemsResponse,
            ListItemsResponse,
            ItemsPagination,
            AppliedFilters,
            SellerDto,
            WinnerDto,
            TimeLeft,
            Category,
            Condition,
            ItemStatus,

            // Bid DTOs
            PlaceBidRequestDto,
            PlaceBidResponse,
            BidResponse,
            BidderDto,
            ItemBidResponse,
            ItemBidsResponse,
            BidHistoryResponse,
            BidsPagination,
            BidItemDto,
            UserBidResponse,
            UserBidsResponse,
            WinningBidsResponse,
            CancelBidResponse,
            BidStatus
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and email verification"),
        (name = "items", description = "Auction listings"),
        (name = "bids", description = "Placing, listing and cancelling bids"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}
