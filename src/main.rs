mod api;
mod config;
pub mod health;
pub mod modules;
mod shared;

use crate::config::{load_dotenv, AppConfig};
use crate::modules::auction::adapter::incoming::{spawn_settlement_scheduler, SchedulerConfig};
use crate::modules::auction::adapter::outgoing::AuctionSettlementPostgres;
use crate::modules::auction::application::ports::incoming::SettleAuctionsUseCase;
use crate::modules::auction::application::service::SettleAuctionsService;
use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::modules::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::modules::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::modules::auth::application::auth_use_cases::AuthUseCases;
use crate::modules::auth::application::orchestrator::UserRegistrationOrchestrator;
use crate::modules::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::auth::application::services::FetchUserProfileService;
use crate::modules::auth::application::use_cases::{
    create_user::CreateUserUseCase, login_user::LoginUserUseCase,
    resend_verification::ResendVerificationUseCase, verify_user_email::VerifyUserEmailUseCase,
};
use crate::modules::bid::adapter::outgoing::{BidLedgerPostgres, BidQueryPostgres};
use crate::modules::bid::application::bid_use_cases::BidUseCases;
use crate::modules::bid::application::service::{BidReadService, CancelBidService, PlaceBidService};
use crate::modules::email::adapter::outgoing::{EmailConfig, SmtpEmailSender};
use crate::modules::email::application::services::EmailNotificationService;
use crate::modules::item::adapter::outgoing::item_query_postgres::ItemQueryPostgres;
use crate::modules::item::adapter::outgoing::item_repository_postgres::ItemRepositoryPostgres;
use crate::modules::item::application::item_use_cases::ItemUseCases;
use crate::modules::item::application::service::{
    CreateItemService, GetItemService, ListItemsService, ManageItemService,
};
use crate::shared::api::response::expose_error_details;
use crate::shared::api::{
    custom_json_config, custom_path_config, custom_query_config, route_not_found,
};
use crate::shared::rate_limit::{rate_limit_middleware, RateLimitConfig, RateLimiter, RedisRateLimiter};

use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config as RedisConfig, Runtime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCases,
    pub items: ItemUseCases,
    pub bids: BidUseCases,
    /// Echo verification codes in auth responses, for local development without a mailbox.
    pub expose_verification_code: bool,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // rediss:// connections need a process-wide rustls provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = AppConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    let rate_limit_config = RateLimitConfig::from_env()?;
    let scheduler_config = SchedulerConfig::from_env()?;
    let email_config = EmailConfig::from_env(config.environment)?;
    let password_hasher = Argon2Hasher::from_env()?;

    info!(environment = %config.environment, "Starting AuctionHub API");
    expose_error_details(config.environment.is_development());

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.database_max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&conn, None)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations applied");
    }

    let db_arc = Arc::new(conn);

    // Redis connection
    let redis_pool = RedisConfig::from_url(&config.redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .context("Failed to create Redis pool")?;
    let redis_arc = Arc::new(redis_pool);

    // Email
    let smtp_sender = SmtpEmailSender::from_config(&email_config)?;
    let notifications = Arc::new(EmailNotificationService::new(Arc::new(smtp_sender)));

    // Auth
    let jwt_service = JwtTokenService::new(jwt_config);
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let password_hasher = Arc::new(password_hasher);

    let create_user = CreateUserUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        password_hasher.clone(),
        Arc::new(jwt_service.clone()),
    );
    let resend_verification = ResendVerificationUseCase::new(user_query.clone(), user_repo.clone());
    let registration = UserRegistrationOrchestrator::new(
        Arc::new(create_user),
        Arc::new(resend_verification),
        notifications.clone(),
    );

    let auth = AuthUseCases {
        registration: Arc::new(registration),
        login: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            password_hasher,
            Arc::new(jwt_service.clone()),
        )),
        verify_email: Arc::new(VerifyUserEmailUseCase::new(
            user_query.clone(),
            user_repo,
            Arc::new(jwt_service.clone()),
        )),
        fetch_profile: Arc::new(FetchUserProfileService::new(user_query)),
    };

    // Items
    let item_query = ItemQueryPostgres::new(Arc::clone(&db_arc));
    let item_repo = ItemRepositoryPostgres::new(Arc::clone(&db_arc));
    let list_items = Arc::new(ListItemsService::new(item_query.clone()));
    let manage_items = Arc::new(ManageItemService::new(item_query.clone(), item_repo.clone()));

    let items = ItemUseCases {
        list: list_items.clone(),
        browse: list_items,
        get: Arc::new(GetItemService::new(item_query.clone(), item_repo.clone())),
        create: Arc::new(CreateItemService::new(item_query, item_repo)),
        update: manage_items.clone(),
        delete: manage_items,
    };

    // Bids
    let bid_ledger = BidLedgerPostgres::new(Arc::clone(&db_arc));
    let bid_reads = Arc::new(BidReadService::new(BidQueryPostgres::new(Arc::clone(&db_arc))));

    let bids = BidUseCases {
        place: Arc::new(PlaceBidService::new(bid_ledger.clone(), notifications.clone())),
        cancel: Arc::new(CancelBidService::new(bid_ledger)),
        item_bids: bid_reads.clone(),
        user_bids: bid_reads,
    };

    // Auction settlement
    let settlement: Arc<dyn SettleAuctionsUseCase> = Arc::new(SettleAuctionsService::new(
        AuctionSettlementPostgres::new(Arc::clone(&db_arc)),
        notifications,
        scheduler_config.batch,
    ));
    spawn_settlement_scheduler(settlement, scheduler_config.interval);
    info!(
        interval_secs = scheduler_config.interval.as_secs(),
        batch = scheduler_config.batch,
        "Auction settlement scheduler started"
    );

    let state = web::Data::new(AppState {
        auth,
        items,
        bids,
        expose_verification_code: config.expose_verification_code,
    });

    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let rate_limiter: Arc<dyn RateLimiter + Send + Sync> =
        Arc::new(RedisRateLimiter::new(Arc::clone(&redis_arc), rate_limit_config));
    let environment = config.environment;
    let server_url = config.server_url();
    let openapi = api::openapi::ApiDoc::openapi();

    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&rate_limiter)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(web::Data::new(environment))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(custom_path_config())
            .configure(init_routes)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()))
            .default_service(web::route().to(route_not_found))
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health)
        .service(crate::health::readiness)
        .service(crate::health::api_health)
        .service(crate::health::service_info);
    // Auth, throttled per client
    cfg.service(
        web::scope("/api/auth")
            .wrap(from_fn(rate_limit_middleware))
            .configure(crate::modules::auth::adapter::incoming::web::routes::configure),
    );
    // Items
    cfg.service(
        web::scope("/api/items")
            .configure(crate::modules::item::adapter::incoming::web::routes::configure),
    );
    // Bids
    cfg.service(
        web::scope("/api/bids")
            .configure(crate::modules::bid::adapter::incoming::web::routes::configure),
    );
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
        std::process::exit(1);
    }
}
