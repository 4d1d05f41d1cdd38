use actix_web::{get, web, HttpResponse, Responder};
use deadpool_redis::Pool;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::config::AppEnvironment;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
    redis: &'static str,
}

#[derive(Serialize)]
struct ApiHealthResponse {
    status: &'static str,
    database: &'static str,
    environment: String,
}

async fn database_ok(db: &DatabaseConnection) -> bool {
    db.execute(Statement::from_string(db.get_database_backend(), "SELECT 1"))
        .await
        .is_ok()
}

async fn redis_ok(pool: &Pool) -> bool {
    let Ok(mut conn) = pool.get().await else {
        return false;
    };
    deadpool_redis::redis::cmd("PING")
        .query_async::<String>(&mut conn)
        .await
        .is_ok()
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Checks the database and the rate limiter store
#[get("/ready")]
pub async fn readiness(
    db: web::Data<Arc<DatabaseConnection>>,
    redis: web::Data<Arc<Pool>>,
) -> impl Responder {
    let db_status = if database_ok(&db).await { "ok" } else { "unhealthy" };
    let redis_status = if redis_ok(&redis).await { "ok" } else { "unhealthy" };

    if db_status == "ok" && redis_status == "ok" {
        HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            database: db_status,
            redis: redis_status,
        })
    } else {
        HttpResponse::ServiceUnavailable().json(ReadinessResponse {
            status: "unhealthy",
            database: db_status,
            redis: redis_status,
        })
    }
}

#[get("/api/health")]
pub async fn api_health(
    db: web::Data<Arc<DatabaseConnection>>,
    environment: web::Data<AppEnvironment>,
) -> impl Responder {
    let database = if database_ok(&db).await {
        "connected"
    } else {
        "disconnected"
    };

    HttpResponse::Ok().json(ApiHealthResponse {
        status: "OK",
        database,
        environment: environment.to_string(),
    })
}

#[get("/")]
pub async fn service_info() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "AuctionHub API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth",
            "items": "/api/items",
            "bids": "/api/bids",
            "health": "/api/health",
            "docs": "/swagger-ui/"
        }
    }))
}
