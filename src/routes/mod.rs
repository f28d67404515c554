use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::middleware::{
    PrivateFiles, RateLimiter, private_files_middleware, rate_limit_middleware,
    security_headers_middleware,
};

mod health;
mod inscription;

pub use inscription::ACCEPTED_MESSAGE;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub command: inscription_registration::Command,
    pub query: inscription_registration::Query,
    pub limiter: RateLimiter,
    pub pool: SqlitePool,
}

pub fn router(app_state: AppState) -> Router {
    let site = Router::new()
        .fallback_service(ServeDir::new(&app_state.config.site.root))
        .layer(from_fn_with_state(
            PrivateFiles::new(&app_state.config),
            private_files_middleware,
        ));

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/inscription", post(inscription::register))
        .route("/inscriptions", get(inscription::list))
        .fallback_service(site)
        .layer(from_fn_with_state(
            app_state.limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
