pub mod announcements;
pub mod health;
pub mod metrics;

use axum::{
    routing::{get, put},
    Router,
};

use crate::{middleware::auth::JwtSecret, AppState};

/// API routes with the JWT secret wired in; transport layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    let jwt_secret = JwtSecret(state.config.jwt_secret.clone());

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .route(
            "/api/announcements",
            get(announcements::list_active).post(announcements::create_announcement),
        )
        .route("/api/announcements/all", get(announcements::list_all))
        .route(
            "/api/announcements/{id}",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .layer(axum::Extension(jwt_secret))
        .with_state(state)
}
