use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, subscription::SubscriptionController};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

/// Build the application router. Shared between the server entrypoint and the
/// e2e test harness.
pub fn build_router(
    pool: Arc<DbPool>,
    subscription_controller: Arc<SubscriptionController>,
) -> Router {
    // total-cost is registered alongside :subscription_id; the static segment
    // takes precedence
    let subscription_routes = Router::new()
        .route(
            "/subscriptions/",
            post(SubscriptionController::create).get(SubscriptionController::list),
        )
        .route(
            "/subscriptions/total-cost",
            get(SubscriptionController::summary),
        )
        .route(
            "/subscriptions/:subscription_id",
            get(SubscriptionController::get_by_id)
                .put(SubscriptionController::update)
                .delete(SubscriptionController::delete),
        )
        .with_state(subscription_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(subscription_routes)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    subscription_controller: Arc<SubscriptionController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, subscription_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
