pub mod chat;
pub mod health;
pub mod info;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::metrics;
use crate::services::AppState;

pub fn create_router(state: AppState) -> Router {
    let (prometheus_layer, metrics_router) = metrics::setup_metrics();

    let api_routes = Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/info", get(info::info))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .route("/health", get(health::health_check))
        .merge(metrics_router)
        .layer(
            ServiceBuilder::new()
                // Prometheus metrics (outermost - captures all requests)
                .layer(prometheus_layer)
                .layer(TraceLayer::new_for_http())
                // The browser frontend is served from a different origin
                .layer(CorsLayer::permissive()),
        )
}
