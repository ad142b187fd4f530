use super::{handlers, ApiState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/prices/hourly", get(handlers::get_hourly_prices))
        .route("/api/alerts", post(handlers::set_alert))
        .route("/api/swap-rate", get(handlers::get_swap_rate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
