//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(menu_routes())
        .merge(restaurant_routes())
        .merge(vote_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        // Route-level so the matched path is known when recording
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Menu and dish routes
fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/menus/", get(handlers::menu::get_all))
        .route("/menus/byDate", get(handlers::menu::get_by_date))
        .route("/menus/byRestaurant", get(handlers::menu::get_by_restaurant))
        .route("/menus/{restaurant_id}", post(handlers::menu::create_menu))
        .route(
            "/menus/{restaurant_id}/{menu_id}",
            get(handlers::menu::get_menu)
                .put(handlers::menu::update_menu)
                .delete(handlers::menu::delete_menu),
        )
        .route("/dishes/{dish_id}", get(handlers::menu::get_dish))
}

/// Restaurant routes
fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurants/",
            get(handlers::restaurant::get_all).post(handlers::restaurant::create_restaurant),
        )
        .route(
            "/restaurants/{restaurant_id}",
            get(handlers::restaurant::get_restaurant),
        )
}

/// Vote routes (caller identity required)
fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/votes/own", get(handlers::vote::get_own))
        .route("/votes/results", get(handlers::vote::results))
        .route("/votes/{restaurant_id}", post(handlers::vote::vote))
}
