//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let api_routes = Router::new()
        // Custom planets
        .route(
            "/planets",
            get(handlers::list_planets).post(handlers::create_planet),
        )
        .route(
            "/planets/:id",
            get(handlers::get_planet).delete(handlers::delete_planet),
        )
        // Imagery proxy
        .route("/nasa/apod", get(handlers::apod))
        .route("/nasa/images", get(handlers::search_images))
        .route("/nasa/planet/:name", get(handlers::planet_images));

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http());

    let router = if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}
