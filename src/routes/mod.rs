pub mod info_routes;
pub mod vehicle_routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Router completo de la API
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .merge(info_routes::create_info_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .fallback(info_routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
