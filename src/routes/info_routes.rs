//! Rutas informativas
//!
//! Health check, la pantalla "about" de la plataforma y la respuesta para
//! rutas inexistentes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

pub const PLATFORM_NAME: &str = "MotorPlatform";

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub name: &'static str,
    pub description: &'static str,
    pub values: Vec<&'static str>,
    pub version: &'static str,
}

pub fn create_info_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/about", get(about))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "motor-platform",
        "status": "healthy",
        "vehicles": state.store.len().await,
    }))
}

async fn about() -> Json<AboutResponse> {
    Json(AboutResponse {
        name: PLATFORM_NAME,
        description: "At MotorPlatform, we transform automotive dealerships by simplifying and amplifying wholesale operations. We partner with independent, franchise, and large dealer groups.",
        values: vec!["Integrity", "Collaboration", "Excellence"],
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Cualquier ruta desconocida
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "This screen doesn't exist.",
            "home": "/api/vehicles",
            "code": "NOT_FOUND",
        })),
    )
}
