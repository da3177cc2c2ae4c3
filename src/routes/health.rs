use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    dto::health_dto::{HealthResponse, RootResponse},
    utils::time::now,
    AppState,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = RootResponse)
    )
)]
#[axum::debug_handler]
pub async fn root() -> impl IntoResponse {
    Json(RootResponse {
        message: "Hello from the users backend!".to_string(),
        version: VERSION.to_string(),
        timestamp: now(),
    })
}

/// Always answers 200; an unreachable database is reported in the body.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database status", body = HealthResponse)
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let connected = state.user_service.store_reachable().await;
    let body = HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: now(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        version: VERSION.to_string(),
    };
    (StatusCode::OK, Json(body))
}
