pub mod health;
pub mod users;

use axum::{routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    config::Config,
    dto::{
        health_dto::{HealthResponse, RootResponse},
        user_dto::{CreateUserPayload, DeleteUserResponse, UserResponse},
    },
    middleware::{
        cors::cors_layer,
        trusted_host::{trusted_host_middleware, TrustedHosts},
    },
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Users API", description = "CRUD service for user records"),
    paths(
        health::root,
        health::health,
        users::create_user,
        users::list_users,
        users::get_user,
        users::delete_user,
    ),
    components(schemas(
        CreateUserPayload,
        UserResponse,
        DeleteUserResponse,
        RootResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Full application: routes plus CORS, host validation and request tracing.
pub fn app(state: AppState, config: &Config) -> Router {
    let user_collection = get(users::list_users).post(users::create_user);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/openapi.json", get(openapi_json))
        .route("/users", user_collection.clone())
        .route("/users/", user_collection)
        .route("/users/:id", get(users::get_user).delete(users::delete_user))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            TrustedHosts::new(&config.allowed_hosts),
            trusted_host_middleware,
        ))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
