use axum::{extract::State, response::IntoResponse};

use crate::{
    dto::user_dto::{CreateUserPayload, DeleteUserResponse, UserListQuery, UserResponse},
    error::Result,
    extract::{Json, Path, Query},
    AppState,
};

#[utoipa::path(
    post,
    path = "/users/",
    request_body = CreateUserPayload,
    responses(
        (status = 200, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.create(payload).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "Page of users ordered by id", body = [UserResponse]),
        (status = 422, description = "Invalid pagination parameters")
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse> {
    let users = state.user_service.list(query).await?;
    let items: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = DeleteUserResponse),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(id).await?;
    Ok(Json(DeleteUserResponse {
        message: "User deleted successfully".to_string(),
        id,
    }))
}
