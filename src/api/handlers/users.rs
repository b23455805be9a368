use crate::{
    auth::middleware::AuthUser,
    types::{AppError, Claims, MessageResponse, PublicUser, Result},
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};

/// List every user
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users, ordered by id", body = [PublicUser]),
        (status = 401, description = "Missing or invalid token", body = MessageResponse)
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>> {
    let users = state.store.find_all().await?;
    Ok(Json(users.iter().map(|u| u.to_public()).collect()))
}

/// Claims of the token the caller presented
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Decoded token claims", body = Claims),
        (status = 401, description = "Missing or invalid token", body = MessageResponse)
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn me(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}

/// Fetch a single user (admin only)
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = PublicUser),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<PublicUser>> {
    let user = state
        .store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.to_public()))
}
