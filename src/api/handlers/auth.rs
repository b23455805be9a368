use crate::{
    api::extract::ApiJson,
    auth::{
        gates::{CheckUsernameExists, ValidateRoleName, WRONG_PASSWORD},
        pipeline::{Pipeline, RequestContext},
    },
    db::NewUser,
    types::{
        AppError, Claims, LoginRequest, LoginResponse, MessageResponse, PublicUser,
        RegisterRequest, Result,
    },
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

pub const PASSWORD_REQUIRED: &str = "Password is required";

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = PublicUser),
        (status = 400, description = "Malformed JSON body", body = MessageResponse),
        (status = 422, description = "Role name rejected or password missing", body = MessageResponse),
        (status = 500, description = "Persistence failure", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>)> {
    let ctx = Pipeline::new()
        .then(ValidateRoleName)
        .run(RequestContext::for_registration(&payload))
        .await
        .into_result()?;

    let role_name = ctx
        .validated_role
        .ok_or_else(|| AppError::Internal("role name was not validated".to_string()))?;

    let password = payload
        .password
        .as_deref()
        .ok_or_else(|| AppError::Validation(PASSWORD_REQUIRED.to_string()))?;
    let password_hash = state.hasher.hash(password)?;

    let user = state
        .store
        .insert(&NewUser {
            username: payload.username,
            password_hash,
            role_name,
        })
        .await?;

    tracing::info!(user_id = user.id, role = %user.role_name, "user registered");

    Ok((StatusCode::CREATED, Json(user.to_public())))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed JSON body", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let ctx = Pipeline::new()
        .then(CheckUsernameExists::new(state.store.clone()))
        .run(RequestContext::for_login(&payload))
        .await
        .into_result()?;

    let user = ctx
        .found_user
        .ok_or_else(|| AppError::Internal("user lookup did not attach a record".to_string()))?;

    if !state.hasher.verify(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredential(WRONG_PASSWORD.to_string()));
    }

    let token = state
        .codec
        .encode(&Claims::new(user.id, &user.username, &user.role_name))?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(LoginResponse {
        message: format!("{} is back!", user.username),
        token,
    }))
}
