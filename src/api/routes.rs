use crate::auth::{
    jwt::TokenCodec,
    middleware::{gate_request, only, restricted},
    roles::RESERVED_ROLE,
};
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Routes mounted under `/api`. Users routes sit behind the authentication
/// gate; single-user lookup also requires the `admin` role.
pub fn create_router(codec: Arc<TokenCodec>) -> Router<AppState> {
    let guard = restricted(codec);
    let admin_only = only(RESERVED_ROLE);

    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/register", post(crate::api::handlers::auth::register))
        .route("/auth/login", post(crate::api::handlers::auth::login));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/users", get(crate::api::handlers::users::list_users))
        .route("/users/me", get(crate::api::handlers::users::me))
        // Admin routes (auth + role required)
        .route(
            "/users/{user_id}",
            get(crate::api::handlers::users::get_user).route_layer(middleware::from_fn(
                move |req, next| gate_request(admin_only.clone(), req, next),
            )),
        )
        .layer(middleware::from_fn(move |req, next| {
            gate_request(guard.clone(), req, next)
        }));

    public_routes.merge(protected_routes)
}
