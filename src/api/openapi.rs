use crate::api::handlers;
use crate::types::{
    Claims, LoginRequest, LoginResponse, MessageResponse, PublicUser, RegisterRequest,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

/// OpenAPI document for every route the server exposes.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::users::list_users,
        handlers::users::me,
        handlers::users::get_user,
        handlers::health::health_check,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        Claims,
        PublicUser,
        MessageResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Token-protected user lookups"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
