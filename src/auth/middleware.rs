use crate::auth::gates::{Only, Restricted, TOKEN_REQUIRED};
use crate::auth::jwt::TokenCodec;
use crate::auth::pipeline::{Flow, Pipeline, RequestContext};
use crate::types::{AppError, Claims};
use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Pipeline holding just the authentication gate.
pub fn restricted(codec: Arc<TokenCodec>) -> Arc<Pipeline> {
    Arc::new(Pipeline::new().then(Restricted::new(codec)))
}

/// Pipeline holding just the role gate. Mount it inside a `restricted` layer.
pub fn only(required_role: impl Into<String>) -> Arc<Pipeline> {
    Arc::new(Pipeline::new().then(Only::new(required_role)))
}

/// Runs `pipeline` for a request and either forwards it or answers for it.
///
/// Claims already in the request extensions (put there by an outer gate layer)
/// seed the context, and claims in the resulting context are written back, so
/// stacked layers verify the token once.
///
/// ```ignore
/// let guard = rolegate::auth::middleware::restricted(codec);
/// let app = Router::new()
///     .route("/protected", get(handler))
///     .layer(middleware::from_fn(move |req, next| {
///         gate_request(guard.clone(), req, next)
///     }));
/// ```
pub async fn gate_request(pipeline: Arc<Pipeline>, mut req: Request, next: Next) -> Response {
    let mut ctx = RequestContext::from_headers(req.headers());
    ctx.claims = req.extensions().get::<Claims>().cloned();

    match pipeline.run(ctx).await {
        Flow::Continue(ctx) => {
            if let Some(claims) = ctx.claims {
                req.extensions_mut().insert(claims);
            }
            next.run(req).await
        }
        Flow::Respond(err) => err.into_response(),
    }
}

/// Extractor for the claims attached by the authentication gate.
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::MissingCredential(TOKEN_REQUIRED.to_string()))
    }
}
