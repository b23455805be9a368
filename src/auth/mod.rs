//! Authentication and role gates
//!
//! This module holds the core of rolegate: credential hashing, the session token
//! codec, registration role rules, and the gates that guard routes.
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Argon2id hashing and verification
//! - [`auth::jwt`](crate::auth::jwt) - Token encoding, verification, and expiry
//! - [`auth::roles`](crate::auth::roles) - Registration role name rules
//! - [`auth::pipeline`](crate::auth::pipeline) - Request context and gate ordering
//! - [`auth::gates`](crate::auth::gates) - The four gates
//! - [`auth::middleware`](crate::auth::middleware) - Axum layers and extractors
//!
//! # Tokens
//!
//! Tokens are HS256 JWTs carrying `subject`, `username` and `role_name`, valid
//! for exactly one day. They are never stored, renewed, or revoked: a token that
//! verifies is trusted until it expires, even if the user's stored role has
//! changed since it was issued.
//!
//! # Usage
//!
//! ## Protecting routes
//!
//! ```ignore
//! use rolegate::auth::middleware::{gate_request, only, restricted};
//!
//! let guard = restricted(codec.clone());
//! let admin_only = only("admin");
//!
//! let app = Router::new()
//!     .route(
//!         "/admin",
//!         get(handler).route_layer(middleware::from_fn(move |req, next| {
//!             gate_request(admin_only.clone(), req, next)
//!         })),
//!     )
//!     .layer(middleware::from_fn(move |req, next| {
//!         gate_request(guard.clone(), req, next)
//!     }));
//! ```
//!
//! ## Extracting Claims in Handlers
//!
//! ```ignore
//! async fn protected_handler(AuthUser(claims): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.username)
//! }
//! ```

/// Request gates (authentication, authorization, input checks).
pub mod gates;
/// Token encoding and verification.
pub mod jwt;
/// Axum middleware and extractors for protected routes.
pub mod middleware;
/// Credential hashing.
pub mod password;
/// Request context and gate ordering.
pub mod pipeline;
/// Registration role name rules.
pub mod roles;

pub use jwt::{TokenCodec, TokenRejection};
pub use password::CredentialHasher;
pub use pipeline::{Flow, Gate, Pipeline, RequestContext};
