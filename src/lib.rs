//! # rolegate - Role-based authentication server
//!
//! Registers users with hashed credentials, issues signed session tokens at
//! login, and gates routes by token validity and role membership.
//!
//! ## Overview
//!
//! rolegate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `rolegate-server` binary
//! 2. **As a library** - Mount its gates on your own axum routes
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use rolegate::{build_app, AppState, RolegateConfig, TursoClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RolegateConfig::load("rolegate.toml")?;
//!     let store = Arc::new(TursoClient::new_local(&config.database.url).await?);
//!     let secret = config.jwt_secret()?;
//!
//!     let state = AppState::new(config, store, &secret);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, build_app(state)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ### Guarding your own routes
//!
//! ```rust,ignore
//! use rolegate::auth::middleware::{gate_request, only, restricted};
//!
//! let guard = restricted(state.codec.clone());
//! let staff = only("instructor");
//!
//! let router = Router::new()
//!     .route("/grades", get(list_grades).route_layer(middleware::from_fn(
//!         move |req, next| gate_request(staff.clone(), req, next),
//!     )))
//!     .layer(middleware::from_fn(move |req, next| {
//!         gate_request(guard.clone(), req, next)
//!     }));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `swagger-ui` | Serve interactive API docs at `/swagger-ui` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Hashing, tokens, role rules and request gates
//! - [`cli`] - Command-line interface
//! - [`db`] - User store (libsql)
//! - [`types`] - Common types and error handling
//! - [`utils`] - TOML configuration

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Credential hashing, session tokens and route gates.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// User persistence (libsql).
pub mod db;
/// Core types (requests, responses, errors).
#[allow(missing_docs)]
pub mod types;
/// Configuration utilities.
#[allow(missing_docs)]
pub mod utils;

// Re-export commonly used types
pub use auth::{CredentialHasher, TokenCodec};
pub use db::{TursoClient, UserStore};
pub use types::{AppError, Result};
pub use utils::toml_config::RolegateConfig;

use axum::Router;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML-based infrastructure configuration
    pub config: Arc<RolegateConfig>,
    /// User store
    pub store: Arc<dyn UserStore>,
    /// Session token codec, holding the signing secret
    pub codec: Arc<TokenCodec>,
    /// Password hasher
    pub hasher: Arc<CredentialHasher>,
}

impl AppState {
    /// Wire up shared state from a loaded config, a store, and the signing secret.
    pub fn new(config: RolegateConfig, store: Arc<dyn UserStore>, jwt_secret: &str) -> Self {
        Self {
            config: Arc::new(config),
            store,
            codec: Arc::new(TokenCodec::new(jwt_secret)),
            hasher: Arc::new(CredentialHasher::new()),
        }
    }
}

/// Full application router: `/health`, `/api/...`, tracing and CORS layers,
/// and Swagger UI when the `swagger-ui` feature is on.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/health", axum::routing::get(api::handlers::health::health_check))
        .nest("/api", api::routes::create_router(state.codec.clone()));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
