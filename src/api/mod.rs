//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for rolegate, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::extract`](crate::api::extract) - JSON body extractor with `{"message"}` rejections
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::openapi`](crate::api::openapi) - OpenAPI document
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/register` - Register new user (201)
//! - `POST /api/auth/login` - Login and receive a session token
//!
//! ## Users (`/api/users`)
//! - `GET /api/users` - List users (token required)
//! - `GET /api/users/me` - Claims of the presented token (token required)
//! - `GET /api/users/{user_id}` - Single user (token with role `admin` required)
//!
//! ## Health
//! - `GET /health` - Health check endpoint
//!
//! # Authentication
//!
//! Protected endpoints read the token from the `Authorization` header, with or
//! without a `Bearer` scheme:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! Every error response has the shape `{"message": "..."}`.
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request body extractors.
pub mod extract;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// OpenAPI document.
pub mod openapi;
/// Router configuration and route definitions.
pub mod routes;
