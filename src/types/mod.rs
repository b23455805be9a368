use axum::{extract::rejection::JsonRejection, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Authentication Types =============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    /// Checked after the role name, so a bad role is reported first
    #[serde(default)]
    pub password: Option<String>,
    /// Free-form role; omitted or blank means `student`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Identity facts embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User id
    pub subject: i64,
    pub username: String,
    pub role_name: String,
}

impl Claims {
    pub fn new(subject: i64, username: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            subject,
            username: username.into(),
            role_name: role_name.into(),
        }
    }
}

// ============= User Types =============

/// The only user shape that leaves the server. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub role_name: String,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No token, or no user with the claimed username
    #[error("{0}")]
    MissingCredential(String),

    /// Wrong password, or a tampered/expired token
    #[error("{0}")]
    InvalidCredential(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Request body the JSON extractor could not accept; keeps its status
    #[error("{1}")]
    InvalidBody(StatusCode, String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential(_) | AppError::InvalidCredential(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidBody(status, _) => *status,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the response body.
    pub fn message(&self) -> String {
        match self {
            AppError::MissingCredential(msg)
            | AppError::InvalidCredential(msg)
            | AppError::Forbidden(msg)
            | AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidBody(_, msg) => msg.clone(),
            AppError::Database(msg) | AppError::Internal(msg) => {
                format!("Server error: {}", msg)
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), reason = %self, "request rejected");
        }

        let body = MessageResponse {
            message: self.message(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.status(), rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MissingCredential("Token required".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredential("Token invalid".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("This is not for you".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Validation("bad".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Database("disk full".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_carry_underlying_text() {
        let err = AppError::Database("UNIQUE constraint failed: users.username".into());
        assert_eq!(
            err.message(),
            "Server error: UNIQUE constraint failed: users.username"
        );
    }

    #[test]
    fn test_client_errors_keep_exact_message() {
        let err = AppError::InvalidCredential("invalid credentials".into());
        assert_eq!(err.message(), "invalid credentials");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Forbidden("This is not for you".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_body_keeps_status() {
        let err = AppError::InvalidBody(StatusCode::BAD_REQUEST, "bad json".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "bad json");
    }

    #[test]
    fn test_register_request_password_may_be_absent() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"bob","role_name":"admin"}"#).unwrap();
        assert!(req.password.is_none());
        assert_eq!(req.role_name.as_deref(), Some("admin"));
    }

    #[test]
    fn test_register_request_role_is_optional() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"anna","password":"1234"}"#).unwrap();
        assert!(req.role_name.is_none());
    }
}
