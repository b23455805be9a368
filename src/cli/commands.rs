//! Implementations of the non-server subcommands.

use super::output::Output;
use crate::auth::{
    gates::extract_token,
    jwt::{TokenPayload, TokenRejection},
    roles::{DEFAULT_ROLE, MAX_ROLE_NAME_LEN},
    CredentialHasher, TokenCodec,
};
use crate::db::{NewUser, User, UserStore};
use crate::types::{AppError, Result};
use crate::utils::toml_config::{ConfigError, RolegateConfig};
use chrono::{DateTime, Utc};

/// Print the effective configuration. The secret itself is never shown.
pub fn show_config(
    config: &RolegateConfig,
    validate: bool,
    output: &Output,
) -> std::result::Result<(), ConfigError> {
    output.header("Configuration");

    output.subheader("Server");
    output.kv("host", &config.server.host);
    output.kv("port", &config.server.port.to_string());
    output.kv("log_level", &config.server.log_level);

    output.subheader("Auth");
    output.kv("jwt_secret_env", &config.auth.jwt_secret_env);
    let secret_status = match config.resolve_env(&config.auth.jwt_secret_env) {
        Some(secret) => format!("set ({} bytes)", secret.len()),
        None => "not set".to_string(),
    };
    output.kv("secret", &secret_status);

    output.subheader("Database");
    output.kv("url", &config.database.url);

    if validate {
        output.newline();
        config.validate()?;
        output.success("Configuration is valid");
    }

    Ok(())
}

/// Provision a user directly in the store.
///
/// Any role is accepted here, including `admin`; only the length limit and the
/// blank-means-default rule of public registration apply.
pub async fn create_user(
    store: &dyn UserStore,
    hasher: &CredentialHasher,
    username: &str,
    password: &str,
    role: &str,
) -> Result<User> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }

    let role = match role.trim() {
        "" => DEFAULT_ROLE,
        r if r.chars().count() > MAX_ROLE_NAME_LEN => {
            return Err(AppError::Validation(
                "Role name can not be longer than 32 chars".to_string(),
            ));
        }
        r => r,
    };

    let password_hash = hasher.hash(password)?;
    store
        .insert(&NewUser {
            username: username.to_string(),
            password_hash,
            role_name: role.to_string(),
        })
        .await
}

/// Verify a token (raw or `Bearer`-prefixed) against `now`.
pub fn inspect_token(
    codec: &TokenCodec,
    raw: &str,
    now: DateTime<Utc>,
) -> std::result::Result<TokenPayload, TokenRejection> {
    let token = extract_token(raw).ok_or(TokenRejection::Malformed)?;
    codec.verify_at(token, now)
}
