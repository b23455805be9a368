//! The request gates.
//!
//! - [`Restricted`]: a valid token must be present; attaches its claims.
//! - [`Only`]: the attached claims must carry a given role.
//! - [`ValidateRoleName`]: normalizes a registration role name.
//! - [`CheckUsernameExists`]: the claimed username must be on file.

use super::jwt::TokenCodec;
use super::pipeline::{Flow, Gate, RequestContext};
use super::roles::validate_role_name;
use crate::db::UserStore;
use crate::types::AppError;
use async_trait::async_trait;
use std::sync::Arc;

pub const TOKEN_REQUIRED: &str = "Token required";
pub const TOKEN_INVALID: &str = "Token invalid";
pub const NOT_FOR_YOU: &str = "This is not for you";
/// Existence check failure. Capitalized, unlike the password mismatch message.
pub const UNKNOWN_USERNAME: &str = "Invalid credentials";
pub const WRONG_PASSWORD: &str = "invalid credentials";

/// Pulls the token out of an `Authorization` value, with or without a `Bearer` scheme.
pub fn extract_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let token = match header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if header.eq_ignore_ascii_case("bearer") => "",
        _ => header,
    };

    (!token.is_empty()).then_some(token)
}

/// Authentication gate.
#[derive(Clone)]
pub struct Restricted {
    codec: Arc<TokenCodec>,
}

impl Restricted {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

#[async_trait]
impl Gate for Restricted {
    fn name(&self) -> &'static str {
        "restricted"
    }

    async fn run(&self, mut ctx: RequestContext) -> Flow {
        let Some(token) = ctx.authorization.as_deref().and_then(extract_token) else {
            return Flow::Respond(AppError::MissingCredential(TOKEN_REQUIRED.to_string()));
        };

        match self.codec.decode_and_verify(token) {
            Ok(claims) => {
                ctx.claims = Some(claims);
                Flow::Continue(ctx)
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "token rejected");
                Flow::Respond(AppError::InvalidCredential(TOKEN_INVALID.to_string()))
            }
        }
    }
}

/// Authorization gate. Reads the claims [`Restricted`] attached; never
/// re-verifies the token.
#[derive(Debug, Clone)]
pub struct Only {
    required_role: String,
}

impl Only {
    pub fn new(required_role: impl Into<String>) -> Self {
        Self {
            required_role: required_role.into(),
        }
    }

    pub fn required_role(&self) -> &str {
        &self.required_role
    }
}

#[async_trait]
impl Gate for Only {
    fn name(&self) -> &'static str {
        "only"
    }

    async fn run(&self, ctx: RequestContext) -> Flow {
        match ctx.claims.as_ref() {
            Some(claims) if claims.role_name == self.required_role => Flow::Continue(ctx),
            Some(_) => Flow::Respond(AppError::Forbidden(NOT_FOR_YOU.to_string())),
            None => {
                tracing::warn!(
                    required_role = %self.required_role,
                    "role check ran without authenticated claims"
                );
                Flow::Respond(AppError::Forbidden(NOT_FOR_YOU.to_string()))
            }
        }
    }
}

/// Registration role validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateRoleName;

#[async_trait]
impl Gate for ValidateRoleName {
    fn name(&self) -> &'static str {
        "validate_role_name"
    }

    async fn run(&self, mut ctx: RequestContext) -> Flow {
        match validate_role_name(ctx.role_name_input.as_deref()) {
            Ok(role) => {
                ctx.validated_role = Some(role);
                Flow::Continue(ctx)
            }
            Err(err) => Flow::Respond(err),
        }
    }
}

/// Credential existence gate for the login path.
#[derive(Clone)]
pub struct CheckUsernameExists {
    store: Arc<dyn UserStore>,
}

impl CheckUsernameExists {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Gate for CheckUsernameExists {
    fn name(&self) -> &'static str {
        "check_username_exists"
    }

    async fn run(&self, mut ctx: RequestContext) -> Flow {
        let Some(username) = ctx.username.as_deref() else {
            return Flow::Respond(AppError::MissingCredential(UNKNOWN_USERNAME.to_string()));
        };

        match self.store.find_by_username(username).await {
            Ok(Some(user)) => {
                ctx.found_user = Some(user);
                Flow::Continue(ctx)
            }
            Ok(None) => {
                Flow::Respond(AppError::MissingCredential(UNKNOWN_USERNAME.to_string()))
            }
            Err(err) => Flow::Respond(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, TursoClient};
    use crate::types::Claims;
    use chrono::{Duration, Utc};

    const TEST_SECRET: &str = "test_jwt_secret_key_for_testing_only";

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(TEST_SECRET))
    }

    fn respond_message(flow: Flow) -> (u16, String) {
        match flow {
            Flow::Respond(err) => (err.status().as_u16(), err.message()),
            Flow::Continue(_) => panic!("expected the gate to halt"),
        }
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token("bearer abc"), Some("abc"));
        assert_eq!(extract_token("abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token("  abc  "), Some("abc"));
        assert_eq!(extract_token("Bearer "), None);
        assert_eq!(extract_token("Bearer"), None);
        assert_eq!(extract_token(""), None);
    }

    #[tokio::test]
    async fn test_restricted_requires_token() {
        let gate = Restricted::new(codec());

        let flow = gate.run(RequestContext::new()).await;
        assert_eq!(respond_message(flow), (401, "Token required".to_string()));

        let flow = gate
            .run(RequestContext::new().with_authorization("Bearer   "))
            .await;
        assert_eq!(respond_message(flow), (401, "Token required".to_string()));
    }

    #[tokio::test]
    async fn test_restricted_rejects_bad_tokens() {
        let gate = Restricted::new(codec());

        let flow = gate
            .run(RequestContext::new().with_authorization("not-a-token"))
            .await;
        assert_eq!(respond_message(flow), (401, "Token invalid".to_string()));

        let foreign = TokenCodec::new("some-other-secret-that-is-32-chars")
            .encode(&Claims::new(1, "anna", "angel"))
            .unwrap();
        let flow = gate
            .run(RequestContext::new().with_authorization(foreign))
            .await;
        assert_eq!(respond_message(flow), (401, "Token invalid".to_string()));

        let expired = codec()
            .encode_at(&Claims::new(1, "anna", "angel"), Utc::now() - Duration::days(2))
            .unwrap();
        let flow = gate
            .run(RequestContext::new().with_authorization(expired))
            .await;
        assert_eq!(respond_message(flow), (401, "Token invalid".to_string()));
    }

    #[tokio::test]
    async fn test_restricted_attaches_claims() {
        let codec = codec();
        let token = codec.encode(&Claims::new(3, "anna", "angel")).unwrap();

        let ctx = Restricted::new(codec)
            .run(RequestContext::new().with_authorization(format!("Bearer {}", token)))
            .await
            .into_result()
            .unwrap();

        assert_eq!(ctx.claims, Some(Claims::new(3, "anna", "angel")));
    }

    #[tokio::test]
    async fn test_only_matches_role_exactly() {
        let gate = Only::new("admin");

        let admin = RequestContext::new().with_claims(Claims::new(1, "bob", "admin"));
        assert!(matches!(gate.run(admin).await, Flow::Continue(_)));

        let angel = RequestContext::new().with_claims(Claims::new(2, "anna", "angel"));
        assert_eq!(
            respond_message(gate.run(angel).await),
            (403, "This is not for you".to_string())
        );

        let shouty = RequestContext::new().with_claims(Claims::new(3, "sue", "ADMIN"));
        assert!(matches!(gate.run(shouty).await, Flow::Respond(_)));
    }

    #[tokio::test]
    async fn test_only_without_claims_is_forbidden() {
        let flow = Only::new("admin").run(RequestContext::new()).await;
        assert_eq!(respond_message(flow), (403, "This is not for you".to_string()));
    }

    #[tokio::test]
    async fn test_validate_role_name_gate() {
        let mut ctx = RequestContext::new();
        ctx.role_name_input = Some("  angel ".to_string());
        let ctx = ValidateRoleName.run(ctx).await.into_result().unwrap();
        assert_eq!(ctx.validated_role.as_deref(), Some("angel"));

        let mut ctx = RequestContext::new();
        ctx.role_name_input = Some(" admin ".to_string());
        assert_eq!(
            respond_message(ValidateRoleName.run(ctx).await),
            (422, "Role name can not be admin".to_string())
        );
    }

    #[tokio::test]
    async fn test_check_username_exists() {
        let store = Arc::new(TursoClient::new_memory().await.unwrap());
        store
            .insert(&NewUser {
                username: "sue".to_string(),
                password_hash: "hash".to_string(),
                role_name: "instructor".to_string(),
            })
            .await
            .unwrap();
        let gate = CheckUsernameExists::new(store);

        let mut ctx = RequestContext::new();
        ctx.username = Some("sue".to_string());
        let ctx = gate.run(ctx).await.into_result().unwrap();
        assert_eq!(ctx.found_user.unwrap().role_name, "instructor");

        let mut ctx = RequestContext::new();
        ctx.username = Some("nobody".to_string());
        assert_eq!(
            respond_message(gate.run(ctx).await),
            (401, "Invalid credentials".to_string())
        );
    }
}
