//! Ordered gate pipeline.
//!
//! Every request that needs authentication or input checks is described by a
//! [`RequestContext`]. Gates read the inputs, populate the optional fields for the
//! stages after them, and either hand the context on or halt with a response.

use crate::db::User;
use crate::types::{AppError, Claims, LoginRequest, RegisterRequest, Result};
use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use std::sync::Arc;

/// Per-request state threaded through the gates.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
    /// Username from the request body
    pub username: Option<String>,
    /// Unvalidated role name from a registration body
    pub role_name_input: Option<String>,
    /// Set by the authentication gate
    pub claims: Option<Claims>,
    /// Set by the role validator
    pub validated_role: Option<String>,
    /// Set by the credential existence gate
    pub found_user: Option<User>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a protected request: only the authorization header matters.
    /// A header that is not visible ASCII is treated as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Self {
            authorization,
            ..Self::default()
        }
    }

    pub fn for_registration(req: &RegisterRequest) -> Self {
        Self {
            username: Some(req.username.clone()),
            role_name_input: req.role_name.clone(),
            ..Self::default()
        }
    }

    pub fn for_login(req: &LoginRequest) -> Self {
        Self {
            username: Some(req.username.clone()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_claims(mut self, claims: Claims) -> Self {
        self.claims = Some(claims);
        self
    }
}

/// Outcome of a single gate, and of a whole pipeline.
#[derive(Debug)]
pub enum Flow {
    /// Hand the (possibly enriched) context to the next stage
    Continue(RequestContext),
    /// Halt and answer with this error
    Respond(AppError),
}

impl Flow {
    pub fn into_result(self) -> Result<RequestContext> {
        match self {
            Flow::Continue(ctx) => Ok(ctx),
            Flow::Respond(err) => Err(err),
        }
    }
}

/// A pipeline stage that may halt request processing.
#[async_trait]
pub trait Gate: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: RequestContext) -> Flow;
}

/// Gates run in insertion order; the first `Respond` wins.
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Gate>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, gate: impl Gate + 'static) -> Self {
        self.stages.push(Arc::new(gate));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub async fn run(&self, mut ctx: RequestContext) -> Flow {
        for gate in &self.stages {
            match gate.run(ctx).await {
                Flow::Continue(next) => ctx = next,
                Flow::Respond(err) => {
                    tracing::debug!(gate = gate.name(), reason = %err, "pipeline halted");
                    return Flow::Respond(err);
                }
            }
        }

        Flow::Continue(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Gate for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn run(&self, mut ctx: RequestContext) -> Flow {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ctx.validated_role = Some("counted".to_string());
            Flow::Continue(ctx)
        }
    }

    struct Halt;

    #[async_trait]
    impl Gate for Halt {
        fn name(&self) -> &'static str {
            "halt"
        }

        async fn run(&self, _ctx: RequestContext) -> Flow {
            Flow::Respond(AppError::Forbidden("stop".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_pipeline_continues() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert!(matches!(
            pipeline.run(RequestContext::new()).await,
            Flow::Continue(_)
        ));
    }

    #[tokio::test]
    async fn test_context_is_threaded_between_stages() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .then(Counting {
                calls: calls.clone(),
            })
            .then(Counting {
                calls: calls.clone(),
            });

        let ctx = pipeline
            .run(RequestContext::new())
            .await
            .into_result()
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(ctx.validated_role.as_deref(), Some("counted"));
    }

    #[tokio::test]
    async fn test_first_respond_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().then(Halt).then(Counting {
            calls: calls.clone(),
        });

        let flow = pipeline.run(RequestContext::new()).await;

        assert!(matches!(flow, Flow::Respond(AppError::Forbidden(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_from_headers_reads_authorization() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());

        let ctx = RequestContext::from_headers(&headers);
        assert_eq!(ctx.authorization.as_deref(), Some("Bearer abc"));
        assert!(RequestContext::from_headers(&HeaderMap::new())
            .authorization
            .is_none());
    }

    #[test]
    fn test_from_headers_ignores_non_ascii_authorization() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            axum::http::HeaderValue::from_bytes(b"Bearer \xffabc").unwrap(),
        );

        let ctx = RequestContext::from_headers(&headers);
        assert!(ctx.authorization.is_none());
    }
}
