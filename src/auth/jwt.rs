use crate::types::{AppError, Claims, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Lifetime of every issued token: one day.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Everything a signed token carries: the identity claims plus its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub subject: i64,
    pub username: String,
    pub role_name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl TokenPayload {
    fn new(claims: &Claims, issued_at: DateTime<Utc>) -> Self {
        Self {
            subject: claims.subject,
            username: claims.username.clone(),
            role_name: claims.role_name.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        }
    }

    pub fn into_claims(self) -> Claims {
        Claims {
            subject: self.subject,
            username: self.username,
            role_name: self.role_name,
        }
    }
}

/// Why a token failed verification.
///
/// Callers branch on this; every variant is a client-side 401, never a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenRejection {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

/// Encodes claims into signed, time-bounded tokens and verifies them back.
///
/// Tokens are self-contained HS256 JWTs, so verification needs only the secret
/// this codec was built with. Nothing is stored server-side.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec bound to the process-wide signing secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Expiry is compared by hand against an explicit clock, see `verify_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issues a token for `claims`, valid for 24 hours from now.
    pub fn encode(&self, claims: &Claims) -> Result<String> {
        self.encode_at(claims, Utc::now())
    }

    /// Issues a token as if it were `issued_at`.
    pub fn encode_at(&self, claims: &Claims, issued_at: DateTime<Utc>) -> Result<String> {
        let payload = TokenPayload::new(claims, issued_at);

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry against the current time.
    pub fn decode_and_verify(&self, token: &str) -> std::result::Result<Claims, TokenRejection> {
        self.decode_and_verify_at(token, Utc::now())
    }

    /// Verifies signature and expiry against `now`.
    pub fn decode_and_verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<Claims, TokenRejection> {
        self.verify_at(token, now).map(TokenPayload::into_claims)
    }

    /// Like [`decode_and_verify_at`](Self::decode_and_verify_at) but keeps the
    /// validity window.
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<TokenPayload, TokenRejection> {
        let payload = decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                _ => TokenRejection::Malformed,
            })?;

        if now.timestamp() > payload.exp {
            return Err(TokenRejection::Expired);
        }

        Ok(payload)
    }
}
