use crate::types::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Salted one-way hashing for stored credentials.
///
/// Uses Argon2id with the crate's default cost parameters. The parameters are
/// fixed for the lifetime of the process; each digest carries its own random salt
/// in PHC format, so verification needs nothing but the digest itself.
#[derive(Clone, Default)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes a plaintext password into a PHC-formatted digest.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Checks a plaintext password against a stored digest.
    ///
    /// A digest that cannot be parsed verifies as `false`.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            tracing::warn!("stored password digest is not in PHC format");
            return false;
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("1234").expect("should hash password");

        assert_ne!(hash, "1234");
        assert!(hash.starts_with("$argon2id$"), "hash should be in PHC format");
    }

    #[test]
    fn test_password_verification() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("correct_password").expect("should hash password");

        assert!(hasher.verify("correct_password", &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = CredentialHasher::new();
        let hash1 = hasher.hash("1234").unwrap();
        let hash2 = hasher.hash("1234").unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify("1234", &hash1));
        assert!(hasher.verify("1234", &hash2));
    }

    #[test]
    fn test_malformed_digest_is_false() {
        let hasher = CredentialHasher::new();
        assert!(!hasher.verify("1234", "not-a-valid-hash"));
        assert!(!hasher.verify("1234", ""));
    }

    #[test]
    fn test_unicode_password() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("пароль-密码").unwrap();
        assert!(hasher.verify("пароль-密码", &hash));
    }
}
