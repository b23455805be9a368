//! Database abstraction traits
//!
//! This module provides the `UserStore` trait the gates and handlers depend on,
//! so the persistence backend can be swapped without touching the auth core.
//!
//! # Example
//!
//! ```rust,ignore
//! use rolegate::db::{DatabaseProvider, UserStore};
//!
//! // Use in-memory database (default for development/testing)
//! let store = DatabaseProvider::Memory.create_client().await?;
//!
//! // Use file-based SQLite
//! let store = DatabaseProvider::SQLite { path: "data/rolegate.db".into() }
//!     .create_client()
//!     .await?;
//! ```

use crate::types::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// User record from the database
pub use super::turso::User;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
}

impl DatabaseProvider {
    /// Pick a provider from a configured URL; `:memory:` or empty means in-memory.
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url.is_empty() || url == ":memory:" {
            DatabaseProvider::Memory
        } else {
            DatabaseProvider::SQLite {
                path: url.to_string(),
            }
        }
    }

    /// Create a users store from this provider configuration
    pub async fn create_client(&self) -> Result<Arc<dyn UserStore>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
        }
    }
}

/// Insertion payload built by registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role_name: String,
}

/// Persistence operations the auth layer needs.
///
/// Each call is assumed atomic; callers never wrap them in transactions.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Get a user by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// All users, ordered by id
    async fn find_all(&self) -> Result<Vec<User>>;

    /// Insert a user and return the stored record (with its assigned id)
    async fn insert(&self, user: &NewUser) -> Result<User>;
}

// ============== Implement UserStore for TursoClient ==============

#[async_trait]
impl UserStore for super::turso::TursoClient {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username(username).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        self.list_users().await
    }

    async fn insert(&self, user: &NewUser) -> Result<User> {
        self.create_user(&user.username, &user.password_hash, &user.role_name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_url() {
        assert_eq!(DatabaseProvider::from_url(":memory:"), DatabaseProvider::Memory);
        assert_eq!(DatabaseProvider::from_url(""), DatabaseProvider::Memory);
        assert_eq!(
            DatabaseProvider::from_url("./data/rolegate.db"),
            DatabaseProvider::SQLite {
                path: "./data/rolegate.db".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_store_through_trait_object() {
        let store = DatabaseProvider::Memory.create_client().await.unwrap();

        let created = store
            .insert(&NewUser {
                username: "anna".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                role_name: "student".to_string(),
            })
            .await
            .unwrap();

        let found = store.find_by_username("anna").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }
}
