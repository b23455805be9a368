//! Mock implementations for testing.
//!
//! Stores that misbehave on purpose, so the 500 path can be exercised without
//! breaking a real database.

use async_trait::async_trait;
use rolegate::db::{NewUser, User, UserStore};
use rolegate::types::{AppError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A store whose every call fails with a database error.
///
/// # Examples
///
/// ```ignore
/// let store = Arc::new(FailingStore::new("disk I/O error"));
/// let state = AppState::new(config, store, SECRET);
/// ```
#[derive(Debug, Default)]
pub struct FailingStore {
    message: String,
    calls: AtomicUsize,
}

impl FailingStore {
    /// Create a store that fails with `message`.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Database(self.message.clone()))
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn find_by_username(&self, _username: &str) -> Result<Option<User>> {
        self.fail()
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>> {
        self.fail()
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        self.fail()
    }

    async fn insert(&self, _user: &NewUser) -> Result<User> {
        self.fail()
    }
}
