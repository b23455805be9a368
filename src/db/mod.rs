//! Users store.
//!
//! The auth core only talks to [`UserStore`]; [`TursoClient`] is the bundled
//! libsql implementation (local SQLite file or in-memory).

#![allow(missing_docs)]

pub mod traits;
pub mod turso;

pub use traits::{DatabaseProvider, NewUser, User, UserStore};
pub use turso::TursoClient;
