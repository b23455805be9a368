use crate::types::{AppError, PublicUser, Result};
use chrono::Utc;
use libsql::{Builder, Connection, Database, Row};
use std::path::Path;

/// Users store on libsql: a local SQLite file or an ephemeral in-memory database.
pub struct TursoClient {
    // Kept alive for the lifetime of the connection.
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Opens an in-memory database. Everything is lost when the client drops.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    /// Opens (or creates) a SQLite database file at `path`.
    pub async fn new_local(path: &str) -> Result<Self> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        AppError::Database(format!(
                            "Failed to create database directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        tracing::debug!(path, "users store ready");
        Ok(client)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT UNIQUE NOT NULL,
                    password_hash TEXT NOT NULL,
                    role_name TEXT NOT NULL,
                    created_at INTEGER NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }

    // User operations
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role_name: &str,
    ) -> Result<User> {
        let now = Utc::now().timestamp();

        let mut rows = self
            .conn
            .query(
                "INSERT INTO users (username, password_hash, role_name, created_at)
                 VALUES (?, ?, ?, ?)
                 RETURNING id, username, password_hash, role_name, created_at",
                (username, password_hash, role_name, now),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => User::from_row(&row),
            None => Err(AppError::Database(
                "Failed to create user: insert returned no row".to_string(),
            )),
        }
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, username, password_hash, role_name, created_at
                 FROM users WHERE username = ?",
                [username],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => User::from_row(&row).map(Some),
            None => Ok(None),
        }
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, username, password_hash, role_name, created_at
                 FROM users WHERE id = ?",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => User::from_row(&row).map(Some),
            None => Ok(None),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, username, password_hash, role_name, created_at
                 FROM users ORDER BY id ASC",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query users: {}", e)))?;

        let mut users = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            users.push(User::from_row(&row)?);
        }

        Ok(users)
    }
}

/// User record as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role_name: String,
    pub created_at: i64,
}

impl User {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
            username: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
            password_hash: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            role_name: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
            created_at: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        })
    }

    /// Drops the password hash.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            role_name: self.role_name.clone(),
        }
    }
}
