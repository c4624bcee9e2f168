//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod issue;
pub mod payment;
pub mod user;

// Re-exports
pub use issue::IssueRepository;
pub use payment::PaymentRepository;
pub use user::UserRepository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => {
                AppError::with_message(shared::ErrorCode::NotFound, msg)
            }
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention
// =============================================================================
//
// - user 记录以 email 作为 record key: type::thing('user', $email)
// - issue / payment 记录以 snowflake i64 作为 record key
// - 读取 issue / payment 时用 record::id(id) AS id 投影把 key 还原成 i64
// - 写入时序列化为 JSON 后剔除 "id" 字段，避免与 record id 冲突

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Serialize a record to JSON content without its `id` field
pub(crate) fn content_without_id<T: serde::Serialize>(record: &T) -> RepoResult<serde_json::Value> {
    let mut value = serde_json::to_value(record)
        .map_err(|e| RepoError::Database(format!("Failed to serialize record: {e}")))?;
    if let Some(object) = value.as_object_mut() {
        object.remove("id");
    }
    Ok(value)
}
