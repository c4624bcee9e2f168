//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk for the server binary, in-memory
//! engine for tests.

pub mod repository;

use shared::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    /// Open an in-memory database (tests)
    pub async fn new_in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns("fixpoint")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;
        tracing::info!("Database ready (SurrealDB embedded)");

        Ok(Self { db })
    }

    /// Define indexes. Tables stay schemaless; uniqueness and the hot query
    /// paths get indexes.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        let statements = [
            // payment_transaction UNIQUE 索引保证验证幂等
            "DEFINE INDEX IF NOT EXISTS payment_transaction ON payment FIELDS transaction_id UNIQUE",
            "DEFINE INDEX IF NOT EXISTS issue_reporter ON issue FIELDS reporter_email",
            "DEFINE INDEX IF NOT EXISTS issue_status ON issue FIELDS status",
            "DEFINE INDEX IF NOT EXISTS issue_staff ON issue FIELDS staff_assigned.email",
            "DEFINE INDEX IF NOT EXISTS user_role ON user FIELDS role",
        ];

        for statement in statements {
            db.query(statement)
                .await
                .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        }
        Ok(())
    }
}
