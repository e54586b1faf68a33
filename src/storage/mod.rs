pub mod memory;
pub mod mysql;

// MySQL query modules, split per record collection
mod mysql_task;
mod mysql_user;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    config::settings::DatabaseConfig,
    error::{ApiError, Result as AppResult},
    models::{Task, TaskChanges, TaskDraft, User},
};

use self::mysql::MySqlStorage;

/// Storage Result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Error types for storage operations
#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            StorageError::Database(_) => "database",
            StorageError::Connection(_) => "connection",
            StorageError::NotFound(_) => "not_found",
            StorageError::AlreadyExists(_) => "already_exists",
            StorageError::InvalidData(_) => "validation",
            StorageError::Internal(_) => "internal",
        }
    }
}

// Database error conversions
impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::AlreadyExists(db_err.to_string())
            }
            sqlx::Error::Database(db_err) => Self::Database(db_err.to_string()),
            sqlx::Error::Io(io_err) => Self::Connection(io_err.to_string()),
            sqlx::Error::PoolTimedOut => Self::Connection("Connection pool timeout".to_string()),
            sqlx::Error::PoolClosed => Self::Connection("Connection pool closed".to_string()),
            _ => Self::Database(error.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => ApiError::NotFound(msg),
            // The only unique constraint in the schema is the user email
            StorageError::AlreadyExists(_) => ApiError::DuplicateEmail,
            StorageError::InvalidData(msg) => ApiError::Validation(msg),
            StorageError::Connection(msg) => ApiError::Database(msg),
            StorageError::Database(msg) => ApiError::Database(msg),
            StorageError::Internal(msg) => ApiError::Storage(msg),
        }
    }
}

/// Storage abstraction over the two record collections (users, tasks).
///
/// Every task method takes the caller identity and filters by it; a task
/// owned by someone else is reported exactly like a missing one.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Health check with connection validation
    async fn health_check(&self) -> Result<bool>;

    /// Close all connections gracefully
    async fn close(&self) -> Result<()>;

    // User record methods
    async fn create_user(&self, user: &User) -> Result<()>;
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    // Task record methods, all scoped by owner
    async fn create_task(&self, owner_id: &str, draft: TaskDraft) -> Result<Task>;
    async fn list_tasks(&self, owner_id: &str, limit: u32, offset: u64) -> Result<Vec<Task>>;
    async fn count_tasks(&self, owner_id: &str) -> Result<u64>;
    async fn get_task(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>>;
    async fn update_task(
        &self,
        owner_id: &str,
        task_id: u64,
        changes: TaskChanges,
    ) -> Result<Option<Task>>;
    async fn mark_task_completed(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>>;
    async fn delete_task(&self, owner_id: &str, task_id: u64) -> Result<bool>;
}

/// Storage factory
pub struct StorageFactory;

impl StorageFactory {
    /// Create MySQL storage and initialize its schema
    #[instrument(skip(config))]
    pub async fn create_mysql_storage(config: &DatabaseConfig) -> AppResult<MySqlStorage> {
        let url = config
            .connection_url()
            .ok_or_else(|| ApiError::Config("No database connection configured".to_string()))?;

        info!("Creating MySQL storage");
        let storage = MySqlStorage::new_with_url(
            &url,
            config.max_connections,
            std::time::Duration::from_secs(config.connection_timeout),
        )
        .await
        .map_err(|e| ApiError::Storage(format!("Failed to create MySQL storage: {}", e)))?;

        storage
            .init_schema()
            .await
            .map_err(|e| ApiError::Storage(format!("Failed to initialize schema: {}", e)))?;
        info!("Database schema initialized");

        Ok(storage)
    }

    /// Create memory storage for testing
    pub fn create_memory_storage() -> memory::MemoryStorage {
        info!("Creating memory storage");
        memory::MemoryStorage::new()
    }
}

/// Initialize the storage layer from database configuration
#[instrument(skip(config))]
pub async fn init_storage(config: &DatabaseConfig) -> AppResult<Arc<dyn Storage>> {
    let storage = StorageFactory::create_mysql_storage(config).await?;

    storage
        .health_check()
        .await
        .map_err(|e| ApiError::Storage(format!("Storage health check failed: {}", e)))?;

    info!("Storage layer initialized");
    Ok(Arc::new(storage))
}

/// Initialize storage, falling back to the in-memory backend when no
/// database is configured
pub async fn init_storage_or_memory(config: &DatabaseConfig) -> AppResult<Arc<dyn Storage>> {
    match config.connection_url() {
        Some(url) if url.starts_with("mysql://") => init_storage(config).await,
        Some(url) => Err(ApiError::Config(format!(
            "Unsupported database URL scheme: {}",
            url
        ))),
        None => {
            warn!("No database configured, using in-memory storage");
            Ok(Arc::new(StorageFactory::create_memory_storage()))
        }
    }
}
