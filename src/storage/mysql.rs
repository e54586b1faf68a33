use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::{debug, info};

use crate::models::{Task, TaskChanges, TaskDraft, User};
use crate::storage::{Result, Storage, StorageError};

use crate::storage::mysql_task::MySqlTaskExt;
use crate::storage::mysql_user::MySqlUserExt;

/// MySQL storage implementation
pub struct MySqlStorage {
    pool: MySqlPool,
}

impl MySqlStorage {
    /// Create new storage from a connection URL
    pub async fn new_with_url(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| StorageError::Connection(format!("Failed to connect: {}", e)))?;

        Ok(Self { pool })
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Create the users and tasks tables if they do not exist yet
    pub async fn init_schema(&self) -> Result<()> {
        debug!("Initializing database schema");

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(64) NOT NULL PRIMARY KEY,
                username VARCHAR(64) NOT NULL,
                email VARCHAR(254) NOT NULL,
                password_hash VARCHAR(128) NOT NULL,
                created_at BIGINT NOT NULL,
                UNIQUE KEY uniq_users_email (email)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS tasks (
                id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
                user_id VARCHAR(64) NOT NULL,
                title VARCHAR(200) NOT NULL,
                description TEXT NULL,
                category VARCHAR(100) NOT NULL,
                deadline BIGINT NULL,
                completed BOOLEAN NOT NULL DEFAULT FALSE,
                created_at BIGINT NOT NULL,
                KEY idx_tasks_owner_created (user_id, created_at)
            )",
        )
        .execute(&self.pool)
        .await?;

        info!("Database schema ready");
        Ok(())
    }
}

#[async_trait]
impl Storage for MySqlStorage {
    async fn health_check(&self) -> Result<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(true)
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        self.insert_user(user).await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.select_user_by_id(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.select_user_by_email(email).await
    }

    async fn create_task(&self, owner_id: &str, draft: TaskDraft) -> Result<Task> {
        self.insert_task(owner_id, draft).await
    }

    async fn list_tasks(&self, owner_id: &str, limit: u32, offset: u64) -> Result<Vec<Task>> {
        self.select_tasks(owner_id, limit, offset).await
    }

    async fn count_tasks(&self, owner_id: &str) -> Result<u64> {
        self.count_tasks_for(owner_id).await
    }

    async fn get_task(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>> {
        self.select_task(owner_id, task_id).await
    }

    async fn update_task(
        &self,
        owner_id: &str,
        task_id: u64,
        changes: TaskChanges,
    ) -> Result<Option<Task>> {
        self.update_task_fields(owner_id, task_id, changes).await
    }

    async fn mark_task_completed(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>> {
        self.set_task_completed(owner_id, task_id).await
    }

    async fn delete_task(&self, owner_id: &str, task_id: u64) -> Result<bool> {
        self.delete_task_row(owner_id, task_id).await
    }
}
