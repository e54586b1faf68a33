use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use crate::models::{Task, TaskChanges, TaskDraft};
use crate::storage::mysql::MySqlStorage;
use crate::storage::Result;

/// MySQL task record queries.
///
/// The mutating statements keep the ownership filter inside the same
/// `UPDATE`/`DELETE` as the write, so a task can never change hands between
/// an ownership check and the mutation.
pub(crate) trait MySqlTaskExt {
    async fn insert_task(&self, owner_id: &str, draft: TaskDraft) -> Result<Task>;
    async fn select_tasks(&self, owner_id: &str, limit: u32, offset: u64) -> Result<Vec<Task>>;
    async fn count_tasks_for(&self, owner_id: &str) -> Result<u64>;
    async fn select_task(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>>;
    async fn update_task_fields(
        &self,
        owner_id: &str,
        task_id: u64,
        changes: TaskChanges,
    ) -> Result<Option<Task>>;
    async fn set_task_completed(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>>;
    async fn delete_task_row(&self, owner_id: &str, task_id: u64) -> Result<bool>;
}

impl MySqlTaskExt for MySqlStorage {
    async fn insert_task(&self, owner_id: &str, draft: TaskDraft) -> Result<Task> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r"INSERT INTO tasks (user_id, title, description, category, deadline, completed, created_at)
              VALUES (?, ?, ?, ?, ?, FALSE, ?)",
        )
        .bind(owner_id)
        .bind(&draft.title)
        .bind(draft.description.as_deref())
        .bind(&draft.category)
        .bind(draft.deadline.map(|d| d.timestamp()))
        .bind(created_at.timestamp())
        .execute(self.pool())
        .await?;

        Ok(Task {
            id: result.last_insert_id(),
            user_id: owner_id.to_string(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            deadline: draft.deadline,
            completed: false,
            // second precision, matching what a reload would return
            created_at: chrono::DateTime::from_timestamp(created_at.timestamp(), 0)
                .unwrap_or(created_at),
        })
    }

    async fn select_tasks(&self, owner_id: &str, limit: u32, offset: u64) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            r"SELECT id, user_id, title, description, category, deadline, completed, created_at
              FROM tasks WHERE user_id = ?
              ORDER BY created_at DESC, id DESC
              LIMIT ? OFFSET ?",
        )
        .bind(owner_id)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(task_from_row).collect()
    }

    async fn count_tasks_for(&self, owner_id: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE user_id = ?")
            .bind(owner_id)
            .fetch_one(self.pool())
            .await?;

        Ok(count as u64)
    }

    async fn select_task(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>> {
        let row = sqlx::query(
            r"SELECT id, user_id, title, description, category, deadline, completed, created_at
              FROM tasks WHERE id = ? AND user_id = ?",
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(self.pool())
        .await?;

        row.map(task_from_row).transpose()
    }

    async fn update_task_fields(
        &self,
        owner_id: &str,
        task_id: u64,
        changes: TaskChanges,
    ) -> Result<Option<Task>> {
        // Single conditional statement: absent fields keep their stored value
        sqlx::query(
            r"UPDATE tasks SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                category = COALESCE(?, category),
                deadline = COALESCE(?, deadline),
                completed = COALESCE(?, completed)
              WHERE id = ? AND user_id = ?",
        )
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.category.as_deref())
        .bind(changes.deadline.map(|d| d.timestamp()))
        .bind(changes.completed)
        .bind(task_id)
        .bind(owner_id)
        .execute(self.pool())
        .await?;

        // Reload for the response; rows_affected is unreliable for no-op
        // updates under MySQL, presence of the owned row is what counts.
        self.select_task(owner_id, task_id).await
    }

    async fn set_task_completed(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>> {
        sqlx::query("UPDATE tasks SET completed = TRUE WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(owner_id)
            .execute(self.pool())
            .await?;

        self.select_task(owner_id, task_id).await
    }

    async fn delete_task_row(&self, owner_id: &str, task_id: u64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(owner_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn task_from_row(row: MySqlRow) -> Result<Task> {
    let created_at: i64 = row.try_get("created_at")?;
    let deadline: Option<i64> = row.try_get("deadline")?;

    Ok(Task {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        deadline: deadline.and_then(|d| chrono::DateTime::from_timestamp(d, 0)),
        completed: row.try_get("completed")?,
        created_at: chrono::DateTime::from_timestamp(created_at, 0).unwrap_or_else(Utc::now),
    })
}
