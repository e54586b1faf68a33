use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{ApiError, Result};
use crate::models::{Task, TaskChanges, TaskDraft};
use crate::storage::Storage;

const TASK_NOT_FOUND: &str = "Task not found";

/// One page of a user's task list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Task service: owner-scoped CRUD over the task store.
///
/// Every method takes the caller identity; the storage layer applies it as
/// part of each query, so a task owned by someone else surfaces here as
/// `NotFound`, indistinguishable from a task that does not exist.
pub struct TaskService {
    storage: Arc<dyn Storage>,
}

impl TaskService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, owner_id: &str, draft: TaskDraft) -> Result<Task> {
        let task = self.storage.create_task(owner_id, draft).await?;
        debug!("Created task {} for {}", task.id, owner_id);
        Ok(task)
    }

    /// List one page of the owner's tasks, most recently created first.
    /// `page` is 1-based and `page_size` must be positive; the handler
    /// defaults both before calling.
    #[instrument(skip(self))]
    pub async fn list(&self, owner_id: &str, page: u64, page_size: u32) -> Result<TaskPage> {
        let offset = (page - 1) * page_size as u64;
        let tasks = self.storage.list_tasks(owner_id, page_size, offset).await?;
        let count = self.storage.count_tasks(owner_id).await?;
        let total_pages = count.div_ceil(page_size as u64);

        Ok(TaskPage {
            tasks,
            total_pages,
            current_page: page,
        })
    }

    pub async fn get(&self, owner_id: &str, task_id: u64) -> Result<Task> {
        self.storage
            .get_task(owner_id, task_id)
            .await?
            .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))
    }

    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        owner_id: &str,
        task_id: u64,
        changes: TaskChanges,
    ) -> Result<Task> {
        self.storage
            .update_task(owner_id, task_id, changes)
            .await?
            .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))
    }

    #[instrument(skip(self))]
    pub async fn mark_completed(&self, owner_id: &str, task_id: u64) -> Result<Task> {
        self.storage
            .mark_task_completed(owner_id, task_id)
            .await?
            .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, owner_id: &str, task_id: u64) -> Result<()> {
        if self.storage.delete_task(owner_id, task_id).await? {
            debug!("Deleted task {} for {}", task_id, owner_id);
            Ok(())
        } else {
            Err(ApiError::not_found(TASK_NOT_FOUND))
        }
    }
}
