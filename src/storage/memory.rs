use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex as TokioMutex;

use crate::models::{Task, TaskChanges, TaskDraft, User};
use crate::storage::{Result, Storage, StorageError};

// In-memory storage data structure (using Mutex for thread safety)
struct StorageData {
    users: HashMap<String, User>, // user_id -> user
    tasks: HashMap<u64, Task>,    // task_id -> task
    next_task_id: u64,
}

impl StorageData {
    fn new() -> Self {
        Self {
            users: HashMap::new(),
            tasks: HashMap::new(),
            next_task_id: 1,
        }
    }
}

/// In-memory storage implementation (useful for testing)
pub struct MemoryStorage {
    data: TokioMutex<StorageData>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            data: TokioMutex::new(StorageData::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    /// Create a new user, enforcing email uniqueness like the MySQL
    /// unique constraint does
    async fn create_user(&self, user: &User) -> Result<()> {
        let mut data = self.data.lock().await;

        let duplicate = data
            .users
            .values()
            .any(|u| u.email.to_lowercase() == user.email.to_lowercase());
        if duplicate {
            return Err(StorageError::AlreadyExists(format!(
                "email already registered: {}",
                user.email
            )));
        }

        data.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    /// Get user by ID
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let data = self.data.lock().await;
        Ok(data.users.get(id).cloned())
    }

    /// Get user by email (case-insensitive)
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let data = self.data.lock().await;

        for user in data.users.values() {
            if user.email.to_lowercase() == email.to_lowercase() {
                return Ok(Some(user.clone()));
            }
        }

        Ok(None)
    }

    /// Create a task, assigning id and creation timestamp
    async fn create_task(&self, owner_id: &str, draft: TaskDraft) -> Result<Task> {
        let mut data = self.data.lock().await;

        let id = data.next_task_id;
        data.next_task_id += 1;

        let task = Task {
            id,
            user_id: owner_id.to_string(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            deadline: draft.deadline,
            completed: false,
            created_at: Utc::now(),
        };

        data.tasks.insert(id, task.clone());
        Ok(task)
    }

    /// List the owner's tasks, most recently created first
    async fn list_tasks(&self, owner_id: &str, limit: u32, offset: u64) -> Result<Vec<Task>> {
        let data = self.data.lock().await;

        let mut tasks: Vec<Task> = data
            .tasks
            .values()
            .filter(|t| t.user_id == owner_id)
            .cloned()
            .collect();
        // newest first; id breaks same-second ties by insertion order
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(tasks
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    /// Count the owner's tasks
    async fn count_tasks(&self, owner_id: &str) -> Result<u64> {
        let data = self.data.lock().await;
        Ok(data.tasks.values().filter(|t| t.user_id == owner_id).count() as u64)
    }

    /// Get one task, scoped by owner
    async fn get_task(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>> {
        let data = self.data.lock().await;
        Ok(data
            .tasks
            .get(&task_id)
            .filter(|t| t.user_id == owner_id)
            .cloned())
    }

    /// Apply field changes to an owned task. The ownership check and the
    /// mutation happen under one lock acquisition.
    async fn update_task(
        &self,
        owner_id: &str,
        task_id: u64,
        changes: TaskChanges,
    ) -> Result<Option<Task>> {
        let mut data = self.data.lock().await;

        let task = match data.tasks.get_mut(&task_id) {
            Some(task) if task.user_id == owner_id => task,
            _ => return Ok(None),
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(category) = changes.category {
            task.category = category;
        }
        if let Some(deadline) = changes.deadline {
            task.deadline = Some(deadline);
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }

        Ok(Some(task.clone()))
    }

    /// Set completed on an owned task, leaving every other field untouched
    async fn mark_task_completed(&self, owner_id: &str, task_id: u64) -> Result<Option<Task>> {
        let mut data = self.data.lock().await;

        let task = match data.tasks.get_mut(&task_id) {
            Some(task) if task.user_id == owner_id => task,
            _ => return Ok(None),
        };

        task.completed = true;
        Ok(Some(task.clone()))
    }

    /// Delete an owned task
    async fn delete_task(&self, owner_id: &str, task_id: u64) -> Result<bool> {
        let mut data = self.data.lock().await;

        let owned = data
            .tasks
            .get(&task_id)
            .map(|t| t.user_id == owner_id)
            .unwrap_or(false);
        if owned {
            data.tasks.remove(&task_id);
        }
        Ok(owned)
    }
}
