use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::guard::AuthenticatedUser;
use crate::config::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::error::ApiError;
use crate::models::{TaskChanges, TaskDraft};
use crate::server::app_state::AppState;
use crate::validation;

/// Task creation request body
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub deadline: Option<String>,
}

/// Task update request body (PUT)
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub deadline: Option<String>,
    pub completed: Option<bool>,
}

/// List query parameters. Kept as raw strings so that non-numeric values
/// fall back to the defaults instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Deletion confirmation body
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// POST /api/tasks
pub async fn create_task(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    validation::validate_new_task(
        &body.title,
        body.description.as_deref(),
        &body.category,
        body.deadline.as_deref(),
    )
    .into_result()?;

    let body = body.into_inner();
    let draft = TaskDraft {
        title: body.title,
        description: body.description,
        category: body.category,
        deadline: body.deadline.as_deref().and_then(validation::parse_deadline),
    };

    let task = state.task_service.create(&auth.user_id, draft).await?;
    Ok(HttpResponse::Created().json(task))
}

/// GET /api/tasks?page&limit
pub async fn list_tasks(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<TaskListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query
        .page
        .as_deref()
        .and_then(|p| p.parse::<u64>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(DEFAULT_PAGE);
    let limit = query
        .limit
        .as_deref()
        .and_then(|l| l.parse::<u32>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let result = state.task_service.list(&auth.user_id, page, limit).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let task = state
        .task_service
        .get(&auth.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<u64>,
    body: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    validation::validate_task_update(
        body.title.as_deref(),
        body.description.as_deref(),
        body.category.as_deref(),
        body.deadline.as_deref(),
    )
    .into_result()?;

    let body = body.into_inner();
    let changes = TaskChanges {
        title: body.title,
        description: body.description,
        category: body.category,
        deadline: body.deadline.as_deref().and_then(validation::parse_deadline),
        completed: body.completed,
    };

    let task = state
        .task_service
        .update(&auth.user_id, path.into_inner(), changes)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// PATCH /api/tasks/{id}/completed
pub async fn mark_task_completed(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let task = state
        .task_service
        .mark_completed(&auth.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    state
        .task_service
        .delete(&auth.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
