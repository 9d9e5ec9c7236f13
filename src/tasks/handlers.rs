use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

use crate::shared::state::AppState;

use super::error::TasksError;
use super::types::{CreateTaskRequest, Task, TaskStats, UpdateTaskRequest};

pub async fn handle_task_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Task>>, TasksError> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks))
}

pub async fn handle_task_create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), TasksError> {
    let task = state.tasks.create(payload).await?;
    log::info!("Created task {}", task.id);
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn handle_task_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, TasksError> {
    let task = state.tasks.get(id).await?;
    Ok(Json(task))
}

pub async fn handle_task_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, TasksError> {
    let task = state.tasks.update(id, payload).await?;
    Ok(Json(task))
}

pub async fn handle_task_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, TasksError> {
    state.tasks.delete(id).await?;
    log::info!("Deleted task {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_clear_completed(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, TasksError> {
    let deleted = state.tasks.clear_completed().await?;
    log::info!("Cleared {} completed tasks", deleted);
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

pub async fn handle_task_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TaskStats>, TasksError> {
    let stats = state.tasks.stats().await?;
    Ok(Json(stats))
}
