use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use planner_core::store::TaskStore;
use planner_core::{NewTask, Task, TaskPatch};

use super::normalize_query;
use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/tasks?q=<query> — tasks matching `q` in title or description,
/// oldest first.
pub async fn list_tasks(
    State(app): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Task>>, AppError> {
    let root = app.root.clone();
    let query = normalize_query(params.q);
    let tasks = tokio::task::spawn_blocking(move || {
        let store = TaskStore::load(&root)?;
        Ok::<_, planner_core::PlannerError>(store.list(query.as_deref()))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(tasks))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, AppError> {
    let root = app.root.clone();
    let task = tokio::task::spawn_blocking(move || {
        let store = TaskStore::load(&root)?;
        store.get(&id).cloned()
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(task))
}

/// POST /api/tasks — create a task.
pub async fn create_task(
    State(app): State<AppState>,
    Json(body): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let _guard = app.write_lock.lock().await;
    let root = app.root.clone();
    let task = tokio::task::spawn_blocking(move || {
        let mut store = TaskStore::load(&root)?;
        let task = store.create(body)?;
        store.save(&root)?;
        Ok::<_, planner_core::PlannerError>(task)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/:id — apply a partial update and return the result.
pub async fn update_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, AppError> {
    let _guard = app.write_lock.lock().await;
    let root = app.root.clone();
    let task = tokio::task::spawn_blocking(move || {
        let mut store = TaskStore::load(&root)?;
        let task = store.update(&id, patch)?;
        store.save(&root)?;
        Ok::<_, planner_core::PlannerError>(task)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(task))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let _guard = app.write_lock.lock().await;
    let root = app.root.clone();
    tokio::task::spawn_blocking(move || {
        let mut store = TaskStore::load(&root)?;
        store.delete(&id)?;
        store.save(&root)?;
        Ok::<_, planner_core::PlannerError>(())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "ok": true })))
}
