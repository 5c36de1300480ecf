use axum::extract::{Path, Query, State};
use axum::Json;
use planner_core::store::TaskStore;
use planner_core::weekly::{bucket_by_week, TaskOrder, WeeklySummary};
use planner_core::{date, filter_week, PlannerError, Task};

use super::normalize_query;
use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct SummaryParams {
    pub order: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct WeekParams {
    pub q: Option<String>,
}

/// GET /api/weekly-summary?order=<input|chronological>
///
/// `{ "YYYY-MM-DD": { weekStart, open, completed, tasks } }` keyed by Monday.
/// Any task with an unreadable date fails the whole summary.
pub async fn weekly_summary(
    State(app): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<WeeklySummary>, AppError> {
    let order = match params.order.as_deref() {
        Some(raw) => raw.parse::<TaskOrder>().map_err(AppError::bad_request)?,
        None => app.config.weekly.order,
    };
    let root = app.root.clone();
    let summary = tokio::task::spawn_blocking(move || {
        let store = TaskStore::load(&root)?;
        bucket_by_week(&store.tasks, order)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(summary))
}

/// GET /api/weekly-summary/:week?q=<query> — tasks of one week, oldest first,
/// optionally narrowed by text. `week` may be any date inside the week.
pub async fn week_tasks(
    State(app): State<AppState>,
    Path(week): Path<String>,
    Query(params): Query<WeekParams>,
) -> Result<Json<Vec<Task>>, AppError> {
    let start = date::parse_week_key(&week).ok_or(PlannerError::InvalidWeekKey(week))?;
    let query = normalize_query(params.q);
    let root = app.root.clone();
    let tasks = tokio::task::spawn_blocking(move || {
        let store = TaskStore::load(&root)?;
        filter_week(&store.list(None), start, query.as_deref())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(tasks))
}
