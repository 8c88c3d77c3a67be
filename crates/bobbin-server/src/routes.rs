//! Task routes: `/tasks`, `/tasks/{id}`, `/stats`.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use bobbin_core::{Stats, Task, TaskId};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /tasks`. A missing `payload` is the empty string.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub payload: String,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/tasks", post(create_task).get(list_tasks))
        .route("/tasks/{id}", get(get_task))
        .route("/stats", get(get_stats))
        .with_state(state)
}

/// POST /tasks - submit a task; 201 with the `PENDING` record
///
/// The body is decoded regardless of `Content-Type`.
pub async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let req: CreateTaskRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;
    let task = state.service.create(req.payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks - all tasks, unordered
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.service.list())
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = state.service.get(&TaskId::new(id))?;
    Ok(Json(task))
}

/// GET /stats
pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    Json(state.service.stats())
}
