use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;

use crate::domain::{CreateTodo, Status, Todo, TodoId, UpdateTodo};
use crate::error::BoardError;
use crate::service::BoardService;

#[derive(Clone)]
pub struct AppState {
    svc: Arc<BoardService>,
}

/// Builds the board's HTTP surface
///
/// Mutating endpoints that touch ordering return the full refreshed listing,
/// so a client that rendered optimistically can reconcile against it; on an
/// error response the client is expected to discard its local state and
/// refetch `GET /todos`.
pub fn router(svc: Arc<BoardService>) -> Router {
    let state = AppState { svc };
    Router::new()
        .route("/healthz", get(healthz))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/reorder", patch(reorder_todos))
        .route("/todos/status", patch(change_status))
        .route("/todos/{id}", patch(update_todo).delete(delete_todo))
        .with_state(state)
}

/// Explicit sequence for one status partition (or, from older clients, the
/// whole board); position in the list becomes the rank
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub todo_ids: Vec<TodoId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    pub todo_id: TodoId,
    pub status: Status,
    /// Rank to insert at within the destination column; omitted means append
    pub target_position: Option<i64>,
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_todos(State(st): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(st.svc.list().await?))
}

async fn create_todo(
    State(st): State<AppState>,
    Json(req): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = st.svc.create(req).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn reorder_todos(
    State(st): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(st.svc.reorder(&req.todo_ids).await?))
}

async fn change_status(
    State(st): State<AppState>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let listing = st
        .svc
        .move_to_status(&req.todo_id, req.status, req.target_position)
        .await?;
    Ok(Json(listing))
}

async fn update_todo(
    State(st): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(st.svc.update_fields(&TodoId::from(id), changes).await?))
}

async fn delete_todo(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    st.svc.delete(&TodoId::from(id)).await?;
    Ok(Json(serde_json::json!({
        "message": "Todo deleted successfully"
    })))
}

#[derive(Debug)]
pub struct ApiError(BoardError);

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BoardError::TodoNotFound(_) => StatusCode::NOT_FOUND,
            BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(serde_json::json!({
            "error": self.0.to_string()
        }));
        (status, body).into_response()
    }
}
