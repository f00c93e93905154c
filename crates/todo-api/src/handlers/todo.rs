use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use todo_core::{parse_done, parse_new_task, Todo, TodoEvent};
use todo_events::EventPublisher;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTodoResponse {
    pub message: String,
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTodoResponse {
    pub message: String,
    pub todo: Todo,
}

/// List all todos
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoListResponse>, ApiError> {
    let todos = state.store.list().await?;
    Ok(Json(TodoListResponse { todos }))
}

/// Create a todo and return the refreshed list
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTodoResponse>), ApiError> {
    let Json(body) = payload.map_err(rejection)?;
    let task = parse_new_task(&body)?;

    let created = state.store.create(&task).await?;
    tracing::info!(id = created.todo.id, "Created todo");

    let response = CreateTodoResponse {
        message: "Todo created".to_string(),
        todos: created.todos,
    };

    notify(&state.publisher, TodoEvent::created(created.todo));

    Ok((StatusCode::CREATED, Json(response)))
}

/// Set the done flag of one todo
pub async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateTodoResponse>, ApiError> {
    // A non-integer id cannot name any row
    let id: i32 = raw_id.parse().map_err(|_| ApiError::not_found(&raw_id))?;

    let parsed = payload
        .map_err(rejection)
        .and_then(|Json(body)| parse_done(&body).map_err(ApiError::from));

    let done = match parsed {
        Ok(done) => done,
        Err(err) => {
            // Unknown ids win over payload errors; this probe never writes.
            if !state.store.exists(id).await? {
                return Err(ApiError::not_found(id));
            }
            return Err(err);
        }
    };

    let todo = state
        .store
        .set_done(id, done)
        .await?
        .ok_or_else(|| ApiError::not_found(id))?;
    tracing::info!(id, done, "Updated todo");

    let response = UpdateTodoResponse {
        message: "Todo updated".to_string(),
        todo: todo.clone(),
    };

    notify(&state.publisher, TodoEvent::updated(todo));

    Ok(Json(response))
}

fn rejection(err: JsonRejection) -> ApiError {
    ApiError::Validation(err.body_text())
}

/// Best-effort publish on a detached task; the response never waits for it.
fn notify(publisher: &Arc<dyn EventPublisher>, event: TodoEvent) {
    let publisher = Arc::clone(publisher);

    tokio::spawn(async move {
        if let Err(e) = publisher.publish(&event).await {
            tracing::debug!(
                error = %e,
                event_type = event.event_type.as_str(),
                todo_id = event.todo.id,
                "Todo event not published"
            );
        }
    });
}
