//! HTTP service for to-do items.
//!
//! # Overview
//! A single-resource CRUD API: create, list, get, upsert and delete to-do
//! items under `/todos`, persisted behind the [`TodoRepository`] seam.
//!
//! # Design
//! This module is the HTTP adapter and nothing more. All conversion between
//! [`TodoDto`] and [`Todo`] happens in the handlers, and domain errors map
//! to status codes here and nowhere else: validation failures become 400,
//! not-found becomes 404, unexpected storage failures become 500. The
//! service layer below never sees a DTO and the handlers never touch
//! storage directly.

pub mod dto;
pub mod repository;
pub mod service;
pub mod todo;

pub use dto::TodoDto;
pub use repository::{InMemoryRepository, StoreError, TodoRepository};
pub use service::{ServiceError, TodoService};
pub use todo::{Todo, MAX_DESCRIPTION_LEN};

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;

type AppState = Arc<TodoService>;

/// Build the router over the given repository.
pub fn app(repository: Arc<dyn TodoRepository>) -> Router {
    let service = Arc::new(TodoService::new(repository));
    Router::new()
        .route("/todos", get(get_all).post(create))
        .route("/todos/{id}", get(get_one).put(put).delete(delete))
        .with_state(service)
}

/// Serve the API on `listener` with an in-memory store.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app(Arc::new(InMemoryRepository::new()))).await
}

async fn create(
    State(service): State<AppState>,
    Json(dto): Json<TodoDto>,
) -> Result<(StatusCode, Json<TodoDto>), (StatusCode, String)> {
    let created = service
        .create_todo(Todo::from(dto))
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(TodoDto::from(created))))
}

async fn get_all(
    State(service): State<AppState>,
) -> Result<Json<Vec<TodoDto>>, (StatusCode, String)> {
    let todos = service.get_todos().await.map_err(error_response)?;
    Ok(Json(todos.into_iter().map(TodoDto::from).collect()))
}

async fn get_one(
    State(service): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoDto>, (StatusCode, String)> {
    let todo = service.get_todo(id).await.map_err(error_response)?;
    Ok(Json(TodoDto::from(todo)))
}

async fn put(
    State(service): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<TodoDto>,
) -> Result<Json<TodoDto>, (StatusCode, String)> {
    // Upsert: the returned item may carry a different id than requested
    // when the row did not exist and storage assigned a fresh one.
    let updated = service
        .update_todo(id, Todo::from(dto))
        .await
        .map_err(error_response)?;
    Ok(Json(TodoDto::from(updated)))
}

async fn delete(
    State(service): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    service.delete_todo(id).await.map_err(error_response)?;
    Ok(StatusCode::OK)
}

fn error_response(err: ServiceError) -> (StatusCode, String) {
    match err {
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Storage(cause) => {
            tracing::error!(%cause, "unexpected storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        }
    }
}
