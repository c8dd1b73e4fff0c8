//! Business logic for to-do items.
//!
//! # Design
//! `TodoService` is the sole translator of storage errors into the domain
//! taxonomy: constraint violations become `Validation`, missing rows and
//! stale-state conflicts become `NotFound`, and everything else propagates
//! unchanged as `Storage`. The HTTP layer above never sees a `StoreError`
//! directly, and the repository below never sees a DTO.

use std::sync::Arc;

use thiserror::Error;

use crate::repository::{StoreError, TodoRepository};
use crate::todo::Todo;

/// Domain-level failures surfaced to the HTTP adapter.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No to-do item with the requested id, or it was concurrently removed.
    #[error("to-do item with id {0} not found")]
    NotFound(i64),

    /// A field constraint was violated; the request must not be retried
    /// unchanged.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An unexpected storage failure; propagated for the HTTP layer to
    /// report as a server error.
    #[error(transparent)]
    Storage(StoreError),
}

pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Persist a new item. Any id carried by `candidate` is discarded so a
    /// create can never overwrite an existing row: identity assignment
    /// belongs to storage alone.
    pub async fn create_todo(&self, candidate: Todo) -> Result<Todo, ServiceError> {
        let fresh = Todo::with_completed(candidate.description, candidate.completed);
        let created = self
            .repository
            .save_and_flush(fresh)
            .await
            .map_err(save_error)?;
        tracing::debug!(id = created.id, "created to-do item");
        Ok(created)
    }

    /// All stored items in storage order. No pagination.
    pub async fn get_todos(&self) -> Result<Vec<Todo>, ServiceError> {
        self.repository.find_all().await.map_err(ServiceError::Storage)
    }

    pub async fn get_todo(&self, id: i64) -> Result<Todo, ServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(ServiceError::Storage)?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Upsert: fully replace the item with `id` if it exists; otherwise
    /// create a new record, whose id may differ from the requested one.
    /// Never fails merely because `id` is unknown.
    pub async fn update_todo(&self, id: i64, candidate: Todo) -> Result<Todo, ServiceError> {
        let replacement = Todo::with_id(Some(id), candidate.description, candidate.completed);
        self.repository
            .save_and_flush(replacement)
            .await
            .map_err(save_error)
    }

    /// Remove the item with `id`. A missing row is not-found, and so is a
    /// stale-state conflict: the row was already deleted concurrently. Any
    /// other lock conflict is not a not-found condition and propagates
    /// unchanged.
    pub async fn delete_todo(&self, id: i64) -> Result<(), ServiceError> {
        match self.repository.delete_by_id(id).await {
            Ok(()) => Ok(()),
            Err(StoreError::NoSuchRow(_)) => Err(ServiceError::NotFound(id)),
            Err(StoreError::StaleState(_)) => {
                tracing::debug!(id, "delete hit a stale row, treating as not found");
                Err(ServiceError::NotFound(id))
            }
            Err(other) => Err(ServiceError::Storage(other)),
        }
    }
}

fn save_error(err: StoreError) -> ServiceError {
    match err {
        StoreError::Constraint(msg) => ServiceError::Validation(msg),
        other => ServiceError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::todo::MAX_DESCRIPTION_LEN;
    use async_trait::async_trait;

    fn service() -> TodoService {
        TodoService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn create_generates_an_id() {
        let result = service().create_todo(Todo::new("Do 1")).await.unwrap();
        assert!(result.id.is_some());
        assert_eq!(result.description, "Do 1");
        assert!(!result.completed);
    }

    #[tokio::test]
    async fn create_accepts_empty_description() {
        // Whether empty descriptions should be allowed is a product call;
        // until clarified we allow them.
        let result = service()
            .create_todo(Todo::with_completed("", true))
            .await
            .unwrap();
        assert!(result.id.is_some());
        assert_eq!(result.description, "");
        assert!(result.completed);
    }

    #[tokio::test]
    async fn create_ignores_caller_supplied_id() {
        let service = service();
        let first = service.create_todo(Todo::new("Do 1")).await.unwrap();
        let id1 = first.id.unwrap();

        // Reusing the first item's id must still produce a second item.
        let second = service
            .create_todo(Todo::with_id(Some(id1), "Do 2", true))
            .await
            .unwrap();

        assert_ne!(second.id, None);
        assert_ne!(second.id, first.id);
        assert_eq!(service.get_todos().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_rejects_overlong_description() {
        let err = service()
            .create_todo(Todo::new("x".repeat(MAX_DESCRIPTION_LEN + 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn get_todos_on_empty_store_is_empty() {
        assert!(service().get_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_todo_unknown_id_is_not_found() {
        let err = service().get_todo(18).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(18)));
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = service();
        let created = service
            .create_todo(Todo::with_completed("Walk dog", true))
            .await
            .unwrap();
        let fetched = service.get_todo(created.id.unwrap()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_replaces_existing_item_in_place() {
        let service = service();
        let created = service.create_todo(Todo::new("before")).await.unwrap();
        let id = created.id.unwrap();

        let updated = service
            .update_todo(id, Todo::with_completed("after", true))
            .await
            .unwrap();
        assert_eq!(updated.id, Some(id));

        let fetched = service.get_todo(id).await.unwrap();
        assert_eq!(fetched.description, "after");
        assert!(fetched.completed);
    }

    #[tokio::test]
    async fn update_unknown_id_creates_a_new_item() {
        let service = service();
        let updated = service
            .update_todo(42, Todo::new("fresh"))
            .await
            .unwrap();

        // Storage assigned the id, so it need not be the requested one.
        let id = updated.id.unwrap();
        let fetched = service.get_todo(id).await.unwrap();
        assert_eq!(fetched.description, "fresh");
    }

    #[tokio::test]
    async fn delete_removes_the_item() {
        let service = service();
        let created = service.create_todo(Todo::new("gone soon")).await.unwrap();
        let id = created.id.unwrap();

        service.delete_todo(id).await.unwrap();

        let err = service.get_todo(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let err = service().delete_todo(18).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(18)));
    }

    /// Repository stub whose delete always fails with a fixed error,
    /// for exercising the service's concurrency-error translation.
    struct FailingDelete(fn(i64) -> StoreError);

    #[async_trait]
    impl TodoRepository for FailingDelete {
        async fn find_by_id(&self, _id: i64) -> Result<Option<Todo>, StoreError> {
            Ok(None)
        }
        async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
            Ok(Vec::new())
        }
        async fn save_and_flush(&self, todo: Todo) -> Result<Todo, StoreError> {
            Ok(todo)
        }
        async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
            Err((self.0)(id))
        }
    }

    #[tokio::test]
    async fn stale_state_on_delete_maps_to_not_found() {
        let service = TodoService::new(Arc::new(FailingDelete(StoreError::StaleState)));
        let err = service.delete_todo(5).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(5)));
    }

    #[tokio::test]
    async fn other_lock_conflicts_on_delete_propagate_unchanged() {
        let service = TodoService::new(Arc::new(FailingDelete(|id| {
            StoreError::LockConflict(id, "version column mismatch".to_string())
        })));
        let err = service.delete_todo(5).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Storage(StoreError::LockConflict(5, _))
        ));
    }
}
