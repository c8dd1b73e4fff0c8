//! Storage boundary for to-do items.
//!
//! # Design
//! `TodoRepository` is the contract the service programs against; the
//! relational engine behind it is a collaborator, not part of this crate's
//! logic. The error enum carries the storage-level signals the service needs
//! to translate: a missing row, a row that went stale under optimistic
//! concurrency, a lock conflict that is *not* stale state, and a field
//! constraint violation. Field validation (description length) happens here,
//! before anything is written.
//!
//! `InMemoryRepository` is the shipped implementation: a lock-guarded map
//! with a monotonically increasing id sequence and a per-row version
//! counter. A SQL-backed implementation would slot in behind the same trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::todo::{Todo, MAX_DESCRIPTION_LEN};

/// Storage-level failures, kept distinguishable so the service can map
/// them into the domain error taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no row with id {0}")]
    NoSuchRow(i64),

    /// The row was concurrently modified or removed since it was last read.
    #[error("row {0} is stale: it changed since it was last read")]
    StaleState(i64),

    /// An optimistic-concurrency failure not attributable to stale state.
    #[error("optimistic lock conflict on row {0}: {1}")]
    LockConflict(i64, String),

    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Durable storage keyed by generated numeric identity.
///
/// `save_and_flush` is an upsert: an entity without an id, or whose id
/// matches no row, is inserted under a freshly assigned id; an entity whose
/// id matches an existing row replaces that row in place. Identity
/// assignment is exclusively the repository's job.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, StoreError>;
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError>;
    async fn save_and_flush(&self, todo: Todo) -> Result<Todo, StoreError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct Row {
    description: String,
    completed: bool,
    version: u64,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Row>,
    last_id: i64,
}

/// In-memory `TodoRepository` backed by a lock-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    table: RwLock<Table>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_constraints(todo: &Todo) -> Result<(), StoreError> {
    let len = todo.description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(StoreError::Constraint(format!(
            "description is {len} characters, maximum is {MAX_DESCRIPTION_LEN}"
        )));
    }
    Ok(())
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .map(|row| Todo::with_id(Some(id), row.description.clone(), row.completed)))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, row)| Todo::with_id(Some(*id), row.description.clone(), row.completed))
            .collect())
    }

    async fn save_and_flush(&self, todo: Todo) -> Result<Todo, StoreError> {
        check_constraints(&todo)?;

        let mut table = self.table.write().await;
        if let Some(id) = todo.id {
            if let Some(row) = table.rows.get_mut(&id) {
                row.description = todo.description.clone();
                row.completed = todo.completed;
                row.version += 1;
                return Ok(todo);
            }
        }

        // No id, or an id that matches no row: insert under a fresh id.
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(
            id,
            Row {
                description: todo.description.clone(),
                completed: todo.completed,
                version: 0,
            },
        );
        Ok(Todo::with_id(Some(id), todo.description, todo.completed))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        match table.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NoSuchRow(id)),
        }
    }
}
