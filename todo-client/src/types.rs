//! Wire types for the todo API.
//!
//! # Design
//! `TodoItem` mirrors the server's schema but is defined independently, so
//! the client surface does not depend on server internals. Every field
//! defaults: the server accepts `{}` as a create payload and this type
//! round-trips that.

use serde::{Deserialize, Serialize};

/// A todo item as exchanged with the API.
///
/// `id` is `None` for items that have not been created yet; the server
/// assigns ids and always returns them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TodoItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    /// A not-yet-created item, ready to send to `TodoApi::create`.
    pub fn new(description: impl Into<String>, completed: bool) -> Self {
        Self {
            id: None,
            description: description.into(),
            completed,
        }
    }
}
