//! Wire representation of a to-do item.
//!
//! # Design
//! `TodoDto` is the only type that is (de)serialized on the HTTP boundary.
//! It mirrors the entity field for field but is kept separate so the wire
//! format and the persistence format can evolve independently. Every field
//! defaults on input: a client may send `{}` and get an empty, not-completed
//! item. Conversion to and from [`Todo`] is total and lossless in both
//! directions; validation is a storage concern, not a DTO concern.

use serde::{Deserialize, Serialize};

use crate::todo::Todo;

/// A to-do item as exchanged with HTTP clients.
///
/// `id` is null or absent on create requests and always present on
/// successful responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            description: todo.description,
            completed: todo.completed,
        }
    }
}

impl From<TodoDto> for Todo {
    /// A null or absent id yields an entity with no identity, signalling
    /// "not yet persisted".
    fn from(dto: TodoDto) -> Self {
        Todo::with_id(dto.id, dto.description, dto.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_parses_with_defaults() {
        let dto: TodoDto = serde_json::from_str("{}").unwrap();
        assert!(dto.id.is_none());
        assert_eq!(dto.description, "");
        assert!(!dto.completed);
    }

    #[test]
    fn null_id_parses_as_none() {
        let dto: TodoDto =
            serde_json::from_str(r#"{"id":null,"description":"Buy milk","completed":true}"#)
                .unwrap();
        assert!(dto.id.is_none());
        assert_eq!(dto.description, "Buy milk");
        assert!(dto.completed);
    }

    #[test]
    fn serializes_all_three_fields() {
        let dto = TodoDto {
            id: Some(3),
            description: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["description"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn entity_round_trips_through_dto() {
        for id in [None, Some(42)] {
            for completed in [false, true] {
                let entity = Todo::with_id(id, "Round trip", completed);
                let back = Todo::from(TodoDto::from(entity.clone()));
                assert_eq!(back, entity);
            }
        }
    }

    #[test]
    fn dto_round_trips_through_entity() {
        let dto = TodoDto {
            id: None,
            description: "No id yet".to_string(),
            completed: true,
        };
        let back = TodoDto::from(Todo::from(dto.clone()));
        assert_eq!(back, dto);
    }
}
