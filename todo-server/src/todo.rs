//! The to-do entity: the in-memory representation the service and
//! repository work with. Wire conversion lives in [`crate::dto`].

/// Maximum allowed length of a to-do description, in characters.
///
/// An unlimited description would let a single client consume arbitrary
/// amounts of storage and memory, so persistence rejects anything longer.
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// A to-do item. `id` is `None` until storage assigns one on first
/// persistence and never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Todo {
    pub id: Option<i64>,
    pub description: String,
    pub completed: bool,
}

impl Todo {
    /// A new, not-yet-persisted item with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
            completed: false,
        }
    }

    /// A new, not-yet-persisted item with description and completion flag.
    pub fn with_completed(description: impl Into<String>, completed: bool) -> Self {
        Self {
            id: None,
            description: description.into(),
            completed,
        }
    }

    /// Reconstruct an item with a known identity, e.g. after a storage
    /// round-trip or to target a specific row on update.
    pub fn with_id(id: Option<i64>, description: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            description: description.into(),
            completed,
        }
    }
}
