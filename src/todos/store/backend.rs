use crate::error::Result;
use crate::model::Todo;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (uniqueness, merging, locking).
pub trait StorageBackend: Send + Sync {
    /// Load the full collection.
    /// A backend that has never been written to returns an empty collection.
    fn load(&self) -> Result<Vec<Todo>>;

    /// Replace the stored collection with `todos`.
    fn save(&self, todos: &[Todo]) -> Result<()>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}
