//! # Storage Layer
//!
//! This module defines the storage abstraction for todos. The [`TodoStore`]
//! trait is what the service layer talks to; it never sees files.
//!
//! ## Two Halves
//!
//! Storage is split the same way on every implementation:
//! 1. **Backend** ([`backend::StorageBackend`]): raw I/O. Loads and saves the
//!    whole collection, nothing more.
//! 2. **Record store** ([`record_store::RecordStore`]): the rules. Title
//!    uniqueness, not-found checks, patch merging, timestamp stamping, and the
//!    single-writer critical section.
//!
//! ## Persistence Policy
//!
//! The whole collection is loaded into memory once, when the store opens.
//! Every successful mutation rewrites the whole collection through the
//! backend. A mutation is applied in place while the write lock is held and
//! saved before the lock is released; if the save fails the change is undone
//! under the same lock, so readers never see an unsaved record.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production. A single JSON document on disk.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! db.json
//! {
//!   "todos": [
//!     { "id": "...", "title": "...", "body": "...",
//!       "createdAt": "...", "updatedAt": "..." }
//!   ]
//! }
//! ```

use crate::error::Result;
use crate::model::{Todo, TodoPatch};

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Abstract interface for todo storage.
///
/// Implementations are shared across request handlers, so every method
/// takes `&self` and the trait requires `Send + Sync`.
pub trait TodoStore: Send + Sync {
    /// All records, in insertion order
    fn list(&self) -> Result<Vec<Todo>>;

    /// A single record by id
    fn get(&self, id: &str) -> Result<Todo>;

    /// Append a record; fails if its title is taken
    fn create(&self, todo: Todo) -> Result<Todo>;

    /// Merge a patch over an existing record
    fn update(&self, id: &str, patch: &TodoPatch) -> Result<Todo>;

    /// Remove a record permanently
    fn delete(&self, id: &str) -> Result<()>;
}
