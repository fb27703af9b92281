//! # Todo Service
//!
//! The service is a **thin facade** over the record store. It is the single
//! entry point for all todo operations, whatever the transport.
//!
//! ## Role and Responsibilities
//!
//! The service:
//! - **Generates** the server-side fields of new records (id, timestamps)
//! - **Delegates** everything else to the store unchanged
//! - **Returns structured types** (`Result<Todo>`), never responses
//!
//! ## Generic Over TodoStore
//!
//! `TodoService<S: TodoStore>` is generic over the storage backend:
//! - Production: `TodoService<FileStore>`
//! - Testing: `TodoService<InMemoryStore>`

use crate::error::Result;
use crate::model::{NewTodo, Todo, TodoPatch};
use crate::store::TodoStore;
use tracing::{debug, info};

pub struct TodoService<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_all_todos(&self) -> Result<Vec<Todo>> {
        debug!("listing todos");
        self.store.list()
    }

    pub fn get_one_todo(&self, id: &str) -> Result<Todo> {
        debug!(id, "fetching todo");
        self.store.get(id)
    }

    pub fn create_new_todo(&self, input: NewTodo) -> Result<Todo> {
        let todo = Todo::new(input.title, input.body);
        let created = self.store.create(todo)?;
        info!(id = %created.id, title = %created.title, "todo created");
        Ok(created)
    }

    pub fn update_one_todo(&self, id: &str, patch: &TodoPatch) -> Result<Todo> {
        let updated = self.store.update(id, patch)?;
        info!(id, "todo updated");
        Ok(updated)
    }

    pub fn delete_one_todo(&self, id: &str) -> Result<()> {
        self.store.delete(id)?;
        info!(id, "todo deleted");
        Ok(())
    }
}
