use super::TodoStore;
use super::backend::StorageBackend;
use crate::error::{Result, TodoError};
use crate::model::{Todo, TodoPatch, next_stamp};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    todos: RwLock<Vec<Todo>>,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Starts with an empty collection, ignoring anything the backend holds.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            todos: RwLock::new(Vec::new()),
        }
    }

    /// Loads the full collection from `backend` and keeps it in memory.
    pub fn open(backend: B) -> Result<Self> {
        let todos = backend.load()?;
        debug!(count = todos.len(), location = %backend.describe(), "loaded todos");
        Ok(Self {
            backend,
            todos: RwLock::new(todos),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Todo>>> {
        self.todos
            .read()
            .map_err(|_| TodoError::Store("todo collection lock poisoned".to_string()))
    }

    // Mutations hold this guard across persist, which serializes writers.
    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Todo>>> {
        self.todos
            .write()
            .map_err(|_| TodoError::Store("todo collection lock poisoned".to_string()))
    }

    fn persist(&self, todos: &[Todo]) -> Result<()> {
        self.backend.save(todos)?;
        debug!(count = todos.len(), location = %self.backend.describe(), "persisted todos");
        Ok(())
    }
}

fn position(todos: &[Todo], id: &str) -> Result<usize> {
    todos
        .iter()
        .position(|todo| todo.id == id)
        .ok_or_else(|| TodoError::NotFound(id.to_string()))
}

impl<B: StorageBackend> TodoStore for RecordStore<B> {
    fn list(&self) -> Result<Vec<Todo>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &str) -> Result<Todo> {
        let todos = self.read()?;
        let index = position(&todos, id)?;
        Ok(todos[index].clone())
    }

    fn create(&self, todo: Todo) -> Result<Todo> {
        let mut todos = self.write()?;
        if todos.iter().any(|existing| existing.title == todo.title) {
            return Err(TodoError::TitleConflict);
        }

        todos.push(todo.clone());
        if let Err(e) = self.persist(&todos) {
            todos.pop();
            return Err(e);
        }
        Ok(todo)
    }

    fn update(&self, id: &str, patch: &TodoPatch) -> Result<Todo> {
        let mut todos = self.write()?;
        let index = position(&todos, id)?;

        if let Some(title) = &patch.title {
            let taken = todos
                .iter()
                .enumerate()
                .any(|(i, other)| i != index && &other.title == title);
            if taken {
                return Err(TodoError::TitleConflict);
            }
        }

        let current = &todos[index];
        let mut updated = current.merged(patch);
        if updated.same_content(current) {
            return Ok(current.clone());
        }
        updated.updated_at = next_stamp(current.updated_at);

        let previous = std::mem::replace(&mut todos[index], updated.clone());
        if let Err(e) = self.persist(&todos) {
            todos[index] = previous;
            return Err(e);
        }
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut todos = self.write()?;
        let index = position(&todos, id)?;

        let removed = todos.remove(index);
        if let Err(e) = self.persist(&todos) {
            todos.insert(index, removed);
            return Err(e);
        }
        Ok(())
    }
}
