use super::backend::StorageBackend;
use crate::error::{Result, TodoError};
use crate::model::Todo;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory storage backend for testing.
///
/// Holds whatever was saved last. Uses a `Mutex` because the store is
/// shared across request handlers.
#[derive(Default)]
pub struct MemBackend {
    todos: Mutex<Vec<Todo>>,
    simulate_write_error: AtomicBool,
    saves: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backend as if `todos` had been saved earlier.
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Mutex::new(todos),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// What a fresh load would return.
    pub fn saved(&self) -> Vec<Todo> {
        self.todos.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Vec<Todo>> {
        let todos = self
            .todos
            .lock()
            .map_err(|_| TodoError::Store("memory backend lock poisoned".to_string()))?;
        Ok(todos.clone())
    }

    fn save(&self, new_todos: &[Todo]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(TodoError::Store("Simulated write error".to_string()));
        }
        let mut todos = self
            .todos
            .lock()
            .map_err(|_| TodoError::Store("memory backend lock poisoned".to_string()))?;
        *todos = new_todos.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://todos".to_string()
    }
}
