use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::model::Todo;
    use crate::store::TodoStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_todos(self, count: usize) -> Self {
            for i in 0..count {
                let todo = Todo::new(
                    format!("Test Todo {}", i + 1),
                    format!("Body for todo {}", i + 1),
                );
                self.store.create(todo).unwrap();
            }
            self
        }

        pub fn with_todo(self, title: &str, body: &str) -> Self {
            self.store
                .create(Todo::new(title.to_string(), body.to_string()))
                .unwrap();
            self
        }
    }
}
