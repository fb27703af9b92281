use super::backend::StorageBackend;
use crate::error::{Result, TodoError};
use crate::model::Todo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Deserialize)]
struct Database {
    todos: Vec<Todo>,
}

#[derive(Serialize)]
struct DatabaseRef<'a> {
    todos: &'a [Todo],
}

/// Keeps the collection in a single JSON document on disk.
pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(TodoError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Vec<Todo>> {
        if !self.data_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.data_file).map_err(TodoError::Io)?;
        let db: Database = serde_json::from_str(&content).map_err(TodoError::Serialization)?;
        Ok(db.todos)
    }

    fn save(&self, todos: &[Todo]) -> Result<()> {
        let dir = self
            .data_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.ensure_dir(&dir)?;

        let content = serde_json::to_string_pretty(&DatabaseRef { todos })
            .map_err(TodoError::Serialization)?;

        // Write next to the target, then swap it in
        let tmp_file = dir.join(format!(".db-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(TodoError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.data_file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(TodoError::Io(e));
        }

        Ok(())
    }

    fn describe(&self) -> String {
        self.data_file.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("db.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn save_creates_parent_dirs_and_named_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("db.json");
        let backend = FsBackend::new(&path);

        let todo = Todo::new("Title".into(), "Body".into());
        backend.save(std::slice::from_ref(&todo)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["todos"][0]["title"], "Title");
        assert_eq!(raw["todos"][0]["id"], todo.id.as_str());
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("db.json"));
        backend
            .save(&[Todo::new("A".into(), "a".into())])
            .unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["db.json".to_string()]);
    }

    #[test]
    fn malformed_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "{\"records\": []}").unwrap();

        let backend = FsBackend::new(&path);
        assert!(matches!(backend.load(), Err(TodoError::Serialization(_))));
    }
}
