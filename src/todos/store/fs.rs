use super::fs_backend::FsBackend;
use super::record_store::RecordStore;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub type FileStore = RecordStore<FsBackend>;

impl FileStore {
    /// Opens the JSON document at `data_file`, loading every record.
    /// A file that does not exist yet opens as an empty store.
    pub fn open_path(data_file: impl Into<PathBuf>) -> Result<Self> {
        RecordStore::open(FsBackend::new(data_file))
    }

    pub fn data_file(&self) -> &Path {
        self.backend.data_file()
    }
}
