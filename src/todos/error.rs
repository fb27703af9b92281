use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Cannot find todo with id {0}")]
    NotFound(String),

    #[error("This title already exists")]
    TitleConflict,

    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Coarse classification used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Storage,
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::NotFound(_) => ErrorKind::NotFound,
            TodoError::TitleConflict => ErrorKind::Conflict,
            TodoError::Validation(_) => ErrorKind::Validation,
            TodoError::Io(_) | TodoError::Serialization(_) | TodoError::Store(_) => {
                ErrorKind::Storage
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = TodoError::NotFound("abc-123".into());
        assert_eq!(err.to_string(), "Cannot find todo with id abc-123");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn io_and_store_failures_are_storage_errors() {
        let io = TodoError::from(std::io::Error::other("disk full"));
        assert_eq!(io.kind(), ErrorKind::Storage);
        assert_eq!(TodoError::Store("x".into()).kind(), ErrorKind::Storage);
    }
}
