use crate::model::BookId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    #[error("Book {0} is already issued")]
    AlreadyIssued(BookId),

    #[error("Book {0} is not issued")]
    NotIssued(BookId),

    #[error("A book with id {0} already exists")]
    DuplicateId(BookId),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl ShelfError {
    /// Lookup and state errors leave the library untouched; callers can report and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ShelfError::BookNotFound(_)
                | ShelfError::AlreadyIssued(_)
                | ShelfError::NotIssued(_)
                | ShelfError::DuplicateId(_)
                | ShelfError::Parse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
