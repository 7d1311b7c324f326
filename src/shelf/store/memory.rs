use super::{DataStore, StoredLine};
use crate::error::{Result, ShelfError};
use std::io;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    lines: Option<Vec<String>>,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `lines`, as if a data file existed.
    pub fn with_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            lines: Some(lines.into_iter().map(Into::into).collect()),
            fail_writes: false,
        }
    }

    /// Every write fails with a permission error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn lines(&self) -> &[String] {
        self.lines.as_deref().unwrap_or_default()
    }
}

impl DataStore for InMemoryStore {
    fn read_lines(&self) -> Result<Option<Vec<StoredLine>>> {
        Ok(self
            .lines
            .as_ref()
            .map(|lines| lines.iter().cloned().map(StoredLine::Text).collect()))
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        if self.fail_writes {
            return Err(ShelfError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "in-memory store is read-only",
            )));
        }
        self.lines = Some(lines.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::library::Library;
    use crate::model::Book;

    /// A loaded library over an in-memory store, seeded with the given books.
    pub fn library_with(books: &[Book]) -> Library<InMemoryStore> {
        let store = InMemoryStore::with_lines(books.iter().map(Book::to_line));
        let mut library = Library::new(store);
        library.load().unwrap();
        library
    }

    /// Gatsby (101), Mockingbird (102) and 1984 (103), all on the shelf.
    pub fn classic_books() -> Vec<Book> {
        crate::commands::seed::default_books()
    }
}
