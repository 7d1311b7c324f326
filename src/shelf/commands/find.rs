use crate::commands::CmdResult;
use crate::error::{Result, ShelfError};
use crate::library::Library;
use crate::model::BookId;
use crate::store::DataStore;

pub fn run<S: DataStore>(library: &Library<S>, id: BookId) -> Result<CmdResult> {
    let book = library
        .find_by_id(id)
        .ok_or(ShelfError::BookNotFound(id))?;
    Ok(CmdResult::default().with_listed_books(vec![book.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{classic_books, library_with};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn finds_by_id() {
        let library = library_with(&classic_books());
        let result = run(&library, 102).unwrap();
        assert_eq!(result.listed_books[0].title, "To Kill a Mockingbird");
    }

    #[test]
    fn empty_library_finds_nothing() {
        let library = Library::new(InMemoryStore::new());
        assert!(matches!(run(&library, 101), Err(ShelfError::BookNotFound(101))));
    }
}
