use crate::commands::{persist, CmdMessage, CmdResult};
use crate::error::Result;
use crate::library::Library;
use crate::model::Book;
use crate::store::DataStore;

/// Starter books for a brand new library.
pub fn default_books() -> Vec<Book> {
    vec![
        Book::new(101, "The Great Gatsby", "F. Scott Fitzgerald"),
        Book::new(102, "To Kill a Mockingbird", "Harper Lee"),
        Book::new(103, "1984", "George Orwell"),
    ]
}

/// Stock an empty library with [`default_books`]. Does nothing if any book exists.
pub fn run<S: DataStore>(library: &mut Library<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !library.is_empty() {
        return Ok(result);
    }

    for book in default_books() {
        let added = library.add(book.title, book.author, book.id)?.clone();
        result.affected_books.push(added);
    }
    result.add_message(CmdMessage::info("Default books added for first run."));
    persist(library, &mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn seeds_empty_library() {
        let mut library = Library::new(InMemoryStore::new());
        let result = run(&mut library).unwrap();

        assert_eq!(result.affected_books.len(), 3);
        assert_eq!(library.store().lines().len(), 3);
        assert!(library.id_exists(103));
    }

    #[test]
    fn leaves_existing_library_alone() {
        let mut library = Library::new(InMemoryStore::new());
        library.add("Dune", "Frank Herbert", 1).unwrap();

        let result = run(&mut library).unwrap();
        assert!(result.affected_books.is_empty());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn fully_issued_library_is_not_reseeded() {
        let mut library = Library::new(InMemoryStore::new());
        library.add("Dune", "Frank Herbert", 101).unwrap();
        library.issue(101, "2024-01-01").unwrap();

        run(&mut library).unwrap();
        assert_eq!(library.len(), 1);
    }
}
