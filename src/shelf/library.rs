//! The book collection and its persistence.
//!
//! [`Library`] keeps every [`Book`] in insertion order and writes the whole collection
//! back through its [`DataStore`] on [`Library::save`]. It knows nothing about menus or
//! terminals: every operation returns a value or a [`ShelfError`].
//!
//! Loading is tolerant. A line that does not parse is skipped and reported in the
//! [`LoadReport`], and the rest of the file still loads.

use crate::error::{Result, ShelfError};
use crate::model::{Book, BookId, FinePolicy};
use crate::store::{DataStore, StoredLine};
use std::collections::HashSet;
use tracing::{debug, error, warn};

/// A line from the data file that could not be turned into a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// False when no data existed yet.
    pub source_found: bool,
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
    pub duplicate_ids: Vec<BookId>,
}

/// Outcome of a successful return.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnReceipt {
    /// The book as it was while issued.
    pub book: Book,
    pub overdue_days: i64,
    pub fine: f64,
}

pub struct Library<S: DataStore> {
    books: Vec<Book>,
    store: S,
}

impl<S: DataStore> Library<S> {
    pub fn new(store: S) -> Self {
        Self {
            books: Vec::new(),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the in-memory collection with what the store holds.
    pub fn load(&mut self) -> Result<LoadReport> {
        self.books.clear();

        let Some(lines) = self.store.read_lines()? else {
            debug!(source = %self.store.describe(), "Starting with an empty library");
            return Ok(LoadReport::default());
        };

        let mut report = LoadReport {
            source_found: true,
            ..LoadReport::default()
        };
        let mut seen = HashSet::new();

        for (idx, line) in lines.into_iter().enumerate() {
            let line = match line {
                StoredLine::Text(text) => text,
                StoredLine::Undecodable(lossy) => {
                    warn!(line = idx + 1, "Skipping book line that is not valid UTF-8");
                    report.skipped.push(SkippedLine {
                        line_number: idx + 1,
                        content: lossy,
                        reason: "line is not valid UTF-8".to_string(),
                    });
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match Book::from_line(&line) {
                Ok(book) => {
                    if !seen.insert(book.id) {
                        warn!(id = book.id, "Duplicate book id in data file");
                        report.duplicate_ids.push(book.id);
                    }
                    self.books.push(book);
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!(line = idx + 1, error = %e, "Skipping malformed book line");
                    report.skipped.push(SkippedLine {
                        line_number: idx + 1,
                        content: line,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            source = %self.store.describe(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Loaded library"
        );
        Ok(report)
    }

    /// Rewrite the store with the current collection, in order.
    pub fn save(&mut self) -> Result<()> {
        let lines: Vec<String> = self.books.iter().map(Book::to_line).collect();
        self.store.write_lines(&lines).inspect_err(|e| {
            error!(store = %self.store.describe(), error = %e, "Could not save library");
        })
    }

    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        id: BookId,
    ) -> Result<&Book> {
        if self.id_exists(id) {
            return Err(ShelfError::DuplicateId(id));
        }
        self.books.push(Book::new(id, title, author));
        Ok(&self.books[self.books.len() - 1])
    }

    pub fn find_by_id(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    fn find_by_id_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    pub fn id_exists(&self, id: BookId) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn issue(&mut self, id: BookId, due_date: &str) -> Result<&Book> {
        let book = self
            .find_by_id_mut(id)
            .ok_or(ShelfError::BookNotFound(id))?;
        if book.issued {
            return Err(ShelfError::AlreadyIssued(id));
        }
        book.mark_issued(due_date);
        Ok(&*book)
    }

    /// Take a book back. The fine is reported, not collected.
    pub fn return_book(
        &mut self,
        id: BookId,
        today: &str,
        policy: &FinePolicy,
    ) -> Result<ReturnReceipt> {
        let book = self
            .find_by_id_mut(id)
            .ok_or(ShelfError::BookNotFound(id))?;
        if !book.issued {
            return Err(ShelfError::NotIssued(id));
        }

        let receipt = ReturnReceipt {
            book: book.clone(),
            overdue_days: book.overdue_days_as_of(today),
            fine: book.fine_as_of(today, policy),
        };
        book.mark_returned();
        Ok(receipt)
    }

    pub fn count_available(&self) -> usize {
        self.books.iter().filter(|b| b.is_available()).count()
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::NO_DUE_DATE;
    use crate::store::fs::FileStore;
    use crate::store::memory::fixtures::{classic_books, library_with};
    use crate::store::memory::InMemoryStore;

    fn empty() -> Library<InMemoryStore> {
        Library::new(InMemoryStore::new())
    }

    #[test]
    fn load_of_missing_data_is_empty_not_an_error() {
        let mut library = empty();
        let report = library.load().unwrap();
        assert!(!report.source_found);
        assert!(library.is_empty());
    }

    #[test]
    fn load_skips_bad_lines_and_keeps_going() {
        let store = InMemoryStore::with_lines([
            "101|The Great Gatsby|F. Scott Fitzgerald|0|N/A",
            "102|Only Three",
            "",
            "abc|Title|Author|0|N/A",
            "103|1984|George Orwell|1|2024-01-01",
        ]);
        let mut library = Library::new(store);
        let report = library.load().unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line_number, 2);
        assert_eq!(report.skipped[1].line_number, 4);
        assert_eq!(library.len(), 2);
        assert!(library.find_by_id(103).unwrap().issued);
    }

    #[test]
    fn one_good_line_and_one_short_line_loads_one_book() {
        let store = InMemoryStore::with_lines(["1|Dune|Frank Herbert|0|N/A", "2|Short|Line"]);
        let mut library = Library::new(store);
        let report = library.load().unwrap();

        assert_eq!(library.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("expected 5 fields"));
    }

    #[test]
    fn non_utf8_line_is_skipped_and_the_rest_loads() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("library_data.txt");
        std::fs::write(&path, b"1|Dune|Frank Herbert|0|N/A\n2|Bad\xff\xfe|X|0|N/A\n").unwrap();

        let mut library = Library::new(FileStore::new(&path));
        let report = library.load().unwrap();

        assert_eq!(library.len(), 1);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
        assert!(report.skipped[0].reason.contains("UTF-8"));
        assert_eq!(library.find_by_id(1).unwrap().title, "Dune");
    }

    #[test]
    fn load_replaces_previous_contents() {
        let mut library = library_with(&classic_books());
        library.add("Extra", "Someone", 999).unwrap();
        library.load().unwrap();
        assert_eq!(library.len(), 3);
        assert!(!library.id_exists(999));
    }

    #[test]
    fn load_reports_duplicate_ids_and_first_wins() {
        let store = InMemoryStore::with_lines(["5|First|A|0|N/A", "5|Second|B|0|N/A"]);
        let mut library = Library::new(store);
        let report = library.load().unwrap();

        assert_eq!(report.duplicate_ids, vec![5]);
        assert_eq!(library.len(), 2);
        assert_eq!(library.find_by_id(5).unwrap().title, "First");
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut library = empty();
        library.add("The Great Gatsby", "F. Scott Fitzgerald", 101).unwrap();
        library.add("1984", "George Orwell", 103).unwrap();
        library.add("To Kill a Mockingbird", "Harper Lee", 102).unwrap();
        library.issue(103, "2024-01-01").unwrap();
        library.save().unwrap();
        let before = library.list().to_vec();

        let lines = library.store().lines().to_vec();
        let mut reloaded = Library::new(InMemoryStore::with_lines(lines));
        reloaded.load().unwrap();
        assert_eq!(reloaded.list(), before.as_slice());
    }

    #[test]
    fn failed_save_keeps_memory_intact() {
        let mut library = Library::new(InMemoryStore::new().failing_writes());
        library.add("Dune", "Frank Herbert", 1).unwrap();

        let err = library.save().unwrap_err();
        assert!(matches!(err, ShelfError::Io(_)));
        assert!(library.id_exists(1));
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let mut library = library_with(&classic_books());
        let err = library.add("Another", "Author", 101).unwrap_err();
        assert!(matches!(err, ShelfError::DuplicateId(101)));
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut library = empty();
        library.add("C", "x", 3).unwrap();
        library.add("A", "x", 1).unwrap();
        library.add("B", "x", 2).unwrap();
        let ids: Vec<_> = library.list().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn find_on_empty_library_is_none() {
        let library = empty();
        assert!(library.find_by_id(0).is_none());
        assert!(library.find_by_id(103).is_none());
        assert!(!library.id_exists(-1));
    }

    #[test]
    fn issue_sets_flag_and_due_date() {
        let mut library = library_with(&classic_books());
        library.issue(102, "2024-06-01").unwrap();

        let book = library.find_by_id(102).unwrap();
        assert!(book.issued);
        assert_eq!(book.due_date, "2024-06-01");
    }

    #[test]
    fn issuing_an_issued_book_changes_nothing() {
        let mut library = library_with(&classic_books());
        library.issue(102, "2024-06-01").unwrap();

        let err = library.issue(102, "2025-01-01").unwrap_err();
        assert!(matches!(err, ShelfError::AlreadyIssued(102)));
        assert_eq!(library.find_by_id(102).unwrap().due_date, "2024-06-01");
    }

    #[test]
    fn issue_unknown_id_is_not_found() {
        let mut library = library_with(&classic_books());
        assert!(matches!(
            library.issue(7, "2024-06-01").unwrap_err(),
            ShelfError::BookNotFound(7)
        ));
    }

    #[test]
    fn return_resets_book_and_reports_fine() {
        let mut library = empty();
        library.add("1984", "Orwell", 103).unwrap();
        library.issue(103, "2024-01-01").unwrap();

        let receipt = library
            .return_book(103, "2024-01-11", &FinePolicy::capped())
            .unwrap();
        assert_eq!(receipt.overdue_days, 10);
        assert_eq!(receipt.fine, 5.0);
        assert_eq!(receipt.book.due_date, "2024-01-01");

        let book = library.find_by_id(103).unwrap();
        assert!(!book.issued);
        assert_eq!(book.due_date, NO_DUE_DATE);
    }

    #[test]
    fn return_of_available_book_is_not_issued() {
        let mut library = library_with(&classic_books());
        let err = library
            .return_book(101, "2024-01-11", &FinePolicy::capped())
            .unwrap_err();
        assert!(matches!(err, ShelfError::NotIssued(101)));
    }

    #[test]
    fn return_unknown_id_is_not_found() {
        let mut library = empty();
        let err = library
            .return_book(55, "2024-01-11", &FinePolicy::capped())
            .unwrap_err();
        assert!(matches!(err, ShelfError::BookNotFound(55)));
    }

    #[test]
    fn count_and_list_do_not_mutate() {
        let mut library = library_with(&classic_books());
        library.issue(101, "2024-06-01").unwrap();
        let snapshot = library.list().to_vec();

        assert_eq!(library.count_available(), 2);
        assert_eq!(library.count_available(), 2);
        assert_eq!(library.list(), snapshot.as_slice());
    }
}
