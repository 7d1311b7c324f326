use crate::commands::{CmdMessage, CmdResult, FineReport};
use crate::error::{Result, ShelfError};
use crate::library::Library;
use crate::model::{BookId, FinePolicy};
use crate::store::DataStore;

/// Report what an issued book would owe on `today`, without returning it.
pub fn run<S: DataStore>(
    library: &Library<S>,
    id: BookId,
    today: &str,
    policy: &FinePolicy,
) -> Result<CmdResult> {
    let book = library
        .find_by_id(id)
        .ok_or(ShelfError::BookNotFound(id))?;
    if !book.issued {
        return Err(ShelfError::NotIssued(id));
    }

    let report = FineReport {
        book: book.clone(),
        overdue_days: book.overdue_days_as_of(today),
        fine: book.fine_as_of(today, policy),
    };

    let mut result = CmdResult::default();
    if report.fine > 0.0 {
        result.add_message(CmdMessage::warning(format!(
            "Fine Amount: ${:.2} ({} day(s) overdue)",
            report.fine, report.overdue_days
        )));
    } else {
        result.add_message(CmdMessage::info("No fines for this book."));
    }
    Ok(result.with_fine(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{classic_books, library_with};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn orwell_ten_days_late() {
        let mut library = Library::new(InMemoryStore::new());
        library.add("1984", "Orwell", 103).unwrap();
        library.issue(103, "2024-01-01").unwrap();

        let capped = run(&library, 103, "2024-01-11", &FinePolicy::capped()).unwrap();
        assert_eq!(capped.fine.unwrap().fine, 5.0);

        let uncapped = run(&library, 103, "2024-01-11", &FinePolicy::uncapped()).unwrap();
        assert_eq!(uncapped.fine.unwrap().fine, 100.0);
    }

    #[test]
    fn checking_does_not_return_the_book() {
        let mut library = library_with(&classic_books());
        library.issue(103, "2024-01-01").unwrap();
        run(&library, 103, "2024-01-11", &FinePolicy::capped()).unwrap();
        assert!(library.find_by_id(103).unwrap().issued);
    }

    #[test]
    fn not_issued_book_has_no_fine_to_check() {
        let library = library_with(&classic_books());
        assert!(matches!(
            run(&library, 101, "2024-01-11", &FinePolicy::capped()),
            Err(ShelfError::NotIssued(101))
        ));
    }

    #[test]
    fn book_not_yet_due_says_no_fines() {
        let mut library = library_with(&classic_books());
        library.issue(102, "2024-02-01").unwrap();
        let result = run(&library, 102, "2024-01-11", &FinePolicy::capped()).unwrap();
        assert_eq!(result.messages[0].content, "No fines for this book.");
    }
}
