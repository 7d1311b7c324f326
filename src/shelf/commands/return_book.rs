use crate::commands::{persist, CmdMessage, CmdResult, FineReport};
use crate::error::Result;
use crate::library::Library;
use crate::model::{BookId, FinePolicy};
use crate::store::DataStore;

pub fn run<S: DataStore>(
    library: &mut Library<S>,
    id: BookId,
    today: &str,
    policy: &FinePolicy,
) -> Result<CmdResult> {
    let receipt = library.return_book(id, today, policy)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book returned: {}",
        receipt.book.title
    )));
    if receipt.fine > 0.0 {
        result.add_message(CmdMessage::warning(format!(
            "Returned {} day(s) late. Fine due: ${:.2}",
            receipt.overdue_days, receipt.fine
        )));
    }

    if let Some(book) = library.find_by_id(id) {
        result.affected_books.push(book.clone());
    }
    result.fine = Some(FineReport {
        book: receipt.book,
        overdue_days: receipt.overdue_days,
        fine: receipt.fine,
    });
    persist(library, &mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::NO_DUE_DATE;
    use crate::error::ShelfError;
    use crate::store::memory::fixtures::{classic_books, library_with};

    #[test]
    fn late_return_reports_fine() {
        let mut library = library_with(&classic_books());
        library.issue(103, "2024-01-01").unwrap();

        let result = run(&mut library, 103, "2024-01-11", &FinePolicy::capped()).unwrap();
        let report = result.fine.unwrap();
        assert_eq!(report.fine, 5.0);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("Fine due: $5.00")));
        assert_eq!(result.affected_books[0].due_date, NO_DUE_DATE);
    }

    #[test]
    fn on_time_return_has_no_fine_message() {
        let mut library = library_with(&classic_books());
        library.issue(101, "2024-01-20").unwrap();

        let result = run(&mut library, 101, "2024-01-11", &FinePolicy::uncapped()).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.fine.unwrap().fine, 0.0);
    }

    #[test]
    fn return_is_saved() {
        let mut library = library_with(&classic_books());
        library.issue(102, "2024-01-01").unwrap();
        run(&mut library, 102, "2024-01-02", &FinePolicy::capped()).unwrap();

        assert!(library
            .store()
            .lines()
            .contains(&"102|To Kill a Mockingbird|Harper Lee|0|N/A".to_string()));
    }

    #[test]
    fn not_issued_book_is_an_error() {
        let mut library = library_with(&classic_books());
        let err = run(&mut library, 101, "2024-01-11", &FinePolicy::capped()).unwrap_err();
        assert!(matches!(err, ShelfError::NotIssued(101)));
    }
}
