use crate::commands::{persist, CmdMessage, CmdResult};
use crate::dates;
use crate::error::{Result, ShelfError};
use crate::library::Library;
use crate::model::BookId;
use crate::store::DataStore;

pub fn run<S: DataStore>(
    library: &mut Library<S>,
    id: BookId,
    due_date: &str,
) -> Result<CmdResult> {
    let due_date = due_date.trim();
    if !dates::is_valid_date(due_date) {
        return Err(ShelfError::Parse(format!(
            "Due date must be YYYY-MM-DD, got '{}'",
            due_date
        )));
    }

    let book = library.issue(id, due_date)?.clone();

    let mut result = CmdResult::default().with_affected_books(vec![book.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Book issued: {}, due {}",
        book.title, book.due_date
    )));
    persist(library, &mut result);
    Ok(result)
}
