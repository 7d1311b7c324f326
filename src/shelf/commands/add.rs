use crate::commands::{persist, CmdMessage, CmdResult};
use crate::error::{Result, ShelfError};
use crate::library::Library;
use crate::model::{BookId, FIELD_DELIMITER};
use crate::store::DataStore;

pub fn run<S: DataStore>(
    library: &mut Library<S>,
    id: BookId,
    title: String,
    author: String,
) -> Result<CmdResult> {
    let title = title.trim().to_string();
    let author = author.trim().to_string();
    if title.is_empty() {
        return Err(ShelfError::Api("Title cannot be empty".into()));
    }
    check_field("Title", &title)?;
    check_field("Author", &author)?;

    let book = library.add(title, author, id)?.clone();

    let mut result = CmdResult::default().with_affected_books(vec![book.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Book added: {} ({})",
        book.title, book.id
    )));
    persist(library, &mut result);
    Ok(result)
}

/// Records are one line with `|` between fields and no escaping.
fn check_field(name: &str, value: &str) -> Result<()> {
    if value.contains(FIELD_DELIMITER) {
        return Err(ShelfError::Parse(format!(
            "{} cannot contain '{}'",
            name, FIELD_DELIMITER
        )));
    }
    if value.contains(['\n', '\r']) {
        return Err(ShelfError::Parse(format!(
            "{} cannot contain a line break",
            name
        )));
    }
    Ok(())
}
