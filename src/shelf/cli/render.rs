use colored::Colorize;
use shelf::api::{CmdMessage, FineReport, MessageLevel};
use shelf::config::ShelfConfig;
use shelf::model::Book;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 32;
const AUTHOR_WIDTH: usize = 24;

pub(super) fn write_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

pub(super) fn write_book_table<W: Write>(out: &mut W, books: &[Book]) -> io::Result<()> {
    if books.is_empty() {
        return writeln!(out, "No books found.");
    }

    writeln!(out, "Library Books:")?;
    writeln!(
        out,
        "{}",
        format!(
            "{:>id$}  {}  {}  Status",
            "ID",
            pad_to_width("Title", TITLE_WIDTH),
            pad_to_width("Author", AUTHOR_WIDTH),
            id = ID_WIDTH
        )
        .bold()
    )?;

    for book in books {
        let status = match book.due() {
            Some(due) => format!("Issued - Due: {}", due).yellow(),
            None if book.issued => "Issued".yellow(),
            None => "Available".green(),
        };
        writeln!(
            out,
            "{:>id$}  {}  {}  {}",
            book.id,
            pad_to_width(&truncate_to_width(&book.title, TITLE_WIDTH), TITLE_WIDTH),
            pad_to_width(&truncate_to_width(&book.author, AUTHOR_WIDTH), AUTHOR_WIDTH),
            status,
            id = ID_WIDTH
        )?;
    }
    Ok(())
}

/// One-line description used by search results.
pub(super) fn write_book_line<W: Write>(out: &mut W, book: &Book) -> io::Result<()> {
    let state = match book.due() {
        Some(due) => format!("(Issued - Due: {})", due),
        None if book.issued => "(Issued)".to_string(),
        None => "(Available)".to_string(),
    };
    writeln!(
        out,
        "Book found: {}, Author: {} {}",
        book.title.bold(),
        book.author,
        state
    )
}

pub(super) fn write_fine<W: Write>(out: &mut W, report: &FineReport) -> io::Result<()> {
    writeln!(out, "Book Title: {}", report.book.title)?;
    writeln!(out, "Due Date: {}", report.book.due_date)
}

pub(super) fn write_config<W: Write>(out: &mut W, config: &ShelfConfig) -> io::Result<()> {
    for key in shelf::config::CONFIG_KEYS {
        if let Ok(value) = config.get(key) {
            writeln!(out, "{} = {}", key, value)?;
        }
    }
    Ok(())
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
