//! # Command Layer
//!
//! One module per user-facing operation. Each `run` takes the [`Library`] (and whatever
//! else it needs), does its work, and returns a [`CmdResult`]: the books it touched or
//! listed plus messages for the user. Nothing here prints.
//!
//! Commands that change the library save it straight away through [`persist`]. A failed
//! save does not undo the change or fail the command; it turns into an error message so
//! the session can keep going with the in-memory state.

use crate::config::ShelfConfig;
use crate::error::Result;
use crate::library::{Library, LoadReport};
use crate::model::{Book, BookId};
use crate::store::DataStore;
use std::path::PathBuf;

pub mod add;
pub mod available;
pub mod config;
pub mod find;
pub mod fine;
pub mod issue;
pub mod list;
pub mod return_book;
pub mod seed;

#[derive(Debug, Clone)]
pub struct ShelfPaths {
    /// Directory holding `config.json`.
    pub config_dir: PathBuf,
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a fine check found for one issued book.
#[derive(Debug, Clone, PartialEq)]
pub struct FineReport {
    pub book: Book,
    pub overdue_days: i64,
    pub fine: f64,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub listed_books: Vec<Book>,
    pub fine: Option<FineReport>,
    pub available: Option<usize>,
    pub config: Option<ShelfConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<Book>) -> Self {
        self.listed_books = books;
        self
    }

    pub fn with_fine(mut self, report: FineReport) -> Self {
        self.fine = Some(report);
        self
    }

    pub fn with_available(mut self, count: usize) -> Self {
        self.available = Some(count);
        self
    }

    pub fn with_config(mut self, config: ShelfConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// The enumerated set of things a session can ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Add {
        id: BookId,
        title: String,
        author: String,
    },
    Issue {
        id: BookId,
        due_date: String,
    },
    Return {
        id: BookId,
    },
    Find {
        id: BookId,
    },
    CheckFine {
        id: BookId,
    },
    List {
        filter: list::BookFilter,
    },
    CountAvailable,
    Save,
}

impl Operation {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Operation::Add { .. } | Operation::Issue { .. } | Operation::Return { .. }
        )
    }
}

/// Save after a change, reporting failure as a message rather than an error.
pub fn persist<S: DataStore>(library: &mut Library<S>, result: &mut CmdResult) {
    if let Err(e) = library.save() {
        result.add_message(CmdMessage::error(format!(
            "Could not save library to {}: {}",
            library.store().describe(),
            e
        )));
    }
}

/// Turn a load report into user-facing messages.
pub fn load_messages(report: &LoadReport, source: &str) -> Vec<CmdMessage> {
    let mut messages = Vec::new();
    if !report.source_found {
        messages.push(CmdMessage::info(format!(
            "No existing library data found at {}. Starting with an empty library.",
            source
        )));
        return messages;
    }

    messages.push(CmdMessage::info(format!(
        "Loaded {} book(s) from {}",
        report.loaded, source
    )));
    for skipped in &report.skipped {
        messages.push(CmdMessage::warning(format!(
            "Skipped line {}: {} ({})",
            skipped.line_number, skipped.reason, skipped.content
        )));
    }
    for id in &report.duplicate_ids {
        messages.push(CmdMessage::warning(format!(
            "Book id {} appears more than once; lookups use the first",
            id
        )));
    }
    messages
}
