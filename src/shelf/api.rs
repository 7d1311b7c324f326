//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It owns the [`Library`],
//! the active [`FinePolicy`] and the resolved paths, and is the one entry point every
//! session (interactive menu, one-shot subcommand, test harness) goes through.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs` and `library.rs`
//! - **I/O to the user**: No stdout or stderr, results come back as `CmdResult`
//!
//! ## Dispatch
//!
//! [`ShelfApi::dispatch`] maps an [`Operation`] to its command, so a session only has to
//! turn its input into an `Operation` and render whatever comes back.
//!
//! ## Generic Over DataStore
//!
//! `ShelfApi<S: DataStore>` is generic over the storage backend:
//! - Production: `ShelfApi<FileStore>`
//! - Testing: `ShelfApi<InMemoryStore>`

use crate::commands::{self, load_messages, persist};
use crate::dates;
use crate::error::Result;
use crate::library::Library;
use crate::model::{BookId, FinePolicy};
use crate::store::DataStore;
use tracing::debug;

pub struct ShelfApi<S: DataStore> {
    library: Library<S>,
    policy: FinePolicy,
    paths: ShelfPaths,
    today: Option<String>,
}

impl<S: DataStore> ShelfApi<S> {
    pub fn new(store: S, policy: FinePolicy, paths: ShelfPaths) -> Self {
        Self {
            library: Library::new(store),
            policy,
            paths,
            today: None,
        }
    }

    /// Pin "today" instead of reading the clock.
    pub fn with_today(mut self, today: impl Into<String>) -> Self {
        self.today = Some(today.into());
        self
    }

    pub fn today(&self) -> String {
        self.today.clone().unwrap_or_else(dates::current_date)
    }

    pub fn library(&self) -> &Library<S> {
        &self.library
    }

    pub fn policy(&self) -> &FinePolicy {
        &self.policy
    }

    pub fn paths(&self) -> &ShelfPaths {
        &self.paths
    }

    pub fn load(&mut self) -> Result<CmdResult> {
        let report = self.library.load()?;
        let mut result = CmdResult::default();
        for message in load_messages(&report, &self.library.store().describe()) {
            result.add_message(message);
        }
        Ok(result)
    }

    pub fn seed_if_empty(&mut self) -> Result<CmdResult> {
        commands::seed::run(&mut self.library)
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        persist(&mut self.library, &mut result);
        if !result.has_errors() {
            result.add_message(CmdMessage::info(format!(
                "Library data saved to {}",
                self.library.store().describe()
            )));
        }
        Ok(result)
    }

    pub fn id_exists(&self, id: BookId) -> bool {
        self.library.id_exists(id)
    }

    pub fn add_book(&mut self, id: BookId, title: String, author: String) -> Result<CmdResult> {
        commands::add::run(&mut self.library, id, title, author)
    }

    pub fn issue_book(&mut self, id: BookId, due_date: &str) -> Result<CmdResult> {
        commands::issue::run(&mut self.library, id, due_date)
    }

    pub fn return_book(&mut self, id: BookId) -> Result<CmdResult> {
        let today = self.today();
        commands::return_book::run(&mut self.library, id, &today, &self.policy)
    }

    pub fn find_book(&self, id: BookId) -> Result<CmdResult> {
        commands::find::run(&self.library, id)
    }

    pub fn check_fine(&self, id: BookId) -> Result<CmdResult> {
        commands::fine::run(&self.library, id, &self.today(), &self.policy)
    }

    pub fn list_books(&self, filter: BookFilter) -> Result<CmdResult> {
        commands::list::run(&self.library, filter)
    }

    pub fn count_available(&self) -> Result<CmdResult> {
        commands::available::run(&self.library)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn dispatch(&mut self, operation: Operation) -> Result<CmdResult> {
        debug!(?operation, mutating = operation.is_mutating(), "Dispatching");
        match operation {
            Operation::Add { id, title, author } => self.add_book(id, title, author),
            Operation::Issue { id, due_date } => self.issue_book(id, &due_date),
            Operation::Return { id } => self.return_book(id),
            Operation::Find { id } => self.find_book(id),
            Operation::CheckFine { id } => self.check_fine(id),
            Operation::List { filter } => self.list_books(filter),
            Operation::CountAvailable => self.count_available(),
            Operation::Save => self.save(),
        }
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::BookFilter;
pub use crate::commands::{CmdMessage, CmdResult, FineReport, MessageLevel, Operation, ShelfPaths};
