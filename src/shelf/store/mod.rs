//! # Storage Layer
//!
//! The [`DataStore`] trait is the raw persistence seam underneath [`crate::library::Library`].
//! A store only moves lines of text; parsing them into books and deciding what to keep is
//! the library's job.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production flat-file storage
//!   - One book per line: `id|title|author|issued|due_date`
//!   - The whole file is read or rewritten on every call, no handle is held in between
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can be told to fail writes, to exercise the "could not save" paths
//!
//! ## Missing Data
//!
//! A store that has never been written reports `Ok(None)` from [`DataStore::read_lines`].
//! That is a normal first run, not an error.
//!
//! ## Line Decoding
//!
//! Lines are decoded one at a time. A line that is not valid UTF-8 comes back as
//! [`StoredLine::Undecodable`] so the library can skip it without losing its neighbours.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// One line as read back from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredLine {
    Text(String),
    /// Not valid UTF-8. Holds a lossy rendering for reports.
    Undecodable(String),
}

impl StoredLine {
    /// Decode raw bytes, dropping a trailing `\r`.
    pub fn decode(bytes: &[u8]) -> Self {
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => StoredLine::Text(text.to_string()),
            Err(_) => StoredLine::Undecodable(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// Abstract interface for book line storage.
pub trait DataStore {
    /// All stored lines in order, or `None` when nothing has been stored yet.
    fn read_lines(&self) -> Result<Option<Vec<StoredLine>>>;

    /// Replace everything stored with `lines`.
    fn write_lines(&mut self, lines: &[String]) -> Result<()>;

    /// Human readable location, used in messages.
    fn describe(&self) -> String;
}
