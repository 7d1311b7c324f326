//! # Shelf Architecture
//!
//! Shelf keeps the inventory of a small lending library: which books exist, which are
//! out, when they are due, and what a late return costs. Like most of our tools it is a
//! library that happens to have a CLI client, not the other way round.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Interactive menus and one-shot subcommands               │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Operation
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the Library, fine policy and paths                  │
//! │  - Dispatches Operations to commands                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation each, returns CmdResult                    │
//! │  - Saves after every change                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (library.rs) over Storage (store/)                 │
//! │  - Ordered books, id uniqueness, issue/return transitions   │
//! │  - DataStore trait: FileStore (production), InMemoryStore   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data File
//!
//! One book per line, `id|title|author|issued|due_date`, where `issued` is `1` or `0` and
//! `due_date` is `YYYY-MM-DD` or `N/A`. Fields are not escaped.
//!
//! ## Fines
//!
//! A fine is overdue calendar days times the configured rate, capped when a maximum is
//! set. It is computed against today's date every time it is asked for and is only ever
//! reported; nothing tracks payment.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`library`]: The in-memory collection and its load/save
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Book` and `FinePolicy`
//! - [`dates`]: Current date and overdue-day arithmetic
//! - [`config`]: Configuration management
//! - [`init`]: Path resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod init;
pub mod library;
pub mod model;
pub mod store;
