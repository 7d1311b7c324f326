use clap::{Parser, Subcommand};
use shelf::model::BookId;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "shelf", bin_name = "shelf", version = get_version())]
#[command(about = "Book inventory for a small lending library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data file to use instead of the configured one
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Use the global data directory instead of the current one
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (the default)
    Menu,

    /// List books
    #[command(alias = "ls")]
    List {
        /// Only books on the shelf
        #[arg(long, conflicts_with = "issued")]
        available: bool,

        /// Only books that are out
        #[arg(long)]
        issued: bool,
    },

    /// Add a book
    Add {
        /// Unique book id
        id: BookId,

        /// Title of the book
        title: String,

        /// Author of the book
        author: String,
    },

    /// Show one book
    Find { id: BookId },

    /// Issue a book until a due date
    Issue {
        id: BookId,

        /// Due date, YYYY-MM-DD
        due: String,
    },

    /// Return an issued book, reporting any fine
    Return { id: BookId },

    /// Check the fine an issued book has built up
    Fine { id: BookId },

    /// Count books on the shelf
    Available,

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, fine-rate, max-fine, admin-password, seed-defaults)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
