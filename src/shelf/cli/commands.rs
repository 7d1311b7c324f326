//! # CLI Layer
//!
//! This module is **one possible UI client** for shelf. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Parses arguments
//! - Formats output for human consumption
//!
//! With no subcommand the interactive [`Session`] runs over stdin/stdout. Each
//! subcommand is one [`Operation`] run against the same API, which makes the binary
//! scriptable. Subcommand failures propagate to `main`, which prints them and exits
//! non-zero; the interactive session reports them and keeps going.

use super::logging::init_logging;
use super::menu::Session;
use super::render::{write_book_table, write_config, write_fine, write_messages};
use super::setup::{Cli, Commands};
use clap::Parser;
use shelf::api::{BookFilter, CmdResult, ConfigAction, MessageLevel, Operation, ShelfApi};
use shelf::config::ShelfConfig;
use shelf::error::Result;
use shelf::init::initialize;
use shelf::store::fs::FileStore;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

struct AppContext {
    api: ShelfApi<FileStore>,
    config: ShelfConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        None | Some(Commands::Menu) => handle_menu(&mut ctx),
        Some(Commands::List { available, issued }) => {
            let filter = if available {
                BookFilter::Available
            } else if issued {
                BookFilter::Issued
            } else {
                BookFilter::All
            };
            handle_operation(&mut ctx, Operation::List { filter })
        }
        Some(Commands::Add { id, title, author }) => {
            handle_operation(&mut ctx, Operation::Add { id, title, author })
        }
        Some(Commands::Find { id }) => handle_operation(&mut ctx, Operation::Find { id }),
        Some(Commands::Issue { id, due }) => handle_operation(
            &mut ctx,
            Operation::Issue {
                id,
                due_date: due,
            },
        ),
        Some(Commands::Return { id }) => handle_operation(&mut ctx, Operation::Return { id }),
        Some(Commands::Fine { id }) => handle_operation(&mut ctx, Operation::CheckFine { id }),
        Some(Commands::Available) => handle_operation(&mut ctx, Operation::CountAvailable),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.global, cli.file.as_deref())?;
    info!(data_file = %ctx.api.paths().data_file.display(), "Using data file");

    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let loaded = ctx.api.load()?;
    write_messages(&mut out, &loaded.messages)?;

    if ctx.config.seed_defaults {
        let seeded = ctx.api.seed_if_empty()?;
        write_messages(&mut out, &seeded.messages)?;
    }

    let stdin = io::stdin();
    let password = ctx.config.admin_password.clone();
    Session::new(&mut ctx.api, stdin.lock(), out, password).run()?;
    Ok(())
}

fn handle_operation(ctx: &mut AppContext, operation: Operation) -> Result<()> {
    let loaded = ctx.api.load()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    // Only problems with the data file are worth mentioning on a one-shot command
    let warnings: Vec<_> = loaded
        .messages
        .into_iter()
        .filter(|m| m.level != MessageLevel::Info)
        .collect();
    write_messages(&mut out, &warnings)?;

    let is_list = matches!(operation, Operation::List { .. } | Operation::Find { .. });
    let result = ctx.api.dispatch(operation)?;
    print_result(&mut out, &result, is_list)?;
    Ok(())
}

fn print_result<W: Write>(out: &mut W, result: &CmdResult, is_list: bool) -> io::Result<()> {
    if is_list {
        write_book_table(out, &result.listed_books)?;
    }
    if let Some(report) = &result.fine {
        if result.affected_books.is_empty() {
            write_fine(out, report)?;
        }
    }
    write_messages(out, &result.messages)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            write_config(&mut out, config)?;
        }
    }
    write_messages(&mut out, &result.messages)?;
    Ok(())
}
