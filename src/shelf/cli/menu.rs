//! The interactive menus.
//!
//! A [`Session`] reads answers line by line from any `BufRead` and writes prompts and
//! results to any `Write`, so the same loop serves a terminal, a piped script, or a test.
//! Every choice becomes an [`Operation`] for [`ShelfApi::dispatch`]; an error from the
//! API is shown and the menu carries on. Only "Exit" or end of input ends the session,
//! and both save first.

use super::render::{write_book_line, write_book_table, write_fine, write_messages};
use colored::Colorize;
use shelf::api::{BookFilter, CmdResult, Operation, ShelfApi};
use shelf::dates;
use shelf::error::Result;
use shelf::model::BookId;
use shelf::store::DataStore;
use std::io::{self, BufRead, Write};

/// Whether the session should keep going after a menu returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, S: DataStore, R: BufRead, W: Write> {
    api: &'a mut ShelfApi<S>,
    input: R,
    out: W,
    admin_password: String,
}

impl<'a, S: DataStore, R: BufRead, W: Write> Session<'a, S, R, W> {
    pub fn new(api: &'a mut ShelfApi<S>, input: R, out: W, admin_password: String) -> Self {
        Self {
            api,
            input,
            out,
            admin_password,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(
                self.out,
                "\n=== Library Management System ===\n\
                 1. Admin\n\
                 2. Student\n\
                 3. Display All Books\n\
                 4. Exit\n"
            )?;
            let Some(choice) = self.prompt_number("Enter your choice: ")? else {
                return self.finish();
            };

            let flow = match choice {
                1 => self.admin_gate()?,
                2 => self.student_menu()?,
                3 => {
                    let result = self.api.dispatch(Operation::List {
                        filter: BookFilter::All,
                    });
                    self.show(result)?;
                    Flow::Continue
                }
                4 => return self.finish(),
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                return self.finish();
            }
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        self.save()?;
        writeln!(self.out, "Exiting...")?;
        self.out.flush()
    }

    fn save(&mut self) -> io::Result<()> {
        let result = self.api.dispatch(Operation::Save);
        self.show(result)
    }

    fn admin_gate(&mut self) -> io::Result<Flow> {
        let Some(password) = self.prompt_line("Enter admin password: ")? else {
            return Ok(Flow::Quit);
        };
        if password != self.admin_password {
            writeln!(self.out, "{}", "Incorrect password.".red())?;
            return Ok(Flow::Continue);
        }
        self.admin_menu()
    }

    fn admin_menu(&mut self) -> io::Result<Flow> {
        loop {
            write!(
                self.out,
                "\nAdmin Menu\n\
                 1. Add Book\n\
                 2. Number of Available Books\n\
                 3. Check for Fine\n\
                 4. Back to Main Menu\n"
            )?;
            let Some(choice) = self.prompt_number("Enter your choice: ")? else {
                return Ok(Flow::Quit);
            };

            let flow = match choice {
                1 => self.add_book()?,
                2 => {
                    let result = self.api.dispatch(Operation::CountAvailable);
                    self.show(result)?;
                    Flow::Continue
                }
                3 => self.run_for_id("Enter Book ID to check for fine: ", |id| {
                    Operation::CheckFine { id }
                })?,
                4 => {
                    self.save()?;
                    writeln!(self.out, "Returning to Main Menu...")?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(flow);
            }
        }
    }

    fn student_menu(&mut self) -> io::Result<Flow> {
        loop {
            write!(
                self.out,
                "\nStudent Menu\n\
                 1. Search for Book\n\
                 2. Issue Book\n\
                 3. Return Book\n\
                 4. Back to Main Menu\n"
            )?;
            let Some(choice) = self.prompt_number("Enter your choice: ")? else {
                return Ok(Flow::Quit);
            };

            let flow = match choice {
                1 => self.search_book()?,
                2 => self.issue_book()?,
                3 => {
                    self.run_for_id("Enter Book ID to return: ", |id| Operation::Return { id })?
                }
                4 => {
                    self.save()?;
                    writeln!(self.out, "Returning to Main Menu...")?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(flow);
            }
        }
    }

    fn add_book(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_number("Enter Book ID: ")? else {
            return Ok(Flow::Quit);
        };
        if self.api.id_exists(id) {
            writeln!(
                self.out,
                "{}",
                format!("A book with ID {} already exists.", id).yellow()
            )?;
            return Ok(Flow::Continue);
        }
        let Some(title) = self.prompt_line("Enter Book Title: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(author) = self.prompt_line("Enter Author: ")? else {
            return Ok(Flow::Quit);
        };

        let result = self.api.dispatch(Operation::Add { id, title, author });
        self.show(result)?;
        Ok(Flow::Continue)
    }

    fn issue_book(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_number("Enter Book ID to issue: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(due_date) = self.prompt_line("Enter Due Date (YYYY-MM-DD): ")? else {
            return Ok(Flow::Quit);
        };
        if !dates::is_valid_date(&due_date) {
            writeln!(
                self.out,
                "{}",
                "Invalid date. Use the format YYYY-MM-DD.".yellow()
            )?;
            return Ok(Flow::Continue);
        }

        let result = self.api.dispatch(Operation::Issue { id, due_date });
        self.show(result)?;
        Ok(Flow::Continue)
    }

    fn search_book(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_number("Enter Book ID: ")? else {
            return Ok(Flow::Quit);
        };
        match self.api.dispatch(Operation::Find { id }) {
            Ok(found) => {
                for book in &found.listed_books {
                    write_book_line(&mut self.out, book)?;
                }
            }
            Err(e) => self.show(Err(e))?,
        }
        Ok(Flow::Continue)
    }

    fn run_for_id(
        &mut self,
        prompt: &str,
        operation: impl FnOnce(BookId) -> Operation,
    ) -> io::Result<Flow> {
        let Some(id) = self.prompt_number(prompt)? else {
            return Ok(Flow::Quit);
        };
        let result = self.api.dispatch(operation(id));
        self.show(result)?;
        Ok(Flow::Continue)
    }

    fn show(&mut self, result: Result<CmdResult>) -> io::Result<()> {
        match result {
            Ok(result) => {
                if let Some(report) = &result.fine {
                    if result.affected_books.is_empty() {
                        write_fine(&mut self.out, report)?;
                    }
                }
                if !result.listed_books.is_empty() || result.messages.is_empty() {
                    write_book_table(&mut self.out, &result.listed_books)?;
                }
                write_messages(&mut self.out, &result.messages)
            }
            Err(e) if e.is_recoverable() => writeln!(self.out, "{}", e.to_string().yellow()),
            Err(e) => writeln!(self.out, "{}", e.to_string().red()),
        }
    }

    /// One line of input without its line ending, or `None` at end of input.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Keep asking until the answer is a whole number.
    fn prompt_number(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(answer) = self.prompt_line(prompt)? else {
                return Ok(None);
            };
            match answer.parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.out, "Please enter a number.")?,
            }
        }
    }
}
