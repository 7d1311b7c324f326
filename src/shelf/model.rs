use crate::dates::{self, NO_DUE_DATE};
use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type BookId = i64;

/// Field separator in the data file. Values are written as-is, so a title containing
/// it will not load back.
pub const FIELD_DELIMITER: char = '|';
const FIELD_COUNT: usize = 5;

/// How overdue days turn into money.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinePolicy {
    pub rate_per_day: f64,
    /// `None` leaves the fine uncapped.
    pub max_fine: Option<f64>,
}

impl FinePolicy {
    /// 0.50 per day, never more than 10.00. The default.
    pub fn capped() -> Self {
        Self {
            rate_per_day: 0.50,
            max_fine: Some(10.00),
        }
    }

    /// 10.0 per day with no ceiling.
    pub fn uncapped() -> Self {
        Self {
            rate_per_day: 10.0,
            max_fine: None,
        }
    }

    pub fn apply(&self, overdue_days: i64) -> f64 {
        if overdue_days <= 0 {
            return 0.0;
        }
        let fine = overdue_days as f64 * self.rate_per_day;
        match self.max_fine {
            Some(max) if fine > max => max,
            _ => fine,
        }
    }
}

impl Default for FinePolicy {
    fn default() -> Self {
        Self::capped()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub issued: bool,
    pub due_date: String,
}

impl Book {
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            issued: false,
            due_date: NO_DUE_DATE.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        !self.issued
    }

    /// The due date, if one applies.
    pub fn due(&self) -> Option<&str> {
        if self.issued && !dates::is_no_due_date(&self.due_date) {
            Some(&self.due_date)
        } else {
            None
        }
    }

    pub fn overdue_days_as_of(&self, today: &str) -> i64 {
        if !self.issued {
            return 0;
        }
        dates::overdue_days(today, &self.due_date)
    }

    /// Fine owed if the book came back on `today`.
    pub fn fine_as_of(&self, today: &str, policy: &FinePolicy) -> f64 {
        policy.apply(self.overdue_days_as_of(today))
    }

    /// Fine owed right now. Reads the clock, so the answer changes at midnight.
    pub fn calculate_fine(&self, policy: &FinePolicy) -> f64 {
        self.fine_as_of(&dates::current_date(), policy)
    }

    pub(crate) fn mark_issued(&mut self, due_date: &str) {
        self.issued = true;
        self.due_date = due_date.to_string();
    }

    pub(crate) fn mark_returned(&mut self) {
        self.issued = false;
        self.due_date = NO_DUE_DATE.to_string();
    }

    /// `id|title|author|issued|due_date`, the data file's line format.
    pub fn to_line(&self) -> String {
        format!(
            "{id}{d}{title}{d}{author}{d}{flag}{d}{due}",
            id = self.id,
            title = self.title,
            author = self.author,
            flag = if self.issued { "1" } else { "0" },
            due = self.due_date,
            d = FIELD_DELIMITER,
        )
    }

    pub fn from_line(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if parts.len() != FIELD_COUNT {
            return Err(ShelfError::Parse(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                parts.len()
            )));
        }

        let id = parts[0]
            .trim()
            .parse::<BookId>()
            .map_err(|_| ShelfError::Parse(format!("invalid book id '{}'", parts[0])))?;

        Ok(Self {
            id,
            title: parts[1].to_string(),
            author: parts[2].to_string(),
            issued: parts[3] == "1",
            due_date: parts[4].to_string(),
        })
    }
}

impl FromStr for Book {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        Book::from_line(s)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.id)
    }
}
