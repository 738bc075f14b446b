use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::BqCostError;

/// Which calendar month a report covers, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSelector {
    Current,
    Last,
}

impl MonthSelector {
    /// Parse a selector token. This is the single parsing path: the CLI
    /// wires it in as its value parser, so any other token is rejected
    /// before the pipeline runs.
    pub fn parse(s: &str) -> Result<Self, BqCostError> {
        match s {
            "current" => Ok(MonthSelector::Current),
            "last" => Ok(MonthSelector::Last),
            other => Err(BqCostError::InvalidMonth(other.to_string())),
        }
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::Current => write!(f, "current"),
            MonthSelector::Last => write!(f, "last"),
        }
    }
}

/// A half-open date interval covering exactly one calendar month:
/// start inclusive, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Compute the range for the selected month relative to `today`.
    ///
    /// `Current` spans from day 1 of today's month to day 1 of the next;
    /// `Last` spans from day 1 of the previous month to day 1 of today's.
    pub fn for_month(selector: MonthSelector, today: NaiveDate) -> Self {
        let this_month = first_of_month(today.year(), today.month());
        match selector {
            MonthSelector::Current => DateRange {
                start: this_month,
                end: next_month(this_month),
            },
            MonthSelector::Last => DateRange {
                start: previous_month(this_month),
                end: this_month,
            },
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Day 1 exists in every month of every year.
    NaiveDate::from_ymd_opt(year, month, 1).expect("day 1 is always a valid date")
}

fn next_month(first: NaiveDate) -> NaiveDate {
    match first.month() {
        12 => first_of_month(first.year() + 1, 1),
        m => first_of_month(first.year(), m + 1),
    }
}

fn previous_month(first: NaiveDate) -> NaiveDate {
    match first.month() {
        1 => first_of_month(first.year() - 1, 12),
        m => first_of_month(first.year(), m - 1),
    }
}
