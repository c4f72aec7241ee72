// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar helpers: the selected month and the week-of-month bucket.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// The selected (year, month) every derivation reads. `month` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthFilter {
    year: i32,
    month: u32,
    #[serde(skip)]
    start: NaiveDate,
    #[serde(skip)]
    end: NaiveDate,
}

impl MonthFilter {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if month > 11 {
            return Err(anyhow!("Invalid month index {} (expected 0-11)", month));
        }
        let start = NaiveDate::from_ymd_opt(year, month + 1, 1)
            .ok_or_else(|| anyhow!("Invalid month {}-{:02}", year, month + 1))?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| anyhow!("Month {}-{:02} has no end", year, month + 1))?;
        Ok(MonthFilter {
            year,
            month,
            start,
            end,
        })
    }

    /// Parses `YYYY-MM` with a 1-based month, as typed on the command line.
    pub fn parse(s: &str) -> Result<Self> {
        let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        MonthFilter::new(d.year(), d.month0())
    }

    pub fn current() -> Result<Self> {
        let today = Local::now().date_naive();
        MonthFilter::new(today.year(), today.month0())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start
    }

    /// Last calendar day of the month. Dates carry no time of day, so
    /// "on or before the month end" is a plain date comparison.
    pub fn month_end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    pub fn is_on_or_before_end(&self, date: NaiveDate) -> bool {
        date <= self.end
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month + 1)
    }
}

/// `ceil(day / 7)`, so days 29-31 land in week 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekBucket(u32);

impl WeekBucket {
    pub fn of(date: NaiveDate) -> Self {
        WeekBucket(date.day().div_ceil(7))
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for WeekBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Week {}", self.0)
    }
}

impl Serialize for WeekBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
