// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar-month and Indian financial-year (April to March) buckets.
//!
//! Dates are plain calendar dates; nothing here knows about time zones.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{LedgerError, Result};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));
static MONTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("month pattern"));
static FY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("fy pattern"));
// anything shaped like a month, valid or not
static MONTHISH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,4}-\d{1,2}$").expect("month-like pattern"));

/// First month of the financial year (April).
pub const FY_START_MONTH: u32 = 4;

/// Earliest and latest financial-year start with a four-digit `YYYY-YYYY`
/// label: `0000-0001` through `9998-9999`.
pub const FIRST_FY_START: i32 = 0;
pub const LAST_FY_START: i32 = 9998;

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if !DATE_RE.is_match(s) {
        return Err(LedgerError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .filter(|d| FinancialYear::of(*d).is_supported())
        .ok_or_else(|| LedgerError::InvalidDate(s.to_string()))
}

/// Rejects dates whose financial year falls outside
/// `FIRST_FY_START..=LAST_FY_START` (0000-04-01 through 9999-03-31).
pub fn check_date(date: NaiveDate) -> Result<NaiveDate> {
    if FinancialYear::of(date).is_supported() {
        Ok(date)
    } else {
        Err(LedgerError::InvalidDate(date.to_string()))
    }
}

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthBucket(NaiveDate);

impl MonthBucket {
    pub fn of(date: NaiveDate) -> Self {
        // day 1 exists in every month
        MonthBucket(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        MonthBucket::of(date) == *self
    }

    pub fn prev(&self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .map(MonthBucket)
            .unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map(MonthBucket)
            .unwrap_or(*self)
    }

    pub fn financial_year(&self) -> FinancialYear {
        FinancialYear::of(self.0)
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthBucket {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let caps = MONTH_RE
            .captures(s)
            .ok_or_else(|| LedgerError::InvalidMonth(s.to_string()))?;
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| LedgerError::InvalidMonth(s.to_string()))?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| LedgerError::InvalidMonth(s.to_string()))?;
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(MonthBucket)
            .filter(|m| m.financial_year().is_supported())
            .ok_or_else(|| LedgerError::InvalidMonth(s.to_string()))
    }
}

impl Serialize for MonthBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// April 1 of `start_year` through March 31 of the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    pub fn new(start_year: i32) -> Self {
        FinancialYear { start_year }
    }

    pub fn of(date: NaiveDate) -> Self {
        if date.month() >= FY_START_MONTH {
            FinancialYear::new(date.year())
        } else {
            FinancialYear::new(date.year() - 1)
        }
    }

    /// Whether the label is a pair of four-digit years.
    pub fn is_supported(&self) -> bool {
        (FIRST_FY_START..=LAST_FY_START).contains(&self.start_year)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.start_year + 1
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year, FY_START_MONTH, 1)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.end_year(), FY_START_MONTH - 1, 31)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        FinancialYear::of(date) == *self
    }

    pub fn prev(&self) -> Self {
        FinancialYear::new(self.start_year - 1)
    }

    pub fn next(&self) -> Self {
        FinancialYear::new(self.start_year + 1)
    }

    /// `2024-2025` becomes `24-25`.
    pub fn short(&self) -> String {
        format!(
            "{:02}-{:02}",
            self.start_year.rem_euclid(100),
            self.end_year().rem_euclid(100)
        )
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:04}", self.start_year, self.end_year())
    }
}

impl FromStr for FinancialYear {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || LedgerError::InvalidFinancialYear(s.to_string());
        let caps = FY_RE.captures(s).ok_or_else(bad)?;
        let start: i32 = caps[1].parse().map_err(|_| bad())?;
        let end: i32 = caps[2].parse().map_err(|_| bad())?;
        if end != start + 1 {
            return Err(bad());
        }
        Ok(FinancialYear::new(start))
    }
}

impl Serialize for FinancialYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn month_bucket(date: NaiveDate) -> MonthBucket {
    MonthBucket::of(date)
}

pub fn financial_year_bucket(date: NaiveDate) -> FinancialYear {
    FinancialYear::of(date)
}

/// Shortens a `YYYY-YYYY` label to the last two characters of each year.
pub fn format_financial_year_short(bucket: &str) -> Result<String> {
    let parts: Vec<&str> = bucket.trim().split('-').collect();
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(LedgerError::InvalidFinancialYear(bucket.to_string()));
    }
    let tail = |p: &str| {
        let skip = p.chars().count().saturating_sub(2);
        p.chars().skip(skip).collect::<String>()
    };
    Ok(format!("{}-{}", tail(parts[0]), tail(parts[1])))
}

/// Which slice of time a report or listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodSelector {
    #[default]
    All,
    Month(MonthBucket),
    FinancialYear(FinancialYear),
}

impl PeriodSelector {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            PeriodSelector::All => true,
            PeriodSelector::Month(m) => m.contains(date),
            PeriodSelector::FinancialYear(fy) => fy.contains(date),
        }
    }

    /// Human label used in report headings.
    pub fn label(&self) -> String {
        match self {
            PeriodSelector::All => "All Years".to_string(),
            PeriodSelector::Month(m) => m.to_string(),
            PeriodSelector::FinancialYear(fy) => format!("FY {}", fy.short()),
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodSelector::All => f.write_str("all"),
            PeriodSelector::Month(m) => fmt::Display::fmt(m, f),
            PeriodSelector::FinancialYear(fy) => fmt::Display::fmt(fy, f),
        }
    }
}

impl FromStr for PeriodSelector {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Ok(PeriodSelector::All)
        } else if MONTHISH_RE.is_match(s) {
            s.parse().map(PeriodSelector::Month)
        } else {
            s.parse().map(PeriodSelector::FinancialYear)
        }
    }
}

impl Serialize for PeriodSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Date a new entry starts with while `selected` is on screen: today when
/// looking at the current month, otherwise the 1st of the selected month.
pub fn default_entry_date(selected: MonthBucket, today: NaiveDate) -> NaiveDate {
    if selected.contains(today) {
        today
    } else {
        selected.first_day()
    }
}
