// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Owner-scoped, in-memory view over a snapshot of transactions.
//!
//! Every filter returns a new `Ledger` and keeps the relative order of the
//! rows it retains, so filters can be chained in any order.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::Transaction;
use crate::period::{FinancialYear, MonthBucket, PeriodSelector};

/// Category selector. The literal `all` means no category filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Key(String),
}

impl CategoryFilter {
    pub fn matches(&self, category_key: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Key(k) => k == category_key,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Key(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Key(k) => f.write_str(k),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    owner_id: String,
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Builds a ledger for `owner_id`, dropping rows that belong to anyone else.
    pub fn new(owner_id: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        let owner_id = owner_id.into();
        let transactions = transactions
            .into_iter()
            .filter(|t| t.owner_id == owner_id)
            .collect();
        Ledger {
            owner_id,
            transactions,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn retain_where(&self, keep: impl Fn(&Transaction) -> bool) -> Ledger {
        Ledger {
            owner_id: self.owner_id.clone(),
            transactions: self.transactions.iter().filter(|t| keep(*t)).cloned().collect(),
        }
    }

    pub fn filter_by_month(&self, month: MonthBucket) -> Ledger {
        self.retain_where(|t| month.contains(t.date))
    }

    pub fn filter_by_financial_year(&self, fy: FinancialYear) -> Ledger {
        self.retain_where(|t| fy.contains(t.date))
    }

    pub fn filter_by_category(&self, filter: &CategoryFilter) -> Ledger {
        if *filter == CategoryFilter::All {
            return self.clone();
        }
        self.retain_where(|t| filter.matches(&t.category_key))
    }

    pub fn filter_by_period(&self, selector: &PeriodSelector) -> Ledger {
        match selector {
            PeriodSelector::All => self.clone(),
            PeriodSelector::Month(m) => self.filter_by_month(*m),
            PeriodSelector::FinancialYear(fy) => self.filter_by_financial_year(*fy),
        }
    }

    /// Stable sort on date; rows on the same day keep their snapshot order.
    pub fn sorted_by_date(&self, order: SortOrder) -> Ledger {
        let mut transactions = self.transactions.clone();
        match order {
            SortOrder::Ascending => transactions.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::Descending => transactions.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        Ledger {
            owner_id: self.owner_id.clone(),
            transactions,
        }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
