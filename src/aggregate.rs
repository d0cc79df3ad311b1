// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Totals and breakdowns over transaction snapshots.
//!
//! Everything here is pure: inputs are borrowed, never mutated, and every
//! call recomputes from the snapshot it is given.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::ledger::Ledger;
use crate::models::{Category, HasAmount, Receivable, Transaction};
use crate::period::{FinancialYear, MonthBucket, PeriodSelector};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinancialYearTotal {
    pub financial_year: FinancialYear,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    pub month: MonthBucket,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    pub period: PeriodSelector,
    pub total: i64,
    pub ranked_breakdown: Vec<CategoryTotal>,
    pub available_financial_years: Vec<FinancialYear>,
}

/// Sum of amounts; 0 for an empty slice. Saturates at `i64::MAX`.
pub fn total_amount<T: HasAmount>(items: &[T]) -> i64 {
    items
        .iter()
        .fold(0i64, |acc, item| acc.saturating_add(item.amount()))
}

fn add_to(slot: &mut i64, amount: i64) {
    *slot = slot.saturating_add(amount);
}

/// Category key to summed amount. Keys with no rows are absent, not 0.
pub fn totals_by_category(transactions: &[Transaction]) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for t in transactions {
        add_to(totals.entry(t.category_key.clone()).or_insert(0), t.amount);
    }
    totals
}

/// Every category with its total (0 when it has no rows), largest first.
/// Equal totals keep the order of `categories`.
pub fn ranked_category_totals(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategoryTotal> {
    let totals = totals_by_category(transactions);
    let orphans = unknown_category_keys(transactions, categories);
    if !orphans.is_empty() {
        debug!(keys = ?orphans, "ignoring totals for unknown category keys");
    }

    let mut ranked: Vec<CategoryTotal> = categories
        .iter()
        .map(|c| CategoryTotal {
            category: c.clone(),
            total: totals.get(&c.id).copied().unwrap_or(0),
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked
}

/// Distinct category keys referenced by transactions but missing from
/// `categories`, in key order.
pub fn unknown_category_keys(transactions: &[Transaction], categories: &[Category]) -> Vec<String> {
    let known: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();
    transactions
        .iter()
        .filter(|t| !known.contains(t.category_key.as_str()))
        .map(|t| t.category_key.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct financial years present, most recent first.
pub fn available_financial_years(transactions: &[Transaction]) -> Vec<FinancialYear> {
    let years: BTreeSet<FinancialYear> = transactions
        .iter()
        .map(|t| FinancialYear::of(t.date))
        .collect();
    years.into_iter().rev().collect()
}

/// One entry per financial year present, largest total first. Ties keep
/// the most-recent-first order.
pub fn financial_year_totals(transactions: &[Transaction]) -> Vec<FinancialYearTotal> {
    let mut sums: BTreeMap<FinancialYear, i64> = BTreeMap::new();
    for t in transactions {
        add_to(sums.entry(FinancialYear::of(t.date)).or_insert(0), t.amount);
    }
    let mut out: Vec<FinancialYearTotal> = sums
        .into_iter()
        .rev()
        .map(|(financial_year, total)| FinancialYearTotal {
            financial_year,
            total,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}

/// Month to summed amount, in calendar order.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthTotal> {
    let mut sums: BTreeMap<MonthBucket, i64> = BTreeMap::new();
    for t in transactions {
        add_to(sums.entry(MonthBucket::of(t.date)).or_insert(0), t.amount);
    }
    sums.into_iter()
        .map(|(month, total)| MonthTotal { month, total })
        .collect()
}

/// Receivables with the largest amount first.
pub fn receivables_by_amount(receivables: &[Receivable]) -> Vec<Receivable> {
    let mut out = receivables.to_vec();
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    out
}

/// Headline total and ranked breakdown for one period. The financial-year
/// list is taken from the whole ledger, not the filtered slice.
pub fn compute_dashboard_totals(
    ledger: &Ledger,
    categories: &[Category],
    selector: &PeriodSelector,
) -> DashboardTotals {
    let scoped = ledger.filter_by_period(selector);
    let totals = DashboardTotals {
        period: *selector,
        total: total_amount(scoped.transactions()),
        ranked_breakdown: ranked_category_totals(scoped.transactions(), categories),
        available_financial_years: available_financial_years(ledger.transactions()),
    };
    debug!(
        owner = ledger.owner_id(),
        period = %selector,
        rows = scoped.len(),
        total = totals.total,
        "computed dashboard totals"
    );
    totals
}
