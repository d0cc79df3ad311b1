// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    self, DashboardTotals, FinancialYearTotal, MonthTotal, compute_dashboard_totals, total_amount,
};
use crate::commands::transactions::category_filter;
use crate::ledger::{CategoryFilter, SortOrder};
use crate::models::{Transaction, TransactionKind};
use crate::period::{MonthBucket, PeriodSelector, default_entry_date};
use crate::store;
use crate::utils::{fmt_inr, kind_arg, maybe_print_json, month_arg, period_arg, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(conn, owner, sub)?,
        Some(("by-category", sub)) => by_category(conn, owner, sub)?,
        Some(("years", sub)) => years(conn, owner, sub)?,
        Some(("monthly", sub)) => monthly(conn, owner, sub)?,
        Some(("statement", sub)) => statement(conn, owner, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct KindSummary {
    pub kind: TransactionKind,
    #[serde(flatten)]
    pub totals: DashboardTotals,
}

#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub month: MonthBucket,
    pub prev_month: MonthBucket,
    pub next_month: MonthBucket,
    pub default_entry_date: NaiveDate,
    pub kinds: Vec<KindSummary>,
    pub receivables_total: i64,
}

/// Month totals for every kind plus what is still owed to the owner.
pub fn dashboard_report(
    conn: &Connection,
    owner: &str,
    month: MonthBucket,
    today: NaiveDate,
) -> Result<DashboardReport> {
    let mut kinds = Vec::new();
    for kind in TransactionKind::ALL {
        kinds.push(KindSummary {
            kind,
            totals: category_report(conn, owner, kind, &PeriodSelector::Month(month))?,
        });
    }
    let receivables = store::list_receivables(conn, owner)?;
    Ok(DashboardReport {
        month,
        prev_month: month.prev(),
        next_month: month.next(),
        default_entry_date: default_entry_date(month, today),
        kinds,
        receivables_total: total_amount(&receivables),
    })
}

pub fn category_report(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    period: &PeriodSelector,
) -> Result<DashboardTotals> {
    let ledger = store::load_ledger(conn, owner, kind)?;
    let categories = store::list_categories(conn, owner, kind)?;
    Ok(compute_dashboard_totals(&ledger, &categories, period))
}

pub fn year_report(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
) -> Result<Vec<FinancialYearTotal>> {
    let ledger = store::load_ledger(conn, owner, kind)?;
    Ok(aggregate::financial_year_totals(ledger.transactions()))
}

/// The most recent `months` months that have entries, newest first.
pub fn monthly_report(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    months: usize,
) -> Result<Vec<MonthTotal>> {
    let ledger = store::load_ledger(conn, owner, kind)?;
    Ok(aggregate::monthly_totals(ledger.transactions())
        .into_iter()
        .rev()
        .take(months)
        .collect())
}

#[derive(Debug, Serialize)]
pub struct Statement {
    pub kind: TransactionKind,
    pub month: MonthBucket,
    pub prev_month: MonthBucket,
    pub next_month: MonthBucket,
    pub category: Option<String>,
    pub total: i64,
    pub count: usize,
    pub entries: Vec<Transaction>,
}

/// Entries for one month. The whole-month view runs oldest first; a single
/// category view runs newest first.
pub fn statement_for(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    month: MonthBucket,
    category: Option<&str>,
) -> Result<Statement> {
    let filter = match category {
        Some(name) => category_filter(conn, owner, kind, name)?,
        None => CategoryFilter::All,
    };
    let order = match filter {
        CategoryFilter::All => SortOrder::Ascending,
        CategoryFilter::Key(_) => SortOrder::Descending,
    };
    let ledger = store::load_ledger(conn, owner, kind)?
        .filter_by_month(month)
        .filter_by_category(&filter)
        .sorted_by_date(order);
    Ok(Statement {
        kind,
        month,
        prev_month: month.prev(),
        next_month: month.next(),
        category: category.map(|c| c.trim().to_string()),
        total: total_amount(ledger.transactions()),
        count: ledger.len(),
        entries: ledger.into_transactions(),
    })
}

fn dashboard(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let report = dashboard_report(conn, owner, month, today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let rows = report
        .kinds
        .iter()
        .map(|k| {
            let top = k
                .totals
                .ranked_breakdown
                .first()
                .filter(|c| c.total > 0)
                .map(|c| format!("{} ({})", c.category.name, fmt_inr(c.total)))
                .unwrap_or_else(|| "-".into());
            vec![k.kind.to_string(), fmt_inr(k.totals.total), top]
        })
        .collect();
    println!(
        "{} (prev {}, next {})",
        report.month.first_day().format("%B %Y"),
        report.prev_month,
        report.next_month
    );
    println!("{}", pretty_table(&["Kind", "This month", "Largest"], rows));
    println!("Receivables outstanding: {}", fmt_inr(report.receivables_total));
    println!("New entries default to {}", report.default_entry_date);
    Ok(())
}

fn by_category(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let period = period_arg(sub)?;
    let totals = category_report(conn, owner, kind, &period)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        return Ok(());
    }
    println!(
        "{} {}s ({}) - {}",
        kind,
        kind.category_noun(),
        totals.ranked_breakdown.len(),
        period.label()
    );
    let rows = totals
        .ranked_breakdown
        .iter()
        .map(|c| vec![c.category.name.clone(), fmt_inr(c.total)])
        .collect();
    println!("{}", pretty_table(&["Name", "Total"], rows));
    println!("Total: {}", fmt_inr(totals.total));
    if !totals.available_financial_years.is_empty() {
        let years: Vec<String> = totals
            .available_financial_years
            .iter()
            .map(|fy| format!("FY {}", fy.short()))
            .collect();
        println!("Financial years: {}", years.join(", "));
    }
    Ok(())
}

fn years(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let data = year_report(conn, owner, kind)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|y| {
                vec![
                    format!("FY {}", y.financial_year.short()),
                    y.financial_year.to_string(),
                    fmt_inr(y.total),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Year", "Range", "Total"], rows));
    }
    Ok(())
}

fn monthly(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let data = monthly_report(conn, owner, kind, months)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|m| vec![m.month.to_string(), fmt_inr(m.total)])
            .collect();
        println!("{}", pretty_table(&["Month", "Total"], rows));
    }
    Ok(())
}

fn statement(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let month = month_arg(sub)?;
    let category = sub.get_one::<String>("category").map(String::as_str);
    let st = statement_for(conn, owner, kind, month, category)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &st)? {
        return Ok(());
    }
    let names: std::collections::HashMap<String, String> = store::list_categories(conn, owner, kind)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let rows = st
        .entries
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                names.get(&t.category_key).cloned().unwrap_or_else(|| "(unknown)".into()),
                t.label.clone().unwrap_or_default(),
                fmt_inr(t.amount),
            ]
        })
        .collect();
    let heading = match &st.category {
        Some(c) => format!("{} statement - {} - {}", kind, c, st.month),
        None => format!("{} statement - {}", kind, st.month),
    };
    println!("{}", heading);
    println!("{}", pretty_table(&["Date", "Category", "Label", "Amount"], rows));
    println!("Total: {}  Count: {}", fmt_inr(st.total), st.count);
    println!("prev: {}  next: {}", st.prev_month, st.next_month);
    Ok(())
}
