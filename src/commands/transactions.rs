// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::ledger::CategoryFilter;
use crate::models::TransactionKind;
use crate::period::{default_entry_date, parse_date};
use crate::store::{self, TransactionInput};
use crate::utils::{
    fmt_inr, kind_arg, maybe_print_json, month_arg, parse_amount, period_arg, pretty_table, today,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, owner, sub)?,
        Some(("list", sub)) => list(conn, owner, sub)?,
        Some(("edit", sub)) => edit(conn, owner, sub)?,
        Some(("rm", sub)) => {
            let kind = kind_arg(sub)?;
            let id = sub.get_one::<String>("id").unwrap();
            store::delete_transaction(conn, owner, kind, id.trim())?;
            println!("Removed {} entry {}", kind, id.trim());
        }
        _ => {}
    }
    Ok(())
}

/// Resolves a category name to a filter; `all` passes everything.
pub fn category_filter(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    raw: &str,
) -> Result<CategoryFilter> {
    match raw.parse::<CategoryFilter>() {
        Ok(CategoryFilter::Key(name)) => {
            let c = store::find_category_by_name(conn, owner, kind, &name)?;
            Ok(CategoryFilter::Key(c.id))
        }
        _ => Ok(CategoryFilter::All),
    }
}

fn add(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category_name = sub.get_one::<String>("category").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => default_entry_date(month_arg(sub)?, today()),
    };
    let label = sub.get_one::<String>("label").cloned();

    let category = store::find_category_by_name(conn, owner, kind, category_name)?;
    let t = store::add_transaction(
        conn,
        owner,
        kind,
        &TransactionInput {
            amount,
            category_id: category.id,
            label,
            date,
        },
    )?;
    println!(
        "Recorded {} {} on {} under '{}' (id: {})",
        kind,
        fmt_inr(t.amount),
        t.date,
        category.name,
        t.id
    );
    Ok(())
}

fn edit(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let id = sub.get_one::<String>("id").unwrap().trim();
    let current = store::find_transaction(conn, owner, kind, id)?;

    let amount = match sub.get_one::<String>("amount") {
        Some(a) => parse_amount(a)?,
        None => current.amount,
    };
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => store::find_category_by_name(conn, owner, kind, name)?.id,
        None => current.category_key,
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => current.date,
    };
    let label = sub.get_one::<String>("label").cloned().or(current.label);

    let t = store::edit_transaction(
        conn,
        owner,
        kind,
        id,
        &TransactionInput {
            amount,
            category_id,
            label,
            date,
        },
    )?;
    println!("Updated {} entry {} ({} on {})", kind, t.id, fmt_inr(t.amount), t.date);
    Ok(())
}

fn list(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, owner, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.category.clone(),
                    r.label.clone(),
                    fmt_inr(r.amount),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Label", "Amount", "ID"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub label: String,
    pub amount: i64,
}

/// Newest first; entries on the same day show the latest recorded first.
pub fn query_rows(
    conn: &Connection,
    owner: &str,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let kind = kind_arg(sub)?;
    let period = period_arg(sub)?;
    let category = match sub.get_one::<String>("category") {
        Some(raw) => category_filter(conn, owner, kind, raw)?,
        None => CategoryFilter::All,
    };

    let ledger = store::load_ledger(conn, owner, kind)?
        .filter_by_period(&period)
        .filter_by_category(&category);
    let names: HashMap<String, String> = store::list_categories(conn, owner, kind)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut txs = ledger.into_transactions();
    txs.reverse();
    txs.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            category: names
                .get(&t.category_key)
                .cloned()
                .unwrap_or_else(|| "(unknown)".into()),
            id: t.id,
            date: t.date.to_string(),
            label: t.label.unwrap_or_default(),
            amount: t.amount,
        })
        .collect())
}
