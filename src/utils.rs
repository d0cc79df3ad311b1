// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{MAX_AMOUNT, TransactionKind};
use crate::period::{MonthBucket, PeriodSelector};

static TRACING_INIT: Once = Once::new();

/// Installs the global stderr subscriber. `RUST_LOG` overrides the default
/// `fintrack=warn` filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fintrack=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `--month` if given, else the month containing today.
pub fn month_arg(sub: &clap::ArgMatches) -> Result<MonthBucket> {
    match sub.get_one::<String>("month") {
        Some(m) => Ok(m.parse::<MonthBucket>()?),
        None => Ok(MonthBucket::of(today())),
    }
}

pub fn period_arg(sub: &clap::ArgMatches) -> Result<PeriodSelector> {
    match sub.get_one::<String>("period") {
        Some(p) => Ok(p.parse::<PeriodSelector>()?),
        None => Ok(PeriodSelector::All),
    }
}

pub fn parse_amount(s: &str) -> Result<i64> {
    let v = s
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid amount '{}', expected a whole number", s))?;
    if v < 0 {
        return Err(anyhow!("Amount must be non-negative, got {}", v));
    }
    if v > MAX_AMOUNT {
        return Err(anyhow!("Amount {} exceeds the limit of {}", v, MAX_AMOUNT));
    }
    Ok(v)
}

pub fn kind_arg(sub: &clap::ArgMatches) -> Result<TransactionKind> {
    let raw = sub
        .get_one::<String>("kind")
        .ok_or_else(|| anyhow!("--kind is required"))?;
    raw.parse::<TransactionKind>().map_err(|e| anyhow!(e))
}

/// Formats a whole-rupee amount with Indian digit grouping: `₹ 12,34,567`.
pub fn fmt_inr(amount: i64) -> String {
    format!("₹ {}", group_indian(amount))
}

pub fn group_indian(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };
    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
    }
    let (head, last3) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{}{},{}", sign, groups.join(","), last3)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
