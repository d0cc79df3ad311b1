// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::store;
use crate::utils::{kind_arg, period_arg};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde_json::json;
use tracing::info;

pub fn handle(conn: &Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, owner, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let period = period_arg(sub)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let ledger = store::load_ledger(conn, owner, kind)?.filter_by_period(&period);
    let names: HashMap<String, String> = store::list_categories(conn, owner, kind)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let category_of = |key: &str| names.get(key).cloned().unwrap_or_default();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "kind", "category", "label", "amount"])?;
            for t in &ledger {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    kind.to_string(),
                    category_of(&t.category_key),
                    t.label.clone().unwrap_or_default(),
                    t.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = ledger
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date.to_string(), "kind": kind, "category": category_of(&t.category_key), "label": t.label, "amount": t.amount
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    info!(owner, %kind, %period, rows = ledger.len(), out = %out, "exported transactions");
    println!("Exported {} {} entries to {}", ledger.len(), kind, out);
    Ok(())
}
