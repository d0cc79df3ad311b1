// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{receivables_by_amount, total_amount};
use crate::models::Receivable;
use crate::period::parse_date;
use crate::store::{self, ReceivableInput};
use crate::utils::{fmt_inr, maybe_print_json, parse_amount, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = ReceivableInput {
                amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
                name: sub.get_one::<String>("name").unwrap().clone(),
                purpose: sub.get_one::<String>("purpose").unwrap().clone(),
                date: match sub.get_one::<String>("date") {
                    Some(d) => parse_date(d)?,
                    None => today(),
                },
            };
            let r = store::add_receivable(conn, owner, &input)?;
            println!(
                "Recorded {} owed by '{}' for {} (id: {})",
                fmt_inr(r.amount),
                r.name,
                r.purpose,
                r.id
            );
        }
        Some(("list", sub)) => {
            let summary = summary(conn, owner)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
                let rows = summary
                    .receivables
                    .iter()
                    .map(|r| {
                        vec![
                            r.name.clone(),
                            r.purpose.clone(),
                            r.date.to_string(),
                            fmt_inr(r.amount),
                            r.id.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Name", "Purpose", "Date", "Amount", "ID"], rows)
                );
                println!("Total: {}", fmt_inr(summary.total));
            }
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let current = store::find_receivable(conn, owner, id)?;
            let input = ReceivableInput {
                amount: match sub.get_one::<String>("amount") {
                    Some(a) => parse_amount(a)?,
                    None => current.amount,
                },
                name: sub.get_one::<String>("name").cloned().unwrap_or(current.name),
                purpose: sub
                    .get_one::<String>("purpose")
                    .cloned()
                    .unwrap_or(current.purpose),
                date: match sub.get_one::<String>("date") {
                    Some(d) => parse_date(d)?,
                    None => current.date,
                },
            };
            let r = store::edit_receivable(conn, owner, id, &input)?;
            println!("Updated receivable {} ({})", r.id, fmt_inr(r.amount));
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            store::delete_receivable(conn, owner, id)?;
            println!("Removed receivable {}", id);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ReceivableSummary {
    pub total: i64,
    pub receivables: Vec<Receivable>,
}

pub fn summary(conn: &Connection, owner: &str) -> Result<ReceivableSummary> {
    let receivables = receivables_by_amount(&store::list_receivables(conn, owner)?);
    Ok(ReceivableSummary {
        total: total_amount(&receivables),
        receivables,
    })
}
