// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::unknown_category_keys;
use crate::error::LedgerError;
use crate::models::TransactionKind;
use crate::period::parse_date;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, params};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub issue: String,
    pub detail: String,
}

pub fn handle(conn: &Connection, owner: &str) -> Result<()> {
    let findings = diagnose(conn, owner)?;
    if findings.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = findings
            .into_iter()
            .map(|f| vec![f.issue, f.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn diagnose(conn: &Connection, owner: &str) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();

    // 1) Dates that cannot be read back as YYYY-MM-DD
    for (table, kind_col) in [("transactions", "kind"), ("receivables", "'receivable'")] {
        let sql = format!(
            "SELECT id, {}, date FROM {} WHERE owner_id=?1 ORDER BY seq",
            kind_col, table
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query(params![owner])?;
        while let Some(r) = cur.next()? {
            let id: String = r.get(0)?;
            let kind: String = r.get(1)?;
            let date: String = r.get(2)?;
            if parse_date(&date).is_err() {
                findings.push(Finding {
                    issue: "invalid_date".into(),
                    detail: format!("{} {} has date '{}'", kind, id, date),
                });
            }
        }
    }

    // 2) Entries filed under a category the owner no longer has
    for kind in TransactionKind::ALL {
        let ledger = match store::load_ledger(conn, owner, kind) {
            Ok(l) => l,
            // already reported above
            Err(LedgerError::InvalidDate(_)) => continue,
            Err(e) => return Err(e.into()),
        };
        let categories = store::list_categories(conn, owner, kind)?;
        for key in unknown_category_keys(ledger.transactions(), &categories) {
            let count = ledger.iter().filter(|t| t.category_key == key).count();
            findings.push(Finding {
                issue: "unknown_category_key".into(),
                detail: format!("{} {} '{}' referenced by {} entries", kind, kind.category_noun(), key, count),
            });
        }
    }

    for f in &findings {
        warn!(owner, issue = %f.issue, detail = %f.detail, "doctor finding");
    }
    Ok(findings)
}
