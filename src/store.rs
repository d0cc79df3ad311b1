// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Owner-scoped reads and writes against the SQLite store.
//!
//! Every statement filters on `owner_id`; rows belonging to another owner are
//! invisible here and behave exactly like missing rows.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::models::{Category, MAX_AMOUNT, Receivable, Transaction, TransactionKind};
use crate::period::{check_date, parse_date};

pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn clean_name(raw: &str, what: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation(format!("{} must not be empty", what)));
    }
    Ok(name.to_string())
}

/// `all` is the category wildcard on the command line, so no category may
/// be called that.
fn clean_category_name(raw: &str) -> Result<String> {
    let name = clean_name(raw, "Name")?;
    if name.eq_ignore_ascii_case("all") {
        return Err(LedgerError::Validation(format!(
            "'{}' is reserved and cannot name a category",
            name
        )));
    }
    Ok(name)
}

fn check_amount(amount: i64) -> Result<i64> {
    if amount < 0 {
        return Err(LedgerError::NegativeAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::AmountTooLarge(amount));
    }
    Ok(amount)
}

// ---------------------------------------------------------------------------
// categories

pub fn add_category(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    name: &str,
) -> Result<Category> {
    let name = clean_category_name(name)?;
    let category = Category {
        id: new_id(),
        kind,
        name,
        owner_id: owner.to_string(),
    };
    conn.execute(
        "INSERT INTO categories(id, kind, name, owner_id) VALUES (?1, ?2, ?3, ?4)",
        params![category.id, kind.as_str(), category.name, owner],
    )?;
    info!(owner, %kind, id = %category.id, name = %category.name, "category added");
    Ok(category)
}

/// Categories of one kind, ordered by name.
pub fn list_categories(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name FROM categories WHERE owner_id=?1 AND kind=?2 ORDER BY name, id",
    )?;
    let rows = stmt.query_map(params![owner, kind.as_str()], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name) = row?;
        out.push(Category {
            id,
            kind,
            name,
            owner_id: owner.to_string(),
        });
    }
    Ok(out)
}

pub fn find_category_by_name(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    name: &str,
) -> Result<Category> {
    let name = name.trim();
    let id: Option<String> = conn
        .query_row(
            "SELECT id FROM categories WHERE owner_id=?1 AND kind=?2 AND name=?3",
            params![owner, kind.as_str(), name],
            |r| r.get(0),
        )
        .optional()?;
    match id {
        Some(id) => Ok(Category {
            id,
            kind,
            name: name.to_string(),
            owner_id: owner.to_string(),
        }),
        None => Err(LedgerError::CategoryNotFound {
            kind,
            name: name.to_string(),
        }),
    }
}

pub fn rename_category(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    id: &str,
    new_name: &str,
) -> Result<()> {
    let new_name = clean_category_name(new_name)?;
    let n = conn.execute(
        "UPDATE categories SET name=?1 WHERE id=?2 AND owner_id=?3 AND kind=?4",
        params![new_name, id, owner, kind.as_str()],
    )?;
    if n == 0 {
        return Err(LedgerError::CategoryNotFound {
            kind,
            name: id.to_string(),
        });
    }
    info!(owner, %kind, id, name = %new_name, "category renamed");
    Ok(())
}

/// Deletes a category together with every transaction filed under it, in
/// one SQLite transaction. Returns how many transactions went with it.
/// Either both deletes land or neither does.
pub fn delete_category(
    conn: &mut Connection,
    owner: &str,
    kind: TransactionKind,
    id: &str,
) -> Result<usize> {
    let tx = conn.transaction()?;
    let exists: Option<i64> = tx
        .query_row(
            "SELECT 1 FROM categories WHERE id=?1 AND owner_id=?2 AND kind=?3",
            params![id, owner, kind.as_str()],
            |r| r.get(0),
        )
        .optional()?;
    if exists.is_none() {
        return Err(LedgerError::CategoryNotFound {
            kind,
            name: id.to_string(),
        });
    }
    let removed = tx.execute(
        "DELETE FROM transactions WHERE category_id=?1 AND owner_id=?2 AND kind=?3",
        params![id, owner, kind.as_str()],
    )?;
    tx.execute(
        "DELETE FROM categories WHERE id=?1 AND owner_id=?2 AND kind=?3",
        params![id, owner, kind.as_str()],
    )?;
    tx.commit()?;
    info!(owner, %kind, id, removed, "category deleted with its transactions");
    Ok(removed)
}

// ---------------------------------------------------------------------------
// transactions

/// Fields a caller supplies when recording or editing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub amount: i64,
    pub category_id: String,
    pub label: Option<String>,
    pub date: NaiveDate,
}

fn validate_transaction(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    input: &TransactionInput,
) -> Result<Option<String>> {
    check_amount(input.amount)?;
    check_date(input.date)?;
    let label = input
        .label
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    if kind.requires_label() && label.is_none() {
        return Err(LedgerError::MissingLabel(kind));
    }
    let known: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM categories WHERE id=?1 AND owner_id=?2 AND kind=?3",
            params![input.category_id, owner, kind.as_str()],
            |r| r.get(0),
        )
        .optional()?;
    if known.is_none() {
        return Err(LedgerError::UnknownCategoryKey {
            kind,
            key: input.category_id.clone(),
        });
    }
    Ok(if kind.requires_label() { label } else { None })
}

pub fn add_transaction(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    input: &TransactionInput,
) -> Result<Transaction> {
    let label = validate_transaction(conn, owner, kind, input)?;
    let t = Transaction {
        id: new_id(),
        kind,
        amount: input.amount,
        category_key: input.category_id.clone(),
        label,
        date: input.date,
        owner_id: owner.to_string(),
    };
    conn.execute(
        "INSERT INTO transactions(id, kind, amount, category_id, label, date, owner_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            t.id,
            kind.as_str(),
            t.amount,
            t.category_key,
            t.label,
            t.date.to_string(),
            owner
        ],
    )?;
    info!(owner, %kind, id = %t.id, amount = t.amount, date = %t.date, "transaction added");
    Ok(t)
}

pub fn edit_transaction(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    id: &str,
    input: &TransactionInput,
) -> Result<Transaction> {
    let label = validate_transaction(conn, owner, kind, input)?;
    let n = conn.execute(
        "UPDATE transactions SET amount=?1, category_id=?2, label=?3, date=?4
         WHERE id=?5 AND owner_id=?6 AND kind=?7",
        params![
            input.amount,
            input.category_id,
            label,
            input.date.to_string(),
            id,
            owner,
            kind.as_str()
        ],
    )?;
    if n == 0 {
        return Err(LedgerError::TransactionNotFound(id.to_string()));
    }
    info!(owner, %kind, id, "transaction edited");
    Ok(Transaction {
        id: id.to_string(),
        kind,
        amount: input.amount,
        category_key: input.category_id.clone(),
        label,
        date: input.date,
        owner_id: owner.to_string(),
    })
}

pub fn delete_transaction(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    id: &str,
) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND owner_id=?2 AND kind=?3",
        params![id, owner, kind.as_str()],
    )?;
    if n == 0 {
        return Err(LedgerError::TransactionNotFound(id.to_string()));
    }
    info!(owner, %kind, id, "transaction deleted");
    Ok(())
}

/// Snapshot of one kind's transactions, oldest first.
pub fn list_transactions(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, amount, category_id, label, date FROM transactions
         WHERE owner_id=?1 AND kind=?2 ORDER BY date, seq",
    )?;
    let rows = stmt.query_map(params![owner, kind.as_str()], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, amount, category_key, label, date) = row?;
        out.push(Transaction {
            id,
            kind,
            amount,
            category_key,
            label,
            date: parse_date(&date)?,
            owner_id: owner.to_string(),
        });
    }
    Ok(out)
}

pub fn find_transaction(
    conn: &Connection,
    owner: &str,
    kind: TransactionKind,
    id: &str,
) -> Result<Transaction> {
    let row = conn
        .query_row(
            "SELECT amount, category_id, label, date FROM transactions
             WHERE id=?1 AND owner_id=?2 AND kind=?3",
            params![id, owner, kind.as_str()],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, Option<String>>(2)?,
                    r.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;
    let (amount, category_key, label, date) =
        row.ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))?;
    Ok(Transaction {
        id: id.to_string(),
        kind,
        amount,
        category_key,
        label,
        date: parse_date(&date)?,
        owner_id: owner.to_string(),
    })
}

pub fn load_ledger(conn: &Connection, owner: &str, kind: TransactionKind) -> Result<Ledger> {
    Ok(Ledger::new(owner, list_transactions(conn, owner, kind)?))
}

// ---------------------------------------------------------------------------
// receivables

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivableInput {
    pub amount: i64,
    pub name: String,
    pub purpose: String,
    pub date: NaiveDate,
}

fn validate_receivable(input: &ReceivableInput) -> Result<(String, String)> {
    check_amount(input.amount)?;
    check_date(input.date)?;
    Ok((
        clean_name(&input.name, "Name")?,
        clean_name(&input.purpose, "Purpose")?,
    ))
}

pub fn add_receivable(conn: &Connection, owner: &str, input: &ReceivableInput) -> Result<Receivable> {
    let (name, purpose) = validate_receivable(input)?;
    let r = Receivable {
        id: new_id(),
        amount: input.amount,
        name,
        purpose,
        date: input.date,
        owner_id: owner.to_string(),
    };
    conn.execute(
        "INSERT INTO receivables(id, amount, name, purpose, date, owner_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![r.id, r.amount, r.name, r.purpose, r.date.to_string(), owner],
    )?;
    info!(owner, id = %r.id, amount = r.amount, "receivable added");
    Ok(r)
}

pub fn edit_receivable(
    conn: &Connection,
    owner: &str,
    id: &str,
    input: &ReceivableInput,
) -> Result<Receivable> {
    let (name, purpose) = validate_receivable(input)?;
    let n = conn.execute(
        "UPDATE receivables SET amount=?1, name=?2, purpose=?3, date=?4
         WHERE id=?5 AND owner_id=?6",
        params![input.amount, name, purpose, input.date.to_string(), id, owner],
    )?;
    if n == 0 {
        return Err(LedgerError::ReceivableNotFound(id.to_string()));
    }
    info!(owner, id, "receivable edited");
    Ok(Receivable {
        id: id.to_string(),
        amount: input.amount,
        name,
        purpose,
        date: input.date,
        owner_id: owner.to_string(),
    })
}

pub fn delete_receivable(conn: &Connection, owner: &str, id: &str) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM receivables WHERE id=?1 AND owner_id=?2",
        params![id, owner],
    )?;
    if n == 0 {
        return Err(LedgerError::ReceivableNotFound(id.to_string()));
    }
    info!(owner, id, "receivable deleted");
    Ok(())
}

pub fn find_receivable(conn: &Connection, owner: &str, id: &str) -> Result<Receivable> {
    let row = conn
        .query_row(
            "SELECT amount, name, purpose, date FROM receivables WHERE id=?1 AND owner_id=?2",
            params![id, owner],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;
    let (amount, name, purpose, date) =
        row.ok_or_else(|| LedgerError::ReceivableNotFound(id.to_string()))?;
    Ok(Receivable {
        id: id.to_string(),
        amount,
        name,
        purpose,
        date: parse_date(&date)?,
        owner_id: owner.to_string(),
    })
}

/// All receivables, largest amount first.
pub fn list_receivables(conn: &Connection, owner: &str) -> Result<Vec<Receivable>> {
    let mut stmt = conn.prepare(
        "SELECT id, amount, name, purpose, date FROM receivables
         WHERE owner_id=?1 ORDER BY amount DESC, seq",
    )?;
    let rows = stmt.query_map(params![owner], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, amount, name, purpose, date) = row?;
        out.push(Receivable {
            id,
            amount,
            name,
            purpose,
            date: parse_date(&date)?,
            owner_id: owner.to_string(),
        });
    }
    Ok(out)
}
