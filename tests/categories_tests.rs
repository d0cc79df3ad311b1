// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{
    cli, commands, db,
    error::LedgerError,
    ledger::CategoryFilter,
    models::TransactionKind,
    period::parse_date,
    store::{self, TransactionInput},
};
use rusqlite::Connection;

const SPEND: TransactionKind = TransactionKind::Spend;

fn spend(conn: &Connection, owner: &str, category_id: &str, amount: i64, date: &str) {
    store::add_transaction(
        conn,
        owner,
        SPEND,
        &TransactionInput {
            amount,
            category_id: category_id.into(),
            label: Some("groceries".into()),
            date: parse_date(date).unwrap(),
        },
    )
    .unwrap();
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

#[test]
fn delete_removes_category_and_its_entries() {
    let mut conn = db::open_in_memory().unwrap();
    let food = store::add_category(&conn, "alice", SPEND, "Food").unwrap();
    let rent = store::add_category(&conn, "alice", SPEND, "Rent").unwrap();
    spend(&conn, "alice", &food.id, 100, "2024-05-01");
    spend(&conn, "alice", &food.id, 40, "2024-05-09");
    spend(&conn, "alice", &rent.id, 900, "2024-05-02");

    let removed = store::delete_category(&mut conn, "alice", SPEND, &food.id).unwrap();
    assert_eq!(removed, 2);

    let ledger = store::load_ledger(&conn, "alice", SPEND).unwrap();
    assert!(ledger
        .filter_by_category(&CategoryFilter::Key(food.id.clone()))
        .is_empty());
    assert_eq!(ledger.len(), 1);
    let names: Vec<String> = store::list_categories(&conn, "alice", SPEND)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Rent"]);
}

#[test]
fn failed_delete_leaves_everything_in_place() {
    let mut conn = db::open_in_memory().unwrap();
    let food = store::add_category(&conn, "alice", SPEND, "Food").unwrap();
    spend(&conn, "alice", &food.id, 100, "2024-05-01");
    spend(&conn, "alice", &food.id, 40, "2024-05-09");
    conn.execute_batch(
        "CREATE TRIGGER block_category_delete BEFORE DELETE ON categories
         BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
    )
    .unwrap();

    let err = store::delete_category(&mut conn, "alice", SPEND, &food.id).unwrap_err();
    assert!(matches!(err, LedgerError::Database(_)));
    assert_eq!(count(&conn, "transactions"), 2);
    assert_eq!(count(&conn, "categories"), 1);
}

#[test]
fn delete_unknown_category_is_not_found() {
    let mut conn = db::open_in_memory().unwrap();
    let food = store::add_category(&conn, "alice", SPEND, "Food").unwrap();
    spend(&conn, "alice", &food.id, 100, "2024-05-01");

    let err = store::delete_category(&mut conn, "alice", SPEND, "nope").unwrap_err();
    assert!(matches!(err, LedgerError::CategoryNotFound { .. }));
    // wrong kind
    let err = store::delete_category(&mut conn, "alice", TransactionKind::Income, &food.id)
        .unwrap_err();
    assert!(matches!(err, LedgerError::CategoryNotFound { .. }));
    // wrong owner
    let err = store::delete_category(&mut conn, "bob", SPEND, &food.id).unwrap_err();
    assert!(matches!(err, LedgerError::CategoryNotFound { .. }));
    assert_eq!(count(&conn, "transactions"), 1);
    assert_eq!(count(&conn, "categories"), 1);
}

#[test]
fn names_are_unique_per_owner_and_kind() {
    let conn = db::open_in_memory().unwrap();
    store::add_category(&conn, "alice", SPEND, "Food").unwrap();
    assert!(store::add_category(&conn, "alice", SPEND, "Food").is_err());
    store::add_category(&conn, "alice", TransactionKind::Investment, "Food").unwrap();
    store::add_category(&conn, "bob", SPEND, "Food").unwrap();
    assert!(matches!(
        store::add_category(&conn, "alice", SPEND, "   "),
        Err(LedgerError::Validation(_))
    ));
    assert_eq!(store::list_categories(&conn, "alice", SPEND).unwrap().len(), 1);
}

#[test]
fn listing_is_sorted_by_name_and_owner_scoped() {
    let conn = db::open_in_memory().unwrap();
    for name in ["Travel", "Bills", "Food"] {
        store::add_category(&conn, "alice", SPEND, name).unwrap();
    }
    store::add_category(&conn, "bob", SPEND, "Aaa").unwrap();
    let names: Vec<String> = store::list_categories(&conn, "alice", SPEND)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Bills", "Food", "Travel"]);
}

#[test]
fn rename_keeps_entries_attached() {
    let conn = db::open_in_memory().unwrap();
    let food = store::add_category(&conn, "alice", SPEND, "Food").unwrap();
    spend(&conn, "alice", &food.id, 100, "2024-05-01");
    store::rename_category(&conn, "alice", SPEND, &food.id, "Groceries").unwrap();

    let found = store::find_category_by_name(&conn, "alice", SPEND, "Groceries").unwrap();
    assert_eq!(found.id, food.id);
    assert!(store::find_category_by_name(&conn, "alice", SPEND, "Food").is_err());
    assert!(matches!(
        store::rename_category(&conn, "bob", SPEND, &food.id, "Mine"),
        Err(LedgerError::CategoryNotFound { .. })
    ));
    assert_eq!(store::list_transactions(&conn, "alice", SPEND).unwrap().len(), 1);
}

#[test]
fn rm_command_cascades() {
    let mut conn = db::open_in_memory().unwrap();
    let food = store::add_category(&conn, "alice", SPEND, "Food").unwrap();
    spend(&conn, "alice", &food.id, 100, "2024-05-01");
    spend(&conn, "alice", &food.id, 40, "2024-05-09");

    let app = cli::build_cli();
    let matches =
        app.get_matches_from(["fintrack", "category", "rm", "--kind", "spend", "--name", "Food"]);
    let (_, sub) = matches.subcommand().unwrap();
    commands::categories::handle(&mut conn, "alice", sub).unwrap();

    assert_eq!(count(&conn, "transactions"), 0);
    assert_eq!(count(&conn, "categories"), 0);
}

#[test]
fn wildcard_name_is_reserved() {
    let conn = db::open_in_memory().unwrap();
    for name in ["all", "ALL", " All "] {
        assert!(matches!(
            store::add_category(&conn, "alice", SPEND, name),
            Err(LedgerError::Validation(_))
        ));
    }
    let food = store::add_category(&conn, "alice", SPEND, "Food").unwrap();
    assert!(matches!(
        store::rename_category(&conn, "alice", SPEND, &food.id, "all"),
        Err(LedgerError::Validation(_))
    ));
    assert_eq!(
        store::find_category_by_name(&conn, "alice", SPEND, "Food").unwrap().id,
        food.id
    );
}
