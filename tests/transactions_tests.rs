// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{
    aggregate::total_amount,
    cli, commands, db,
    error::LedgerError,
    models::{MAX_AMOUNT, TransactionKind},
    period::parse_date,
    store::{self, TransactionInput},
    utils,
};
use rusqlite::Connection;

fn setup() -> (Connection, String, String) {
    let conn = db::open_in_memory().unwrap();
    let food = store::add_category(&conn, "default", TransactionKind::Spend, "Food").unwrap();
    let rent = store::add_category(&conn, "default", TransactionKind::Spend, "Rent").unwrap();
    (conn, food.id, rent.id)
}

fn input(amount: i64, category_id: &str, label: Option<&str>, date: &str) -> TransactionInput {
    TransactionInput {
        amount,
        category_id: category_id.into(),
        label: label.map(str::to_string),
        date: parse_date(date).unwrap(),
    }
}

fn run_tx(conn: &Connection, args: &[&str]) {
    let mut argv = vec!["fintrack", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, tx_m) = matches.subcommand().unwrap();
    commands::transactions::handle(conn, "default", tx_m).unwrap();
}

fn list_rows(conn: &Connection, args: &[&str]) -> Vec<commands::transactions::TransactionRow> {
    let mut argv = vec!["fintrack", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    commands::transactions::query_rows(conn, "default", list_m).unwrap()
}

#[test]
fn validation_rejects_bad_entries() {
    let (conn, food, _) = setup();
    let spend = TransactionKind::Spend;
    assert!(matches!(
        store::add_transaction(&conn, "default", spend, &input(-1, &food, Some("x"), "2024-05-01")),
        Err(LedgerError::NegativeAmount(-1))
    ));
    assert!(matches!(
        store::add_transaction(&conn, "default", spend, &input(10, &food, Some("  "), "2024-05-01")),
        Err(LedgerError::MissingLabel(TransactionKind::Spend))
    ));
    assert!(matches!(
        store::add_transaction(&conn, "default", spend, &input(10, "nope", Some("x"), "2024-05-01")),
        Err(LedgerError::UnknownCategoryKey { .. })
    ));
    // category exists but belongs to another kind
    assert!(matches!(
        store::add_transaction(
            &conn,
            "default",
            TransactionKind::Investment,
            &input(10, &food, Some("x"), "2024-05-01")
        ),
        Err(LedgerError::UnknownCategoryKey { .. })
    ));
    // and to another owner
    assert!(matches!(
        store::add_transaction(&conn, "bob", spend, &input(10, &food, Some("x"), "2024-05-01")),
        Err(LedgerError::UnknownCategoryKey { .. })
    ));
    assert!(store::list_transactions(&conn, "default", spend).unwrap().is_empty());
}

#[test]
fn income_needs_no_label() {
    let conn = db::open_in_memory().unwrap();
    let salary = store::add_category(&conn, "default", TransactionKind::Income, "Salary").unwrap();
    let t = store::add_transaction(
        &conn,
        "default",
        TransactionKind::Income,
        &input(5000, &salary.id, Some("ignored"), "2024-04-30"),
    )
    .unwrap();
    assert_eq!(t.label, None);
    let back = store::find_transaction(&conn, "default", TransactionKind::Income, &t.id).unwrap();
    assert_eq!(back, t);
}

#[test]
fn edit_and_delete() {
    let (conn, food, rent) = setup();
    let spend = TransactionKind::Spend;
    let t = store::add_transaction(&conn, "default", spend, &input(10, &food, Some("tea"), "2024-05-01"))
        .unwrap();
    let edited = store::edit_transaction(
        &conn,
        "default",
        spend,
        &t.id,
        &input(12, &rent, Some("deposit"), "2024-06-01"),
    )
    .unwrap();
    assert_eq!(store::find_transaction(&conn, "default", spend, &t.id).unwrap(), edited);
    assert!(matches!(
        store::edit_transaction(&conn, "bob", spend, &t.id, &input(1, &rent, Some("x"), "2024-06-01")),
        Err(LedgerError::UnknownCategoryKey { .. })
    ));
    assert!(matches!(
        store::delete_transaction(&conn, "bob", spend, &t.id),
        Err(LedgerError::TransactionNotFound(_))
    ));
    store::delete_transaction(&conn, "default", spend, &t.id).unwrap();
    assert!(matches!(
        store::find_transaction(&conn, "default", spend, &t.id),
        Err(LedgerError::TransactionNotFound(_))
    ));
}

#[test]
fn list_is_newest_first_with_limit() {
    let (conn, food, rent) = setup();
    let spend = TransactionKind::Spend;
    store::add_transaction(&conn, "default", spend, &input(1, &food, Some("a"), "2024-05-01")).unwrap();
    store::add_transaction(&conn, "default", spend, &input(2, &rent, Some("b"), "2024-05-03")).unwrap();
    store::add_transaction(&conn, "default", spend, &input(3, &food, Some("c"), "2024-05-03")).unwrap();
    store::add_transaction(&conn, "default", spend, &input(4, &food, Some("d"), "2024-04-20")).unwrap();

    let rows = list_rows(&conn, &["--kind", "spend"]);
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["c", "b", "a", "d"]);
    assert_eq!(rows[0].category, "Food");

    let rows = list_rows(&conn, &["--kind", "spend", "--limit", "2"]);
    assert_eq!(rows.len(), 2);
}

#[test]
fn list_filters_by_period_and_category() {
    let (conn, food, rent) = setup();
    let spend = TransactionKind::Spend;
    store::add_transaction(&conn, "default", spend, &input(1, &food, Some("a"), "2024-05-01")).unwrap();
    store::add_transaction(&conn, "default", spend, &input(2, &rent, Some("b"), "2024-05-03")).unwrap();
    store::add_transaction(&conn, "default", spend, &input(4, &food, Some("d"), "2024-03-20")).unwrap();

    let rows = list_rows(&conn, &["--kind", "spend", "--period", "2024-05", "--category", "Food"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, 1);

    let rows = list_rows(&conn, &["--kind", "spend", "--period", "2023-2024"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "d");

    let rows = list_rows(&conn, &["--kind", "spend", "--period", "all", "--category", "all"]);
    assert_eq!(rows.len(), 3);
}

#[test]
fn add_command_defaults_to_first_of_selected_month() {
    let (conn, _, _) = setup();
    run_tx(
        &conn,
        &["add", "--kind", "spend", "--amount", "250", "--category", "Rent", "--month", "2020-01", "--label", "jan"],
    );
    let txs = store::list_transactions(&conn, "default", TransactionKind::Spend).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].date, parse_date("2020-01-01").unwrap());
    assert_eq!(txs[0].amount, 250);

    run_tx(&conn, &["edit", "--kind", "spend", "--id", txs[0].id.as_str(), "--amount", "300"]);
    let t = store::find_transaction(&conn, "default", TransactionKind::Spend, &txs[0].id).unwrap();
    assert_eq!(t.amount, 300);
    assert_eq!(t.label.as_deref(), Some("jan"));
}

#[test]
fn oversized_amounts_are_rejected() {
    let (conn, food, _) = setup();
    let spend = TransactionKind::Spend;
    let big = i64::MAX / 2 + 1;
    assert!(matches!(
        store::add_transaction(&conn, "default", spend, &input(big, &food, Some("x"), "2024-05-01")),
        Err(LedgerError::AmountTooLarge(_))
    ));
    store::add_transaction(&conn, "default", spend, &input(MAX_AMOUNT, &food, Some("x"), "2024-05-01"))
        .unwrap();
    store::add_transaction(&conn, "default", spend, &input(MAX_AMOUNT, &food, Some("y"), "2024-05-02"))
        .unwrap();
    let ledger = store::load_ledger(&conn, "default", spend).unwrap();
    assert_eq!(total_amount(ledger.transactions()), 2 * MAX_AMOUNT);
    assert!(utils::parse_amount(&big.to_string()).is_err());
    assert_eq!(utils::parse_amount("1500").unwrap(), 1500);
}

#[test]
fn stored_totals_never_wrap() {
    let (conn, food, _) = setup();
    let big = i64::MAX / 2 + 1;
    for id in ["raw1", "raw2"] {
        conn.execute(
            "INSERT INTO transactions(id, kind, amount, category_id, label, date, owner_id)
             VALUES (?1, 'spend', ?2, ?3, 'x', '2024-05-01', 'default')",
            rusqlite::params![id, big, food],
        )
        .unwrap();
    }
    let ledger = store::load_ledger(&conn, "default", TransactionKind::Spend).unwrap();
    assert_eq!(total_amount(ledger.transactions()), i64::MAX);
}

#[test]
fn dates_outside_four_digit_years_are_rejected() {
    let (conn, food, _) = setup();
    let early = chrono::NaiveDate::from_ymd_opt(0, 2, 1).unwrap();
    let result = store::add_transaction(
        &conn,
        "default",
        TransactionKind::Spend,
        &TransactionInput {
            amount: 1,
            category_id: food,
            label: Some("x".into()),
            date: early,
        },
    );
    assert!(matches!(result, Err(LedgerError::InvalidDate(_))));
}
