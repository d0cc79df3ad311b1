// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{
    commands::reports::{category_report, dashboard_report, monthly_report, statement_for, year_report},
    db,
    models::TransactionKind,
    period::{FinancialYear, MonthBucket, PeriodSelector, parse_date},
    store::{self, ReceivableInput, TransactionInput},
};
use rusqlite::Connection;

const SPEND: TransactionKind = TransactionKind::Spend;

fn seed() -> Connection {
    let conn = db::open_in_memory().unwrap();
    let food = store::add_category(&conn, "default", SPEND, "Food").unwrap();
    let rent = store::add_category(&conn, "default", SPEND, "Rent").unwrap();
    store::add_category(&conn, "default", SPEND, "Travel").unwrap();
    let salary = store::add_category(&conn, "default", TransactionKind::Income, "Salary").unwrap();

    let rows = [
        (&food.id, 120, "f1", "2024-05-02"),
        (&rent.id, 900, "r1", "2024-05-01"),
        (&food.id, 80, "f2", "2024-05-20"),
        (&food.id, 60, "f3", "2024-03-10"),
        (&rent.id, 850, "r0", "2023-04-01"),
    ];
    for (cat, amount, label, date) in rows {
        store::add_transaction(
            &conn,
            "default",
            SPEND,
            &TransactionInput {
                amount,
                category_id: cat.clone(),
                label: Some(label.into()),
                date: parse_date(date).unwrap(),
            },
        )
        .unwrap();
    }
    store::add_transaction(
        &conn,
        "default",
        TransactionKind::Income,
        &TransactionInput {
            amount: 5000,
            category_id: salary.id,
            label: None,
            date: parse_date("2024-05-31").unwrap(),
        },
    )
    .unwrap();
    store::add_receivable(
        &conn,
        "default",
        &ReceivableInput {
            amount: 700,
            name: "Asha".into(),
            purpose: "rent share".into(),
            date: parse_date("2024-05-05").unwrap(),
        },
    )
    .unwrap();
    conn
}

fn may() -> MonthBucket {
    "2024-05".parse().unwrap()
}

#[test]
fn dashboard_covers_every_kind() {
    let conn = seed();
    let report = dashboard_report(&conn, "default", may(), parse_date("2024-05-17").unwrap()).unwrap();
    assert_eq!(report.prev_month.to_string(), "2024-04");
    assert_eq!(report.next_month.to_string(), "2024-06");
    assert_eq!(report.default_entry_date, parse_date("2024-05-17").unwrap());
    assert_eq!(report.receivables_total, 700);

    let totals: Vec<(TransactionKind, i64)> =
        report.kinds.iter().map(|k| (k.kind, k.totals.total)).collect();
    assert_eq!(
        totals,
        [
            (TransactionKind::Income, 5000),
            (TransactionKind::Spend, 1100),
            (TransactionKind::Investment, 0),
        ]
    );

    let later = dashboard_report(&conn, "default", may(), parse_date("2024-07-02").unwrap()).unwrap();
    assert_eq!(later.default_entry_date, parse_date("2024-05-01").unwrap());
}

#[test]
fn by_category_ranks_every_category() {
    let conn = seed();
    let totals = category_report(&conn, "default", SPEND, &PeriodSelector::All).unwrap();
    let ranked: Vec<(&str, i64)> = totals
        .ranked_breakdown
        .iter()
        .map(|c| (c.category.name.as_str(), c.total))
        .collect();
    assert_eq!(ranked, [("Rent", 1750), ("Food", 260), ("Travel", 0)]);
    assert_eq!(totals.total, 2010);
    assert_eq!(
        totals.available_financial_years,
        [FinancialYear::new(2024), FinancialYear::new(2023)]
    );

    let fy = category_report(
        &conn,
        "default",
        SPEND,
        &PeriodSelector::FinancialYear(FinancialYear::new(2023)),
    )
    .unwrap();
    assert_eq!(fy.total, 910);
}

#[test]
fn year_and_month_reports() {
    let conn = seed();
    let years: Vec<(String, i64)> = year_report(&conn, "default", SPEND)
        .unwrap()
        .into_iter()
        .map(|y| (y.financial_year.to_string(), y.total))
        .collect();
    assert_eq!(
        years,
        [("2024-2025".to_string(), 1100), ("2023-2024".to_string(), 910)]
    );

    let months: Vec<String> = monthly_report(&conn, "default", SPEND, 2)
        .unwrap()
        .into_iter()
        .map(|m| m.month.to_string())
        .collect();
    assert_eq!(months, ["2024-05", "2024-03"]);
}

#[test]
fn statement_ordering_depends_on_category() {
    let conn = seed();
    let all = statement_for(&conn, "default", SPEND, may(), None).unwrap();
    let labels: Vec<&str> = all.entries.iter().filter_map(|t| t.label.as_deref()).collect();
    assert_eq!(labels, ["r1", "f1", "f2"]);
    assert_eq!(all.total, 1100);
    assert_eq!(all.count, 3);

    let food = statement_for(&conn, "default", SPEND, may(), Some("Food")).unwrap();
    let labels: Vec<&str> = food.entries.iter().filter_map(|t| t.label.as_deref()).collect();
    assert_eq!(labels, ["f2", "f1"]);
    assert_eq!(food.total, 200);
    assert_eq!(food.category.as_deref(), Some("Food"));

    assert!(statement_for(&conn, "default", SPEND, may(), Some("Nope")).is_err());
}
