// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Largest amount a single entry may carry. Totals over any realistic number
/// of entries stay far below `i64::MAX`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// The three categorised entry kinds. Receivables are tracked separately
/// since they carry no category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Spend,
    Investment,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Income,
        TransactionKind::Spend,
        TransactionKind::Investment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Spend => "spend",
            TransactionKind::Investment => "investment",
        }
    }

    /// What the grouping entity is called for this kind.
    pub fn category_noun(&self) -> &'static str {
        match self {
            TransactionKind::Income => "source",
            TransactionKind::Spend => "category",
            TransactionKind::Investment => "asset",
        }
    }

    /// Spends and investments carry a free-text label, incomes do not.
    pub fn requires_label(&self) -> bool {
        !matches!(self, TransactionKind::Income)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "spend" => Ok(TransactionKind::Spend),
            "investment" => Ok(TransactionKind::Investment),
            other => Err(format!("Unknown kind '{}' (use income|spend|investment)", other)),
        }
    }
}

/// Income source, spend category or investment asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub kind: TransactionKind,
    pub name: String,
    pub owner_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub category_key: String,
    pub label: Option<String>,
    pub date: NaiveDate,
    pub owner_id: String,
}

/// Money owed to the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: String,
    pub amount: i64,
    pub name: String,
    pub purpose: String,
    pub date: NaiveDate,
    pub owner_id: String,
}

/// Anything that contributes an amount to a total.
pub trait HasAmount {
    fn amount(&self) -> i64;
}

impl HasAmount for Transaction {
    fn amount(&self) -> i64 {
        self.amount
    }
}

impl HasAmount for Receivable {
    fn amount(&self) -> i64 {
        self.amount
    }
}
