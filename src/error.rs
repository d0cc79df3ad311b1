// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::TransactionKind;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Invalid financial year '{0}', expected YYYY-YYYY")]
    InvalidFinancialYear(String),
    #[error("Unknown {kind} category key '{key}'")]
    UnknownCategoryKey { kind: TransactionKind, key: String },
    #[error("Amount must be non-negative, got {0}")]
    NegativeAmount(i64),
    #[error("Amount {0} exceeds the limit of {max}", max = crate::models::MAX_AMOUNT)]
    AmountTooLarge(i64),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("A {0} entry needs a label")]
    MissingLabel(TransactionKind),
    #[error("{kind} category '{name}' not found")]
    CategoryNotFound { kind: TransactionKind, name: String },
    #[error("Transaction '{0}' not found")]
    TransactionNotFound(String),
    #[error("Receivable '{0}' not found")]
    ReceivableNotFound(String),
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
