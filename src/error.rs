// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures of a write intent. None of them leave a partial write behind.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} #{id} not found")]
    NotFound { collection: &'static str, id: i64 },
    #[error("Transfer source and target are both '{0}'")]
    InvalidTransfer(String),
    #[error("Category '{category}' is not valid for {kind} (expected one of: {allowed})")]
    InvalidCategory {
        category: String,
        kind: String,
        allowed: String,
    },
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(String),
    #[error("Amount {0} is larger than the accepted maximum")]
    AmountTooLarge(String),
    #[error("Item name must not be empty")]
    EmptyItemName,
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
