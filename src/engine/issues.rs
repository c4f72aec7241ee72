// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Transactions,
    Transfers,
    Shopping,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Collection::Transactions => "transactions",
            Collection::Transfers => "transfers",
            Collection::Shopping => "shopping",
        })
    }
}

/// A record the engine refused to fold into its totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    MalformedAmount {
        collection: Collection,
        id: i64,
        field: &'static str,
        raw: String,
    },
    UnknownPlatform {
        id: i64,
        raw: String,
    },
    SelfTransfer {
        id: i64,
        platform: String,
    },
    /// A contribution that would have pushed a running total past the
    /// representable range. `id` is absent when the overflowing operand is
    /// itself a total.
    Overflow {
        figure: &'static str,
        id: Option<i64>,
    },
}

impl DataIssue {
    pub fn code(&self) -> &'static str {
        match self {
            DataIssue::MalformedAmount { .. } => "malformed_amount",
            DataIssue::UnknownPlatform { .. } => "unknown_platform",
            DataIssue::SelfTransfer { .. } => "self_transfer",
            DataIssue::Overflow { .. } => "overflow",
        }
    }
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::MalformedAmount {
                collection,
                id,
                field,
                raw,
            } => write!(f, "{} #{}: {} '{}' is not a valid amount", collection, id, field, raw),
            DataIssue::UnknownPlatform { id, raw } => {
                write!(f, "transactions #{}: platform '{}' is not a known account", id, raw)
            }
            DataIssue::SelfTransfer { id, platform } => {
                write!(f, "transfers #{}: source and target are both '{}'", id, platform)
            }
            DataIssue::Overflow { figure, id: Some(id) } => {
                write!(f, "{}: record #{} overflows the total and was left out", figure, id)
            }
            DataIssue::Overflow { figure, id: None } => {
                write!(f, "{}: total overflows and was left unchanged", figure)
            }
        }
    }
}

/// Adds `amount` into `total`. On overflow `total` keeps its previous value
/// and the contribution is reported in `issues` instead.
pub fn accumulate(
    total: &mut Decimal,
    amount: Decimal,
    figure: &'static str,
    id: Option<i64>,
    issues: &mut Vec<DataIssue>,
) {
    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => {
            let issue = DataIssue::Overflow { figure, id };
            tracing::warn!(code = issue.code(), "{}", issue);
            issues.push(issue);
        }
    }
}
