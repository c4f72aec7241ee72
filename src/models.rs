// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::StoredAmount;

/// Accounts money can live in. The set is fixed; anything else found in the
/// store is treated as an unknown label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "BRI")]
    Bri,
    #[serde(rename = "BCA")]
    Bca,
    Flazz,
    Wallet,
}

pub const PLATFORMS: [Platform; 4] = [
    Platform::Bri,
    Platform::Bca,
    Platform::Flazz,
    Platform::Wallet,
];

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Bri => "BRI",
            Platform::Bca => "BCA",
            Platform::Flazz => "Flazz",
            Platform::Wallet => "Wallet",
        }
    }

    /// Exact-label lookup, `None` for labels outside the fixed set.
    pub fn from_label(s: &str) -> Option<Platform> {
        PLATFORMS.into_iter().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::from_label(s.trim()).ok_or_else(|| {
            format!(
                "unknown platform '{}' (expected one of {})",
                s,
                PLATFORMS.map(|p| p.as_str()).join(", ")
            )
        })
    }
}

/// Income sorts before expense, matching the `(+)` / `(-)` display markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            TxKind::Income => "(+)",
            TxKind::Expense => "(-)",
        }
    }

    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TxKind::Income => INCOME_CATEGORIES,
            TxKind::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(format!("unknown type '{}' (income|expense)", other)),
        }
    }
}

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Drink",
    "Transportation",
    "Gasoline",
    "Shopping",
    "Bills",
    "Health",
    "Reimbursement",
    "Rent",
    "Entertainment",
];

pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Refund", "Bonus", "Investment"];

/// A transaction as delivered by the store. `platform` stays a raw label and
/// `amount` stays the stored text; both are checked by the ledger pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub platform: String,
    pub category: String,
    pub amount: StoredAmount,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    pub date: NaiveDate,
    pub source: String,
    pub target: String,
    pub amount: StoredAmount,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: i64,
    pub date: NaiveDate,
    pub item_name: String,
    pub price_estimate: StoredAmount,
    pub price_actual: StoredAmount,
    pub purchased: bool,
    pub owner: String,
}

/// Full replace-on-change snapshot of the three collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub transfers: Vec<Transfer>,
    pub shopping: Vec<ShoppingItem>,
}

/// Fields supplied by the user for a create or full-replace edit.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub date: NaiveDate,
    pub kind: TxKind,
    pub platform: Platform,
    pub category: String,
    pub amount: rust_decimal::Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferFields {
    pub date: NaiveDate,
    pub source: Platform,
    pub target: Platform,
    pub amount: rust_decimal::Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingFields {
    pub date: NaiveDate,
    pub item_name: String,
    pub price_estimate: rust_decimal::Decimal,
}
