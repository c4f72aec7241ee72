// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Validation pass from a raw store snapshot to clean, typed entries.
//!
//! Every later computation works on the output of [`Ledger::from_snapshot`].
//! Records that cannot be folded are dropped here and reported as
//! [`DataIssue`]s. Amounts are bounded by
//! [`MAX_AMOUNT`](crate::money::MAX_AMOUNT), and the folds
//! still add with overflow checks.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::issues::{Collection, DataIssue};
use crate::models::{Platform, Snapshot, TxKind};

/// An income or expense. A platform label outside the fixed set leaves
/// `account` empty: the entry still counts toward every account-agnostic
/// figure but credits or debits no account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub platform: String,
    #[serde(skip)]
    pub account: Option<Platform>,
    pub category: String,
    pub amount: Decimal,
}

impl Entry {
    /// Amount with income positive and expense negative.
    pub fn signed(&self) -> Decimal {
        match self.kind {
            TxKind::Income => self.amount,
            TxKind::Expense => -self.amount,
        }
    }
}

/// A transfer between accounts. Legs naming an account outside the fixed
/// set resolve to `None` and are not applied; the raw labels are kept for
/// display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movement {
    pub id: i64,
    pub date: NaiveDate,
    pub source: String,
    pub target: String,
    #[serde(skip)]
    pub source_account: Option<Platform>,
    #[serde(skip)]
    pub target_account: Option<Platform>,
    pub amount: Decimal,
}

/// A shopping list item. A price that failed to parse is `None` and left
/// out of whichever sum it would have fed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Purchase {
    pub id: i64,
    pub item_name: String,
    pub estimate: Option<Decimal>,
    pub actual: Option<Decimal>,
    pub purchased: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub entries: Vec<Entry>,
    pub movements: Vec<Movement>,
    pub purchases: Vec<Purchase>,
    pub issues: Vec<DataIssue>,
}

impl Ledger {
    pub fn from_snapshot(snapshot: &Snapshot) -> Ledger {
        let mut ledger = Ledger::default();

        for t in &snapshot.transactions {
            let amount = match t.amount.parse() {
                Ok(v) => v,
                Err(_) => {
                    ledger.flag(DataIssue::MalformedAmount {
                        collection: Collection::Transactions,
                        id: t.id,
                        field: "amount",
                        raw: t.amount.as_str().to_string(),
                    });
                    continue;
                }
            };
            let account = Platform::from_label(&t.platform);
            if account.is_none() {
                ledger.flag(DataIssue::UnknownPlatform {
                    id: t.id,
                    raw: t.platform.clone(),
                });
            }
            ledger.entries.push(Entry {
                id: t.id,
                date: t.date,
                kind: t.kind,
                platform: t.platform.clone(),
                account,
                category: t.category.clone(),
                amount,
            });
        }

        for tf in &snapshot.transfers {
            let amount = match tf.amount.parse() {
                Ok(v) => v,
                Err(_) => {
                    ledger.flag(DataIssue::MalformedAmount {
                        collection: Collection::Transfers,
                        id: tf.id,
                        field: "amount",
                        raw: tf.amount.as_str().to_string(),
                    });
                    continue;
                }
            };
            if tf.source == tf.target {
                ledger.flag(DataIssue::SelfTransfer {
                    id: tf.id,
                    platform: tf.source.clone(),
                });
                continue;
            }
            ledger.movements.push(Movement {
                id: tf.id,
                date: tf.date,
                source: tf.source.clone(),
                target: tf.target.clone(),
                source_account: Platform::from_label(&tf.source),
                target_account: Platform::from_label(&tf.target),
                amount,
            });
        }

        for item in &snapshot.shopping {
            let estimate = match item.price_estimate.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    ledger.flag(DataIssue::MalformedAmount {
                        collection: Collection::Shopping,
                        id: item.id,
                        field: "price_estimate",
                        raw: item.price_estimate.as_str().to_string(),
                    });
                    None
                }
            };
            let actual = match item.price_actual.parse_or_zero() {
                Ok(v) => Some(v),
                Err(_) => {
                    ledger.flag(DataIssue::MalformedAmount {
                        collection: Collection::Shopping,
                        id: item.id,
                        field: "price_actual",
                        raw: item.price_actual.as_str().to_string(),
                    });
                    None
                }
            };
            ledger.purchases.push(Purchase {
                id: item.id,
                item_name: item.item_name.clone(),
                estimate,
                actual,
                purchased: item.purchased,
            });
        }

        ledger
    }

    fn flag(&mut self, issue: DataIssue) {
        tracing::warn!(code = issue.code(), "{}", issue);
        self.issues.push(issue);
    }
}
