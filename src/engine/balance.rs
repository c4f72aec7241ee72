// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Strict-monthly, cumulative and all-time balances.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::issues::{DataIssue, accumulate};
use super::ledger::{Entry, Movement};
use crate::models::{PLATFORMS, Platform, TxKind};
use crate::period::MonthFilter;

/// Entries dated inside the selected month.
pub fn strict_entries<'a>(entries: &'a [Entry], filter: &MonthFilter) -> Vec<&'a Entry> {
    entries.iter().filter(|e| filter.contains(e.date)).collect()
}

pub fn strict_movements<'a>(movements: &'a [Movement], filter: &MonthFilter) -> Vec<&'a Movement> {
    movements.iter().filter(|m| filter.contains(m.date)).collect()
}

/// Entries dated on or before the last day of the selected month.
pub fn cumulative_entries<'a>(entries: &'a [Entry], filter: &MonthFilter) -> Vec<&'a Entry> {
    entries
        .iter()
        .filter(|e| filter.is_on_or_before_end(e.date))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

pub fn monthly_totals(strict: &[&Entry], issues: &mut Vec<DataIssue>) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for e in strict {
        match e.kind {
            TxKind::Income => {
                accumulate(&mut totals.income, e.amount, "monthly_income", Some(e.id), issues)
            }
            TxKind::Expense => {
                accumulate(&mut totals.expense, e.amount, "monthly_expense", Some(e.id), issues)
            }
        }
    }
    totals
}

/// Income minus expense across the cumulative set. Account-agnostic, so
/// transfers never enter it and an unknown platform label still counts.
pub fn cumulative_balance(cumulative: &[&Entry], issues: &mut Vec<DataIssue>) -> Decimal {
    let mut total = Decimal::ZERO;
    for e in cumulative {
        accumulate(&mut total, e.signed(), "cumulative_balance", Some(e.id), issues);
    }
    total
}

/// Running balance of every account in the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalances(BTreeMap<Platform, Decimal>);

impl AccountBalances {
    pub fn zeroed() -> Self {
        AccountBalances(PLATFORMS.iter().map(|p| (*p, Decimal::ZERO)).collect())
    }

    pub fn get(&self, platform: Platform) -> Decimal {
        self.0.get(&platform).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, Decimal)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    /// Liquid balance: the sum over every account.
    pub fn total(&self, issues: &mut Vec<DataIssue>) -> Decimal {
        let mut total = Decimal::ZERO;
        for v in self.0.values() {
            accumulate(&mut total, *v, "current_wallet_balance", None, issues);
        }
        total
    }

    fn apply(&mut self, platform: Platform, delta: Decimal, id: i64, issues: &mut Vec<DataIssue>) {
        let balance = self.0.entry(platform).or_insert(Decimal::ZERO);
        accumulate(balance, delta, "account_balances", Some(id), issues);
    }
}

/// Folds the full history into per-account balances: transactions first,
/// then transfers in list order. A transaction or transfer leg naming an
/// unknown account is skipped; the known leg of a transfer still applies.
pub fn account_balances(
    entries: &[Entry],
    movements: &[Movement],
    issues: &mut Vec<DataIssue>,
) -> AccountBalances {
    let mut balances = AccountBalances::zeroed();

    for e in entries {
        match e.account {
            Some(account) => balances.apply(account, e.signed(), e.id, issues),
            None => tracing::debug!(
                id = e.id,
                platform = %e.platform,
                "transaction outside the known accounts left out of account balances"
            ),
        }
    }

    for m in movements {
        if let Some(source) = m.source_account {
            balances.apply(source, -m.amount, m.id, issues);
        }
        if let Some(target) = m.target_account {
            balances.apply(target, m.amount, m.id, issues);
        }
        if m.source_account.is_none() || m.target_account.is_none() {
            tracing::debug!(
                id = m.id,
                source = %m.source,
                target = %m.target,
                "transfer leg outside the known accounts ignored"
            );
        }
    }

    balances
}
