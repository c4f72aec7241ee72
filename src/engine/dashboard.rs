// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ties the balance engine, the aggregator and the shopping projector
//! together for one selected month.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::aggregate::{self, CategoryView, SummaryView};
use super::balance::{self, AccountBalances};
use super::issues::DataIssue;
use super::ledger::{Entry, Ledger, Movement};
use super::shopping::{self, ShoppingProjection};
use crate::models::{ShoppingItem, Snapshot, Transaction, Transfer, TxKind};
use crate::period::{MonthFilter, WeekBucket};

/// Everything the presentation layer needs for one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filter: MonthFilter,
    pub monthly_income: Decimal,
    pub monthly_expense: Decimal,
    pub cumulative_balance: Decimal,
    pub account_balances: AccountBalances,
    pub current_wallet_balance: Decimal,
    pub category_daily: CategoryView<NaiveDate>,
    pub category_weekly: CategoryView<WeekBucket>,
    pub summary_daily: SummaryView<NaiveDate>,
    pub summary_weekly: SummaryView<WeekBucket>,
    pub expense_by_category: BTreeMap<String, Decimal>,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub transactions: Vec<Entry>,
    pub transfers: Vec<Movement>,
    pub shopping_projection: ShoppingProjection,
    pub issues: Vec<DataIssue>,
}

pub fn compute(filter: &MonthFilter, snapshot: &Snapshot) -> DashboardView {
    let mut ledger = Ledger::from_snapshot(snapshot);
    let mut issues = std::mem::take(&mut ledger.issues);

    let strict = balance::strict_entries(&ledger.entries, filter);
    let cumulative = balance::cumulative_entries(&ledger.entries, filter);

    let totals = balance::monthly_totals(&strict, &mut issues);
    let cumulative_balance = balance::cumulative_balance(&cumulative, &mut issues);
    let account_balances =
        balance::account_balances(&ledger.entries, &ledger.movements, &mut issues);
    let current_wallet_balance = account_balances.total(&mut issues);

    let shopping_projection =
        shopping::project(&ledger.purchases, current_wallet_balance, &mut issues);

    let category_daily = aggregate::category_daily(&strict, &mut issues);
    let category_weekly = aggregate::category_weekly(&strict, &mut issues);
    let summary_daily = aggregate::summary_daily(&strict, &mut issues);
    let summary_weekly = aggregate::summary_weekly(&strict, &mut issues);
    let expense_by_category = aggregate::category_totals(&strict, TxKind::Expense, &mut issues);
    let income_by_category = aggregate::category_totals(&strict, TxKind::Income, &mut issues);

    let mut transactions: Vec<Entry> = strict.iter().map(|e| (*e).clone()).collect();
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    let mut transfers: Vec<Movement> = balance::strict_movements(&ledger.movements, filter)
        .into_iter()
        .cloned()
        .collect();
    transfers.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    tracing::debug!(
        filter = %filter,
        strict = strict.len(),
        cumulative = cumulative.len(),
        all_time = ledger.entries.len(),
        transfers = ledger.movements.len(),
        issues = issues.len(),
        "dashboard recomputed"
    );

    DashboardView {
        filter: *filter,
        monthly_income: totals.income,
        monthly_expense: totals.expense,
        cumulative_balance,
        current_wallet_balance,
        category_daily,
        category_weekly,
        summary_daily,
        summary_weekly,
        expense_by_category,
        income_by_category,
        account_balances,
        transactions,
        transfers,
        shopping_projection,
        issues,
    }
}

/// Owns the selected month and the latest snapshot of each collection.
///
/// Every state change triggers one full synchronous recomputation; there is
/// no incremental patching.
#[derive(Debug, Clone)]
pub struct Dashboard {
    filter: MonthFilter,
    snapshot: Snapshot,
    view: DashboardView,
}

impl Dashboard {
    pub fn new(filter: MonthFilter, snapshot: Snapshot) -> Self {
        let view = compute(&filter, &snapshot);
        Dashboard {
            filter,
            snapshot,
            view,
        }
    }

    pub fn filter(&self) -> &MonthFilter {
        &self.filter
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn set_filter(&mut self, filter: MonthFilter) -> &DashboardView {
        self.filter = filter;
        self.refresh()
    }

    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) -> &DashboardView {
        self.snapshot.transactions = transactions;
        self.refresh()
    }

    pub fn replace_transfers(&mut self, transfers: Vec<Transfer>) -> &DashboardView {
        self.snapshot.transfers = transfers;
        self.refresh()
    }

    pub fn replace_shopping(&mut self, shopping: Vec<ShoppingItem>) -> &DashboardView {
        self.snapshot.shopping = shopping;
        self.refresh()
    }

    fn refresh(&mut self) -> &DashboardView {
        self.view = compute(&self.filter, &self.snapshot);
        &self.view
    }
}
