// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::month_filter;
use super::transactions::{self, TransactionRow};
use super::transfers::{self, TransferRow};
use crate::engine::aggregate::{CategoryView, EMPTY_PLACEHOLDER, SummaryView};
use crate::engine::shopping::{ProjectionStatus, ShoppingProjection};
use crate::engine::{Dashboard, DashboardView};
use crate::money::fmt_rupiah;
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use comfy_table::Table;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Display;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let filter = month_filter(sub)?;
    let dashboard = Dashboard::new(filter, store::load_snapshot(conn)?);
    let view = dashboard.view();
    if maybe_print_json(sub.get_flag("json"), false, view)? {
        return Ok(());
    }
    render(view);
    Ok(())
}

fn render(view: &DashboardView) {
    println!("== {} ==", view.filter);
    println!(
        "{}",
        pretty_table(
            &["Monthly Income", "Monthly Expense", "Total Balance"],
            vec![vec![
                fmt_rupiah(view.monthly_income),
                fmt_rupiah(view.monthly_expense),
                fmt_rupiah(view.cumulative_balance),
            ]],
        )
    );

    let mut accounts: Vec<Vec<String>> = view
        .account_balances
        .iter()
        .map(|(p, v)| vec![p.to_string(), fmt_rupiah(v)])
        .collect();
    accounts.push(vec!["Total".into(), fmt_rupiah(view.current_wallet_balance)]);
    println!("{}", pretty_table(&["Account", "Balance"], accounts));

    println!("Category (daily)");
    println!("{}", category_table(&view.category_daily));
    println!("Category (weekly)");
    println!("{}", category_table(&view.category_weekly));
    println!("Summary (daily)");
    println!("{}", summary_table("Date", &view.summary_daily));
    println!("Summary (weekly)");
    println!("{}", summary_table("Week", &view.summary_weekly));

    println!("Spending by category");
    println!("{}", totals_table(&view.expense_by_category));
    println!("Income by category");
    println!("{}", totals_table(&view.income_by_category));

    println!("Transactions");
    let txs: Vec<TransactionRow> = view.transactions.iter().map(TransactionRow::from).collect();
    println!("{}", transactions::table(&txs));
    println!("Transfers");
    let tfs: Vec<TransferRow> = view.transfers.iter().map(TransferRow::from).collect();
    println!("{}", transfers::table(&tfs));

    println!("{}", projection_table(&view.shopping_projection));

    if !view.issues.is_empty() {
        eprintln!(
            "{} data issue(s) found; run `pocketbook doctor` for details",
            view.issues.len()
        );
    }
}

/// One kind's per-category totals, as fed to the income and spending charts.
pub fn totals_table(totals: &BTreeMap<String, Decimal>) -> Table {
    if totals.is_empty() {
        return pretty_table(
            &["Category", "Amount"],
            vec![vec![EMPTY_PLACEHOLDER.into(), String::new()]],
        );
    }
    let rows = totals
        .iter()
        .map(|(category, total)| vec![category.clone(), fmt_rupiah(*total)])
        .collect();
    pretty_table(&["Category", "Amount"], rows)
}

pub fn category_table<B: Display>(view: &CategoryView<B>) -> Table {
    if view.is_empty() {
        return pretty_table(
            &["Category", "Amount"],
            vec![vec![EMPTY_PLACEHOLDER.into(), String::new()]],
        );
    }
    let rows = view
        .lines
        .iter()
        .map(|l| vec![l.label(), fmt_rupiah(l.total)])
        .collect();
    pretty_table(&["Category", "Amount"], rows)
}

pub fn summary_table<B: Display>(bucket_header: &str, view: &SummaryView<B>) -> Table {
    if view.is_empty() {
        return pretty_table(
            &[bucket_header, "Income", "Expense"],
            vec![vec![EMPTY_PLACEHOLDER.into(), String::new(), String::new()]],
        );
    }
    let rows = view
        .rows
        .iter()
        .map(|r| {
            vec![
                r.bucket.to_string(),
                fmt_rupiah(r.income),
                fmt_rupiah(r.expense),
            ]
        })
        .collect();
    pretty_table(&[bucket_header, "Income", "Expense"], rows)
}

pub fn projection_table(p: &ShoppingProjection) -> Table {
    let status = match p.status {
        ProjectionStatus::Covered => "OK",
        ProjectionStatus::Deficit => "DEFICIT",
    };
    pretty_table(
        &[
            "Estimate (all)",
            "Realized",
            "Wallet",
            "Outstanding",
            "Projected",
            "Status",
        ],
        vec![vec![
            fmt_rupiah(p.total_estimate_all),
            fmt_rupiah(p.total_realized),
            fmt_rupiah(p.liquid_balance),
            fmt_rupiah(p.outstanding_estimate),
            fmt_rupiah(p.projected_balance),
            status.to_string(),
        ]],
    )
}
