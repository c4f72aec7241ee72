// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{month_filter, required};
use crate::config;
use crate::engine::{self, ledger::Entry};
use crate::models::{Platform, TransactionFields, TxKind};
use crate::money::fmt_rupiah;
use crate::store;
use crate::utils::{maybe_print_json, parse_amount, parse_date, parse_id, pretty_table};
use anyhow::{Result, anyhow};
use comfy_table::Table;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn fields(sub: &clap::ArgMatches) -> Result<TransactionFields> {
    let kind: TxKind = required(sub, "type")?.parse().map_err(|e: String| anyhow!(e))?;
    let platform: Platform = required(sub, "platform")?
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    Ok(TransactionFields {
        date: parse_date(required(sub, "date")?)?,
        kind,
        platform,
        category: required(sub, "category")?.trim().to_string(),
        amount: parse_amount(required(sub, "amount")?)?,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let f = fields(sub)?;
    let owner = config::owner(conn)?;
    let id = store::create_transaction(conn, &owner, &f)?;
    println!(
        "Recorded {} #{}: {} {} on {} ({})",
        f.kind,
        id,
        f.category,
        fmt_rupiah(f.amount),
        f.date,
        f.platform
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let f = fields(sub)?;
    let owner = config::owner(conn)?;
    store::update_transaction(conn, id, &owner, &f)?;
    println!("Updated transaction #{}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    store::delete_transaction(conn, id)?;
    println!("Deleted transaction #{}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", table(&data));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub platform: String,
    pub amount: String,
}

impl From<&Entry> for TransactionRow {
    fn from(e: &Entry) -> Self {
        let sign = match e.kind {
            TxKind::Income => "+",
            TxKind::Expense => "-",
        };
        TransactionRow {
            id: e.id,
            date: e.date.to_string(),
            r#type: e.kind.to_string(),
            category: e.category.clone(),
            platform: e.platform.clone(),
            amount: format!("{} {}", sign, fmt_rupiah(e.amount)),
        }
    }
}

pub fn table(data: &[TransactionRow]) -> Table {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.r#type.clone(),
                r.category.clone(),
                r.platform.clone(),
                r.amount.clone(),
            ]
        })
        .collect();
    pretty_table(
        &["ID", "Date", "Type", "Category", "Platform", "Amount"],
        rows,
    )
}

/// Transactions of the selected month, newest first, as the dashboard sees
/// them. Records with an unusable amount are left out; `doctor` lists them.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = month_filter(sub)?;
    let view = engine::compute(&filter, &store::load_snapshot(conn)?);
    Ok(view.transactions.iter().map(TransactionRow::from).collect())
}
