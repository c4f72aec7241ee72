// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{month_filter, required};
use crate::config;
use crate::engine::{self, ledger::Movement};
use crate::models::{Platform, TransferFields};
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

fn platform(sub: &clap::ArgMatches, name: &str) -> Result<Platform> {
    required(sub, name)?.parse().map_err(|e: String| anyhow!(e))
}

fn fields(sub: &clap::ArgMatches) -> Result<TransferFields> {
    Ok(TransferFields {
        date: parse_date(required(sub, "date")?)?,
        source: platform(sub, "from")?,
        target: platform(sub, "to")?,
        amount: parse_amount(required(sub, "amount")?)?,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let f = fields(sub)?;
    let owner = config::owner(conn)?;
    let id = store::create_transfer(conn, &owner, &f)?;
    println!(
        "Transfer #{}: {} {} -> {} on {}",
        id,
        fmt_rupiah(f.amount),
        f.source,
        f.target,
        f.date
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let f = fields(sub)?;
    let owner = config::owner(conn)?;
    store::update_transfer(conn, id, &owner, &f)?;
    println!("Updated transfer #{}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    store::delete_transfer(conn, id)?;
    println!("Deleted transfer #{}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransferRow {
    pub id: i64,
    pub date: String,
    pub source: String,
    pub target: String,
    pub amount: String,
}

impl From<&Movement> for TransferRow {
    fn from(m: &Movement) -> Self {
        TransferRow {
            id: m.id,
            date: m.date.to_string(),
            source: m.source.clone(),
            target: m.target.clone(),
            amount: fmt_rupiah(m.amount),
        }
    }
}

pub fn table(data: &[TransferRow]) -> Table {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                format!("{} -> {}", r.source, r.target),
                r.amount.clone(),
            ]
        })
        .collect();
    pretty_table(&["ID", "Date", "Route", "Amount"], rows)
}

/// Transfers of the selected month, newest first. Self-transfers and
/// unusable amounts are left out, as on the dashboard.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransferRow>> {
    let filter = month_filter(sub)?;
    let view = engine::compute(&filter, &store::load_snapshot(conn)?);
    Ok(view.transfers.iter().map(TransferRow::from).collect())
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
