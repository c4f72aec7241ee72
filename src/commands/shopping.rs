// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::config;
use crate::engine::{Ledger, balance, shopping};
use crate::models::ShoppingFields;
use crate::money::fmt_rupiah;
use crate::store;
use crate::utils::{maybe_print_json, parse_amount, parse_date, parse_id, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("check", sub)) => toggle(conn, sub, true)?,
        Some(("uncheck", sub)) => toggle(conn, sub, false)?,
        Some(("actual", sub)) => actual(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let f = ShoppingFields {
        date: parse_date(required(sub, "date")?)?,
        item_name: required(sub, "item")?.to_string(),
        price_estimate: parse_amount(required(sub, "estimate")?)?,
    };
    let owner = config::owner(conn)?;
    let id = store::create_shopping_item(conn, &owner, &f)?;
    println!(
        "Planned #{}: {} (est. {})",
        id,
        f.item_name.trim(),
        fmt_rupiah(f.price_estimate)
    );
    Ok(())
}

fn toggle(conn: &Connection, sub: &clap::ArgMatches, purchased: bool) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    store::toggle_shopping_purchased(conn, id, purchased)?;
    println!(
        "Item #{} marked {}",
        id,
        if purchased { "purchased" } else { "not purchased" }
    );
    Ok(())
}

fn actual(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let price = parse_amount(required(sub, "price")?)?;
    store::set_shopping_actual_price(conn, id, price)?;
    println!("Item #{} paid {}", id, fmt_rupiah(price));
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    store::delete_shopping_item(conn, id)?;
    println!("Deleted item #{}", id);
    Ok(())
}

#[derive(Serialize)]
struct ShoppingRow {
    id: i64,
    date: String,
    item: String,
    purchased: bool,
    estimate: String,
    actual: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snapshot = store::load_snapshot(conn)?;
    let data: Vec<ShoppingRow> = snapshot
        .shopping
        .iter()
        .map(|s| ShoppingRow {
            id: s.id,
            date: s.date.to_string(),
            item: s.item_name.clone(),
            purchased: s.purchased,
            estimate: s.price_estimate.to_string(),
            actual: s.price_actual.to_string(),
        })
        .collect();

    if json_flag || jsonl_flag {
        maybe_print_json(json_flag, jsonl_flag, &data)?;
        return Ok(());
    }

    let mut ledger = Ledger::from_snapshot(&snapshot);
    let mut issues = std::mem::take(&mut ledger.issues);
    let liquid = balance::account_balances(&ledger.entries, &ledger.movements, &mut issues)
        .total(&mut issues);
    let projection = shopping::project(&ledger.purchases, liquid, &mut issues);

    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                if r.purchased { "[x]" } else { "[ ]" }.to_string(),
                r.item.clone(),
                r.estimate.clone(),
                r.actual.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Done", "Item", "Estimate", "Actual"], rows)
    );
    println!("{}", super::dashboard::projection_table(&projection));
    if !issues.is_empty() {
        eprintln!(
            "{} data issue(s) found; run `pocketbook doctor` for details",
            issues.len()
        );
    }
    Ok(())
}
