// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::store;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.trim().to_lowercase();
    let out = required(sub, "out")?.trim();
    let collection = sub
        .get_one::<String>("collection")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "transactions".into());

    let snapshot = store::load_snapshot(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            match collection.as_str() {
                "transactions" => {
                    wtr.write_record([
                        "id", "date", "type", "platform", "category", "amount", "owner",
                    ])?;
                    for t in &snapshot.transactions {
                        wtr.write_record([
                            t.id.to_string(),
                            t.date.to_string(),
                            t.kind.to_string(),
                            t.platform.clone(),
                            t.category.clone(),
                            t.amount.to_string(),
                            t.owner.clone(),
                        ])?;
                    }
                }
                "transfers" => {
                    wtr.write_record(["id", "date", "source", "target", "amount", "owner"])?;
                    for t in &snapshot.transfers {
                        wtr.write_record([
                            t.id.to_string(),
                            t.date.to_string(),
                            t.source.clone(),
                            t.target.clone(),
                            t.amount.to_string(),
                            t.owner.clone(),
                        ])?;
                    }
                }
                "shopping" => {
                    wtr.write_record([
                        "id",
                        "date",
                        "item_name",
                        "price_estimate",
                        "price_actual",
                        "purchased",
                        "owner",
                    ])?;
                    for s in &snapshot.shopping {
                        wtr.write_record([
                            s.id.to_string(),
                            s.date.to_string(),
                            s.item_name.clone(),
                            s.price_estimate.to_string(),
                            s.price_actual.to_string(),
                            s.purchased.to_string(),
                            s.owner.clone(),
                        ])?;
                    }
                }
                other => {
                    return Err(anyhow!(
                        "Unknown collection: {} (use transactions|transfers|shopping)",
                        other
                    ));
                }
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&snapshot)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported to {}", out);
    Ok(())
}
