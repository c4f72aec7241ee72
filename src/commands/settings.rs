// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::config;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = required(sub, "key")?.trim();
            let value = match key {
                "owner" => config::owner(conn)?,
                _ => config::get_setting(conn, key)?.unwrap_or_default(),
            };
            println!("{} = {}", key, value);
        }
        Some(("set", sub)) => {
            let key = required(sub, "key")?.trim();
            let value = required(sub, "value")?;
            config::set_setting(conn, key, value)?;
            println!("{} set to {}", key, value.trim());
        }
        _ => {
            println!("owner = {}", config::owner(conn)?);
        }
    }
    Ok(())
}
