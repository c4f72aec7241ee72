// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

pub const DB_PATH_ENV: &str = "POCKETBOOK_DB";
pub const OWNER_ENV: &str = "POCKETBOOK_OWNER";
pub const DEFAULT_OWNER: &str = "local";
pub const DEFAULT_LOG_FILTER: &str = "pocketbook=warn";

/// Settings the `config` command may touch.
pub const KNOWN_KEYS: &[&str] = &["owner"];

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !KNOWN_KEYS.contains(&key) {
        return Err(anyhow!(
            "Unknown setting '{}' (known: {})",
            key,
            KNOWN_KEYS.join(", ")
        ));
    }
    let value = value.trim();
    if value.is_empty() {
        return Err(anyhow!("Setting '{}' must not be empty", key));
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Owner id stamped on new records. The environment wins over the stored
/// setting.
pub fn owner(conn: &Connection) -> Result<String> {
    if let Ok(v) = std::env::var(OWNER_ENV) {
        if !v.trim().is_empty() {
            return Ok(v.trim().to_string());
        }
    }
    Ok(get_setting(conn, "owner")?.unwrap_or_else(|| DEFAULT_OWNER.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn settings_round_trip_and_reject_unknown_keys() {
        let conn = conn();
        assert_eq!(get_setting(&conn, "owner").unwrap(), None);
        set_setting(&conn, "owner", " alice ").unwrap();
        assert_eq!(get_setting(&conn, "owner").unwrap().as_deref(), Some("alice"));
        set_setting(&conn, "owner", "bob").unwrap();
        assert_eq!(get_setting(&conn, "owner").unwrap().as_deref(), Some("bob"));
        assert!(set_setting(&conn, "theme", "dark").is_err());
        assert!(set_setting(&conn, "owner", "  ").is_err());
    }
}
