// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Write intents and full-snapshot reads against the SQLite store.
//!
//! Writes validate at the boundary and report failures to the caller; the
//! engine only ever sees what [`load_snapshot`] returns afterwards.

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::models::{
    ShoppingFields, ShoppingItem, Snapshot, Transaction, TransactionFields, Transfer,
    TransferFields, TxKind,
};
use crate::money::{MAX_AMOUNT, StoredAmount};

fn check_amount(amount: Decimal) -> Result<(), StoreError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(StoreError::NegativeAmount(amount.to_string()));
    }
    if amount > MAX_AMOUNT {
        return Err(StoreError::AmountTooLarge(amount.to_string()));
    }
    Ok(())
}

fn check_changed(changed: usize, collection: &'static str, id: i64) -> Result<(), StoreError> {
    if changed == 0 {
        return Err(StoreError::NotFound { collection, id });
    }
    Ok(())
}

pub fn validate_transaction(fields: &TransactionFields) -> Result<(), StoreError> {
    check_amount(fields.amount)?;
    let allowed = fields.kind.categories();
    if !allowed.contains(&fields.category.as_str()) {
        return Err(StoreError::InvalidCategory {
            category: fields.category.clone(),
            kind: fields.kind.to_string(),
            allowed: allowed.join(", "),
        });
    }
    Ok(())
}

pub fn validate_transfer(fields: &TransferFields) -> Result<(), StoreError> {
    check_amount(fields.amount)?;
    if fields.source == fields.target {
        return Err(StoreError::InvalidTransfer(fields.source.to_string()));
    }
    Ok(())
}

pub fn create_transaction(
    conn: &Connection,
    owner: &str,
    fields: &TransactionFields,
) -> Result<i64, StoreError> {
    validate_transaction(fields)?;
    conn.execute(
        "INSERT INTO transactions(date, type, platform, category, amount, owner)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            fields.date.to_string(),
            fields.kind.as_str(),
            fields.platform.as_str(),
            fields.category,
            StoredAmount::from(fields.amount).as_str(),
            owner
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, "transaction created");
    Ok(id)
}

/// Full replace of every user-editable field.
pub fn update_transaction(
    conn: &Connection,
    id: i64,
    owner: &str,
    fields: &TransactionFields,
) -> Result<(), StoreError> {
    validate_transaction(fields)?;
    let changed = conn.execute(
        "UPDATE transactions SET date=?1, type=?2, platform=?3, category=?4, amount=?5, owner=?6
         WHERE id=?7",
        params![
            fields.date.to_string(),
            fields.kind.as_str(),
            fields.platform.as_str(),
            fields.category,
            StoredAmount::from(fields.amount).as_str(),
            owner,
            id
        ],
    )?;
    check_changed(changed, "transactions", id)?;
    tracing::debug!(id, "transaction updated");
    Ok(())
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    check_changed(changed, "transactions", id)?;
    tracing::debug!(id, "transaction deleted");
    Ok(())
}

pub fn create_transfer(
    conn: &Connection,
    owner: &str,
    fields: &TransferFields,
) -> Result<i64, StoreError> {
    validate_transfer(fields)?;
    conn.execute(
        "INSERT INTO transfers(date, source, target, amount, owner) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fields.date.to_string(),
            fields.source.as_str(),
            fields.target.as_str(),
            StoredAmount::from(fields.amount).as_str(),
            owner
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, "transfer created");
    Ok(id)
}

pub fn update_transfer(
    conn: &Connection,
    id: i64,
    owner: &str,
    fields: &TransferFields,
) -> Result<(), StoreError> {
    validate_transfer(fields)?;
    let changed = conn.execute(
        "UPDATE transfers SET date=?1, source=?2, target=?3, amount=?4, owner=?5 WHERE id=?6",
        params![
            fields.date.to_string(),
            fields.source.as_str(),
            fields.target.as_str(),
            StoredAmount::from(fields.amount).as_str(),
            owner,
            id
        ],
    )?;
    check_changed(changed, "transfers", id)?;
    tracing::debug!(id, "transfer updated");
    Ok(())
}

pub fn delete_transfer(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let changed = conn.execute("DELETE FROM transfers WHERE id=?1", params![id])?;
    check_changed(changed, "transfers", id)?;
    tracing::debug!(id, "transfer deleted");
    Ok(())
}

/// New items start unpurchased with an actual price of zero.
pub fn create_shopping_item(
    conn: &Connection,
    owner: &str,
    fields: &ShoppingFields,
) -> Result<i64, StoreError> {
    check_amount(fields.price_estimate)?;
    let name = fields.item_name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyItemName);
    }
    conn.execute(
        "INSERT INTO shopping(date, item_name, price_estimate, price_actual, purchased, owner)
         VALUES (?1, ?2, ?3, '0', 0, ?4)",
        params![
            fields.date.to_string(),
            name,
            StoredAmount::from(fields.price_estimate).as_str(),
            owner
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, "shopping item created");
    Ok(id)
}

pub fn toggle_shopping_purchased(
    conn: &Connection,
    id: i64,
    purchased: bool,
) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE shopping SET purchased=?1 WHERE id=?2",
        params![purchased, id],
    )?;
    check_changed(changed, "shopping", id)?;
    tracing::debug!(id, purchased, "shopping item toggled");
    Ok(())
}

pub fn set_shopping_actual_price(
    conn: &Connection,
    id: i64,
    price: Decimal,
) -> Result<(), StoreError> {
    check_amount(price)?;
    let changed = conn.execute(
        "UPDATE shopping SET price_actual=?1 WHERE id=?2",
        params![StoredAmount::from(price).as_str(), id],
    )?;
    check_changed(changed, "shopping", id)?;
    tracing::debug!(id, "shopping actual price set");
    Ok(())
}

pub fn delete_shopping_item(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let changed = conn.execute("DELETE FROM shopping WHERE id=?1", params![id])?;
    check_changed(changed, "shopping", id)?;
    tracing::debug!(id, "shopping item deleted");
    Ok(())
}

/// Dates are day-granular `YYYY-MM-DD`. A row whose date cannot be read is
/// skipped with a warning rather than failing the whole load.
fn read_date(collection: &str, id: i64, raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            tracing::warn!(collection, id, raw, "unreadable date, row skipped");
            None
        }
    }
}

fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, date, type, platform, category, amount, owner FROM transactions ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let Some(date) = read_date("transactions", id, &date) else {
            continue;
        };
        let kind = if kind == TxKind::Income.as_str() {
            TxKind::Income
        } else {
            TxKind::Expense
        };
        out.push(Transaction {
            id,
            date,
            kind,
            platform: r.get(3)?,
            category: r.get(4)?,
            amount: StoredAmount::new(r.get::<_, String>(5)?),
            owner: r.get(6)?,
        });
    }
    Ok(out)
}

fn load_transfers(conn: &Connection) -> Result<Vec<Transfer>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT id, date, source, target, amount, owner FROM transfers ORDER BY id")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let Some(date) = read_date("transfers", id, &date) else {
            continue;
        };
        out.push(Transfer {
            id,
            date,
            source: r.get(2)?,
            target: r.get(3)?,
            amount: StoredAmount::new(r.get::<_, String>(4)?),
            owner: r.get(5)?,
        });
    }
    Ok(out)
}

fn load_shopping(conn: &Connection) -> Result<Vec<ShoppingItem>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, date, item_name, price_estimate, price_actual, purchased, owner
         FROM shopping ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let Some(date) = read_date("shopping", id, &date) else {
            continue;
        };
        out.push(ShoppingItem {
            id,
            date,
            item_name: r.get(2)?,
            price_estimate: StoredAmount::new(r.get::<_, String>(3)?),
            price_actual: StoredAmount::new(r.get::<_, String>(4)?),
            purchased: r.get(5)?,
            owner: r.get(6)?,
        });
    }
    Ok(out)
}

/// Re-materialises all three collections in full.
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot, StoreError> {
    let snapshot = Snapshot {
        transactions: load_transactions(conn)?,
        transfers: load_transfers(conn)?,
        shopping: load_shopping(conn)?,
    };
    tracing::debug!(
        transactions = snapshot.transactions.len(),
        transfers = snapshot.transfers.len(),
        shopping = snapshot.shopping.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}
