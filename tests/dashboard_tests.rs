// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::commands::{dashboard, doctor};
use pocketbook::engine::{Dashboard, compute};
use pocketbook::models::{Platform, ShoppingFields, TransactionFields, TransferFields, TxKind};
use pocketbook::period::MonthFilter;
use pocketbook::{db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn march() -> MonthFilter {
    MonthFilter::new(2024, 2).unwrap()
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    store::create_transaction(
        &conn,
        "u1",
        &TransactionFields {
            date: d("2024-03-05"),
            kind: TxKind::Income,
            platform: Platform::Bca,
            category: "Salary".into(),
            amount: dec!(5000000),
        },
    )
    .unwrap();
    store::create_transaction(
        &conn,
        "u1",
        &TransactionFields {
            date: d("2024-03-10"),
            kind: TxKind::Expense,
            platform: Platform::Bca,
            category: "Food & Drink".into(),
            amount: dec!(150000),
        },
    )
    .unwrap();
    conn
}

fn add_item(conn: &Connection, name: &str, estimate: Decimal) -> i64 {
    store::create_shopping_item(
        conn,
        "u1",
        &ShoppingFields {
            date: d("2024-03-11"),
            item_name: name.into(),
            price_estimate: estimate,
        },
    )
    .unwrap()
}

#[test]
fn march_scenario_from_the_store() {
    let conn = setup();
    let view = compute(&march(), &store::load_snapshot(&conn).unwrap());
    assert_eq!(view.monthly_income, dec!(5000000));
    assert_eq!(view.monthly_expense, dec!(150000));
    assert_eq!(view.cumulative_balance, dec!(4850000));
    assert_eq!(view.account_balances.get(Platform::Bri), Decimal::ZERO);
    assert_eq!(view.account_balances.get(Platform::Bca), dec!(4850000));
    assert_eq!(view.account_balances.get(Platform::Flazz), Decimal::ZERO);
    assert_eq!(view.account_balances.get(Platform::Wallet), Decimal::ZERO);
    assert_eq!(view.category_daily.lines.len(), 2);
    assert_eq!(view.summary_weekly.rows.len(), 2);
}

#[test]
fn shopping_projection_covered_and_deficit() {
    let conn = setup();
    add_item(&conn, "Shoes", dec!(200000));
    let bought = add_item(&conn, "Bag", dec!(100000));
    store::toggle_shopping_purchased(&conn, bought, true).unwrap();
    store::set_shopping_actual_price(&conn, bought, dec!(90000)).unwrap();

    let view = compute(&march(), &store::load_snapshot(&conn).unwrap());
    let p = view.shopping_projection;
    assert_eq!(p.outstanding_estimate, dec!(200000));
    assert_eq!(p.total_realized, dec!(90000));
    assert_eq!(p.total_estimate_all, dec!(300000));
    assert_eq!(p.projected_balance, dec!(4650000));
    assert!(!p.is_deficit());

    // Move the wallet down to 150000 liquid.
    store::create_transaction(
        &conn,
        "u1",
        &TransactionFields {
            date: d("2024-03-20"),
            kind: TxKind::Expense,
            platform: Platform::Bca,
            category: "Rent".into(),
            amount: dec!(4700000),
        },
    )
    .unwrap();
    let view = compute(&march(), &store::load_snapshot(&conn).unwrap());
    assert_eq!(view.current_wallet_balance, dec!(150000));
    assert_eq!(view.shopping_projection.projected_balance, dec!(-50000));
    assert!(view.shopping_projection.is_deficit());
}

#[test]
fn transfers_do_not_change_the_cumulative_balance() {
    let conn = setup();
    store::create_transfer(
        &conn,
        "u1",
        &TransferFields {
            date: d("2024-03-12"),
            source: Platform::Bca,
            target: Platform::Flazz,
            amount: dec!(250000),
        },
    )
    .unwrap();
    let view = compute(&march(), &store::load_snapshot(&conn).unwrap());
    assert_eq!(view.cumulative_balance, dec!(4850000));
    assert_eq!(view.account_balances.get(Platform::Bca), dec!(4600000));
    assert_eq!(view.account_balances.get(Platform::Flazz), dec!(250000));
    assert_eq!(view.current_wallet_balance, dec!(4850000));
    assert_eq!(view.transfers.len(), 1);

    let april = compute(
        &MonthFilter::new(2024, 3).unwrap(),
        &store::load_snapshot(&conn).unwrap(),
    );
    assert!(april.transfers.is_empty());
    assert_eq!(april.account_balances.get(Platform::Flazz), dec!(250000));
}

#[test]
fn bad_records_degrade_gracefully() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,type,platform,category,amount,owner) VALUES ('2024-03-15','expense','BCA','Bills','lots','u1')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transfers(date,source,target,amount,owner) VALUES ('2024-03-16','Wallet','Wallet','1000','u1')",
        [],
    )
    .unwrap();
    // Stale account label: only the BCA leg applies.
    conn.execute(
        "INSERT INTO transfers(date,source,target,amount,owner) VALUES ('2024-03-17','BCA','Mandiri','50000','u1')",
        [],
    )
    .unwrap();

    let view = compute(&march(), &store::load_snapshot(&conn).unwrap());
    assert_eq!(view.monthly_expense, dec!(150000));
    assert_eq!(view.cumulative_balance, dec!(4850000));
    assert_eq!(view.account_balances.get(Platform::Wallet), Decimal::ZERO);
    assert_eq!(view.account_balances.get(Platform::Bca), dec!(4800000));
    assert_eq!(view.issues.len(), 2);

    let issues = doctor::find_issues(&conn).unwrap();
    let codes: Vec<&str> = issues.iter().map(|i| i.code()).collect();
    assert_eq!(codes, vec!["malformed_amount", "self_transfer"]);
}

#[test]
fn every_notification_recomputes_from_the_latest_snapshot() {
    let conn = setup();
    let mut dash = Dashboard::new(march(), store::load_snapshot(&conn).unwrap());
    let before = dash.view().clone();

    add_item(&conn, "Phone", dec!(5000000));
    let shopping = store::load_snapshot(&conn).unwrap().shopping;
    let after = dash.replace_shopping(shopping).clone();
    assert_eq!(after.monthly_income, before.monthly_income);
    assert!(after.shopping_projection.is_deficit());

    let again = dash.set_filter(march()).clone();
    assert_eq!(again, after);
}

#[test]
fn json_bundle_carries_every_view() {
    let conn = setup();
    let view = compute(&march(), &store::load_snapshot(&conn).unwrap());
    let v = serde_json::to_value(&view).unwrap();
    for key in [
        "monthly_income",
        "monthly_expense",
        "cumulative_balance",
        "account_balances",
        "category_daily",
        "category_weekly",
        "summary_daily",
        "summary_weekly",
        "shopping_projection",
    ] {
        assert!(v.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(v["account_balances"]["BCA"], serde_json::json!("4850000"));
    assert_eq!(v["category_weekly"][0]["bucket"], serde_json::json!("Week 2"));
    assert_eq!(v["shopping_projection"]["status"], serde_json::json!("covered"));
}

#[test]
fn oversized_amounts_are_flagged_instead_of_crashing() {
    let conn = setup();
    let err = store::create_transaction(
        &conn,
        "u1",
        &TransactionFields {
            date: d("2024-03-06"),
            kind: TxKind::Income,
            platform: Platform::Bca,
            category: "Salary".into(),
            amount: Decimal::MAX,
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("maximum"));

    for day in ["2024-03-06", "2024-03-07"] {
        conn.execute(
            "INSERT INTO transactions(date,type,platform,category,amount,owner) \
             VALUES (?1,'income','BCA','Salary','79228162514264337593543950335','u1')",
            [day],
        )
        .unwrap();
    }

    let view = compute(&march(), &store::load_snapshot(&conn).unwrap());
    assert_eq!(view.monthly_income, dec!(5000000));
    assert_eq!(view.cumulative_balance, dec!(4850000));
    assert_eq!(view.current_wallet_balance, dec!(4850000));
    let codes: Vec<&str> = view.issues.iter().map(|i| i.code()).collect();
    assert_eq!(codes, vec!["malformed_amount", "malformed_amount"]);
}

#[test]
fn stale_platform_label_keeps_monthly_and_cumulative_figures() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,type,platform,category,amount,owner) \
         VALUES ('2024-03-20','income','Mandiri','Bonus','1000000','u1')",
        [],
    )
    .unwrap();

    let view = compute(&march(), &store::load_snapshot(&conn).unwrap());
    assert_eq!(view.monthly_income, dec!(6000000));
    assert_eq!(view.cumulative_balance, dec!(5850000));
    assert_eq!(view.account_balances.get(Platform::Bca), dec!(4850000));
    assert_eq!(view.current_wallet_balance, dec!(4850000));
    assert_eq!(view.transactions[0].platform, "Mandiri");

    let codes: Vec<&str> = view.issues.iter().map(|i| i.code()).collect();
    assert_eq!(codes, vec!["unknown_platform"]);
}

#[test]
fn empty_month_tables_show_the_placeholder() {
    let conn = setup();
    let view = compute(
        &MonthFilter::new(2024, 5).unwrap(),
        &store::load_snapshot(&conn).unwrap(),
    );
    for table in [
        dashboard::category_table(&view.category_daily),
        dashboard::category_table(&view.category_weekly),
        dashboard::summary_table("Date", &view.summary_daily),
        dashboard::summary_table("Week", &view.summary_weekly),
        dashboard::totals_table(&view.expense_by_category),
    ] {
        assert!(table.to_string().contains("No Data"));
    }

    let busy = compute(&march(), &store::load_snapshot(&conn).unwrap());
    let daily = dashboard::category_table(&busy.category_daily).to_string();
    assert!(!daily.contains("No Data"));
    assert!(daily.contains("Food & Drink (-) - 2024-03-10"));
    assert!(daily.contains("Rp 150.000"));
}
