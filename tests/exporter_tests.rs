// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketbook::{cli, commands::exporter, db};
use rusqlite::Connection;
use serde_json::Value;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(date,type,platform,category,amount,owner) VALUES \
        ('2024-03-05','income','BCA','Salary','5000000','u1')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transfers(date,source,target,amount,owner) VALUES \
        ('2024-03-06','BCA','Wallet','200000','u1')",
        [],
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pocketbook", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("export", sub)) => exporter::handle(conn, sub),
        _ => panic!("export command not parsed"),
    }
}

#[test]
fn export_json_writes_full_snapshot() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("snapshot.json");
    let out_str = out.to_string_lossy().to_string();

    run_export(&conn, &["--format", "json", "--out", &out_str]).unwrap();

    let v: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["transactions"][0]["type"], "income");
    assert_eq!(v["transactions"][0]["amount"], "5000000");
    assert_eq!(v["transfers"][0]["target"], "Wallet");
    assert_eq!(v["shopping"].as_array().unwrap().len(), 0);
}

#[test]
fn export_csv_per_collection() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("transfers.csv");
    let out_str = out.to_string_lossy().to_string();

    run_export(
        &conn,
        &["--format", "CSV", "--out", &out_str, "--collection", "transfers"],
    )
    .unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,date,source,target,amount,owner"));
    assert_eq!(lines.next(), Some("1,2024-03-06,BCA,Wallet,200000,u1"));
}

#[test]
fn export_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("x.xml").to_string_lossy().to_string();
    let err = run_export(&conn, &["--format", "xml", "--out", &out]).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
}
