// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, DataIssue};
use crate::period::MonthFilter;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Every record the engine would exclude from its totals, as of the
/// current month.
pub fn find_issues(conn: &Connection) -> Result<Vec<DataIssue>> {
    let snapshot = store::load_snapshot(conn)?;
    Ok(engine::compute(&MonthFilter::current()?, &snapshot).issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = find_issues(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
        return Ok(());
    }
    let rows = issues
        .iter()
        .map(|i| vec![i.code().to_string(), i.to_string()])
        .collect();
    println!("{}", pretty_table(&["Issue", "Detail"], rows));
    Ok(())
}
