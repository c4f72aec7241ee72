// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod settings;
pub mod shopping;
pub mod transactions;
pub mod transfers;

use crate::period::MonthFilter;
use anyhow::{Context, Result};

/// `--month YYYY-MM`, or the current month when absent.
pub fn month_filter(sub: &clap::ArgMatches) -> Result<MonthFilter> {
    match sub.get_one::<String>("month") {
        Some(m) => MonthFilter::parse(m),
        None => MonthFilter::current(),
    }
}

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("Missing --{}", name))
}
