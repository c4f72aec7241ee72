// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::issues::{DataIssue, accumulate};
use super::ledger::Purchase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionStatus {
    /// Projected balance is zero or above.
    Covered,
    /// Planned purchases exceed the liquid balance.
    Deficit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShoppingProjection {
    pub total_estimate_all: Decimal,
    pub total_realized: Decimal,
    pub outstanding_estimate: Decimal,
    pub liquid_balance: Decimal,
    pub projected_balance: Decimal,
    pub status: ProjectionStatus,
}

impl ShoppingProjection {
    pub fn is_deficit(&self) -> bool {
        self.status == ProjectionStatus::Deficit
    }
}

/// Projects the liquid balance after every unpurchased item is bought at
/// its estimated price.
pub fn project(
    purchases: &[Purchase],
    liquid_balance: Decimal,
    issues: &mut Vec<DataIssue>,
) -> ShoppingProjection {
    let mut total_estimate_all = Decimal::ZERO;
    let mut total_realized = Decimal::ZERO;
    let mut outstanding_estimate = Decimal::ZERO;

    for p in purchases {
        let id = Some(p.id);
        if let Some(estimate) = p.estimate {
            accumulate(&mut total_estimate_all, estimate, "total_estimate_all", id, issues);
            if !p.purchased {
                accumulate(&mut outstanding_estimate, estimate, "outstanding_estimate", id, issues);
            }
        }
        if p.purchased {
            if let Some(actual) = p.actual {
                accumulate(&mut total_realized, actual, "total_realized", id, issues);
            }
        }
    }

    let mut projected_balance = liquid_balance;
    accumulate(&mut projected_balance, -outstanding_estimate, "projected_balance", None, issues);
    let status = if projected_balance.is_sign_negative() && !projected_balance.is_zero() {
        ProjectionStatus::Deficit
    } else {
        ProjectionStatus::Covered
    };

    ShoppingProjection {
        total_estimate_all,
        total_realized,
        outstanding_estimate,
        liquid_balance,
        projected_balance,
        status,
    }
}
