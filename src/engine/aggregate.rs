// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category and summary breakdowns over an already filtered set of entries.
//!
//! Grouping goes through a `BTreeMap` keyed by the composite key, so output
//! order is key order and only keys present in the input appear.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

use super::issues::{DataIssue, accumulate};
use super::ledger::Entry;
use crate::models::TxKind;
use crate::period::WeekBucket;

pub const EMPTY_PLACEHOLDER: &str = "No Data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLine<B> {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub bucket: B,
    pub total: Decimal,
}

impl<B: Display> CategoryLine<B> {
    /// `Food & Drink (-) - 2024-03-10`
    pub fn label(&self) -> String {
        format!("{} {} - {}", self.category, self.kind.marker(), self.bucket)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryView<B> {
    pub lines: Vec<CategoryLine<B>>,
}

impl<B> CategoryView<B> {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Income and expense per bucket. There is deliberately no net column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow<B> {
    pub bucket: B,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SummaryView<B> {
    pub rows: Vec<SummaryRow<B>>,
}

impl<B> SummaryView<B> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn by_category<B, F>(
    entries: &[&Entry],
    figure: &'static str,
    issues: &mut Vec<DataIssue>,
    bucket: F,
) -> CategoryView<B>
where
    B: Ord + Clone,
    F: Fn(&Entry) -> B,
{
    let mut grouped: BTreeMap<(String, TxKind, B), Decimal> = BTreeMap::new();
    for e in entries {
        let total = grouped
            .entry((e.category.clone(), e.kind, bucket(e)))
            .or_insert(Decimal::ZERO);
        accumulate(total, e.amount, figure, Some(e.id), issues);
    }
    CategoryView {
        lines: grouped
            .into_iter()
            .map(|((category, kind, bucket), total)| CategoryLine {
                category,
                kind,
                bucket,
                total,
            })
            .collect(),
    }
}

fn summary<B, F>(
    entries: &[&Entry],
    figure: &'static str,
    issues: &mut Vec<DataIssue>,
    bucket: F,
) -> SummaryView<B>
where
    B: Ord + Clone,
    F: Fn(&Entry) -> B,
{
    let mut grouped: BTreeMap<B, (Decimal, Decimal)> = BTreeMap::new();
    for e in entries {
        let row = grouped
            .entry(bucket(e))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        let total = match e.kind {
            TxKind::Income => &mut row.0,
            TxKind::Expense => &mut row.1,
        };
        accumulate(total, e.amount, figure, Some(e.id), issues);
    }
    SummaryView {
        rows: grouped
            .into_iter()
            .map(|(bucket, (income, expense))| SummaryRow {
                bucket,
                income,
                expense,
            })
            .collect(),
    }
}

pub fn category_daily(
    entries: &[&Entry],
    issues: &mut Vec<DataIssue>,
) -> CategoryView<NaiveDate> {
    by_category(entries, "category_daily", issues, |e| e.date)
}

pub fn category_weekly(
    entries: &[&Entry],
    issues: &mut Vec<DataIssue>,
) -> CategoryView<WeekBucket> {
    by_category(entries, "category_weekly", issues, |e| WeekBucket::of(e.date))
}

pub fn summary_daily(entries: &[&Entry], issues: &mut Vec<DataIssue>) -> SummaryView<NaiveDate> {
    summary(entries, "summary_daily", issues, |e| e.date)
}

pub fn summary_weekly(
    entries: &[&Entry],
    issues: &mut Vec<DataIssue>,
) -> SummaryView<WeekBucket> {
    summary(entries, "summary_weekly", issues, |e| WeekBucket::of(e.date))
}

/// Category totals for one kind only, in category order. Feeds the income
/// and spending charts.
pub fn category_totals(
    entries: &[&Entry],
    kind: TxKind,
    issues: &mut Vec<DataIssue>,
) -> BTreeMap<String, Decimal> {
    let figure = match kind {
        TxKind::Income => "income_by_category",
        TxKind::Expense => "expense_by_category",
    };
    let mut totals = BTreeMap::new();
    for e in entries.iter().filter(|e| e.kind == kind) {
        let total = totals.entry(e.category.clone()).or_insert(Decimal::ZERO);
        accumulate(total, e.amount, figure, Some(e.id), issues);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use rust_decimal_macros::dec;

    fn entry(date: &str, kind: TxKind, category: &str, amount: Decimal) -> Entry {
        Entry {
            id: 0,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            platform: "Wallet".into(),
            account: Some(Platform::Wallet),
            category: category.into(),
            amount,
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("2024-03-10", TxKind::Expense, "Food & Drink", dec!(50000)),
            entry("2024-03-05", TxKind::Income, "Salary", dec!(5000000)),
            entry("2024-03-10", TxKind::Expense, "Food & Drink", dec!(100000)),
            entry("2024-03-12", TxKind::Expense, "Food & Drink", dec!(20000)),
            entry("2024-03-30", TxKind::Income, "Refund", dec!(15000)),
            entry("2024-03-30", TxKind::Expense, "Refund", dec!(5000)),
        ]
    }

    #[test]
    fn daily_category_lines_are_summed_and_sorted() {
        let data = sample();
        let refs: Vec<&Entry> = data.iter().collect();
        let view = category_daily(&refs, &mut Vec::new());
        let labels: Vec<String> = view.lines.iter().map(|l| l.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Food & Drink (-) - 2024-03-10",
                "Food & Drink (-) - 2024-03-12",
                "Refund (+) - 2024-03-30",
                "Refund (-) - 2024-03-30",
                "Salary (+) - 2024-03-05",
            ]
        );
        assert_eq!(view.lines[0].total, dec!(150000));
    }

    #[test]
    fn weekly_category_lines_use_week_buckets() {
        let data = sample();
        let refs: Vec<&Entry> = data.iter().collect();
        let view = category_weekly(&refs, &mut Vec::new());
        assert_eq!(view.lines[0].label(), "Food & Drink (-) - Week 2");
        assert_eq!(view.lines[0].total, dec!(170000));
        assert_eq!(view.lines.len(), 4);
        assert_eq!(view.lines[1].label(), "Refund (+) - Week 5");
    }

    #[test]
    fn summaries_split_income_and_expense() {
        let data = sample();
        let refs: Vec<&Entry> = data.iter().collect();
        let daily = summary_daily(&refs, &mut Vec::new());
        assert_eq!(daily.rows.len(), 4);
        assert_eq!(daily.rows[0].income, dec!(5000000));
        assert_eq!(daily.rows[3].income, dec!(15000));
        assert_eq!(daily.rows[3].expense, dec!(5000));

        let weekly = summary_weekly(&refs, &mut Vec::new());
        let buckets: Vec<u32> = weekly.rows.iter().map(|r| r.bucket.number()).collect();
        assert_eq!(buckets, vec![1, 2, 5]);
        assert_eq!(weekly.rows[1].expense, dec!(170000));
        assert_eq!(weekly.rows[1].income, Decimal::ZERO);
    }

    #[test]
    fn empty_input_yields_empty_views() {
        assert!(category_daily(&[], &mut Vec::new()).is_empty());
        assert!(category_weekly(&[], &mut Vec::new()).is_empty());
        assert!(summary_daily(&[], &mut Vec::new()).is_empty());
        assert!(summary_weekly(&[], &mut Vec::new()).is_empty());
        assert!(category_totals(&[], TxKind::Expense, &mut Vec::new()).is_empty());
    }

    #[test]
    fn category_totals_only_count_one_kind() {
        let data = sample();
        let refs: Vec<&Entry> = data.iter().collect();
        let spending = category_totals(&refs, TxKind::Expense, &mut Vec::new());
        assert_eq!(spending.len(), 2);
        assert_eq!(spending["Food & Drink"], dec!(170000));
        assert_eq!(spending["Refund"], dec!(5000));
    }

    #[test]
    fn overflowing_bucket_is_flagged_and_left_out() {
        let mut data = vec![
            entry("2024-03-10", TxKind::Income, "Salary", Decimal::MAX),
            entry("2024-03-10", TxKind::Income, "Salary", Decimal::MAX),
            entry("2024-03-10", TxKind::Expense, "Bills", dec!(10)),
        ];
        data[1].id = 2;
        let refs: Vec<&Entry> = data.iter().collect();
        let mut issues = Vec::new();

        let daily = summary_daily(&refs, &mut issues);
        assert_eq!(daily.rows[0].income, Decimal::MAX);
        assert_eq!(daily.rows[0].expense, dec!(10));
        let lines = category_daily(&refs, &mut issues);
        assert_eq!(lines.lines.len(), 2);
        let income = category_totals(&refs, TxKind::Income, &mut issues);
        assert_eq!(income["Salary"], Decimal::MAX);

        let figures: Vec<&str> = issues
            .iter()
            .map(|i| match i {
                DataIssue::Overflow { figure, id: Some(2) } => *figure,
                other => panic!("unexpected issue {:?}", other),
            })
            .collect();
        assert_eq!(
            figures,
            vec!["summary_daily", "category_daily", "income_by_category"]
        );
    }
}
