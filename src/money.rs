// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is negative")]
    Negative(String),
    #[error("'{0}' exceeds the largest accepted amount")]
    TooLarge(String),
}

/// Largest single amount accepted anywhere: one quadrillion (10^15).
///
/// Keeps every sum the engine folds far from `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Amount text exactly as it sits in the store.
///
/// The store keeps amounts as TEXT, so nothing guarantees a stored value is
/// numeric. Parsing is deferred to the ledger pass where a bad value can be
/// excluded and reported instead of poisoning a sum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredAmount(String);

impl StoredAmount {
    pub fn new(raw: impl Into<String>) -> Self {
        StoredAmount(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Result<Decimal, AmountError> {
        let s = self.0.trim();
        let v = s
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|_| AmountError::NotANumber(self.0.clone()))?;
        if v.is_sign_negative() && !v.is_zero() {
            return Err(AmountError::Negative(self.0.clone()));
        }
        if v > MAX_AMOUNT {
            return Err(AmountError::TooLarge(self.0.clone()));
        }
        Ok(v)
    }

    /// Like [`parse`](Self::parse) but an empty value means zero. Used for
    /// fields that default to nothing until the user fills them in.
    pub fn parse_or_zero(&self) -> Result<Decimal, AmountError> {
        if self.0.trim().is_empty() {
            Ok(Decimal::ZERO)
        } else {
            self.parse()
        }
    }
}

impl From<Decimal> for StoredAmount {
    fn from(d: Decimal) -> Self {
        StoredAmount(d.normalize().to_string())
    }
}

impl fmt::Display for StoredAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Formats an amount as Indonesian Rupiah with no fraction digits,
/// e.g. `Rp 5.000.000` or `-Rp 50.000`.
pub fn fmt_rupiah(d: Decimal) -> String {
    let rounded = d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rupiah_groups_thousands() {
        assert_eq!(fmt_rupiah(dec!(5000000)), "Rp 5.000.000");
        assert_eq!(fmt_rupiah(dec!(150000)), "Rp 150.000");
        assert_eq!(fmt_rupiah(dec!(999)), "Rp 999");
        assert_eq!(fmt_rupiah(Decimal::ZERO), "Rp 0");
    }

    #[test]
    fn rupiah_rounds_and_signs() {
        assert_eq!(fmt_rupiah(dec!(-50000)), "-Rp 50.000");
        assert_eq!(fmt_rupiah(dec!(1234.5)), "Rp 1.235");
        assert_eq!(fmt_rupiah(dec!(-0.4)), "Rp 0");
    }

    #[test]
    fn stored_amount_rejects_garbage() {
        assert_eq!(StoredAmount::new("150000").parse().unwrap(), dec!(150000));
        assert_eq!(StoredAmount::new(" 12.5 ").parse().unwrap(), dec!(12.5));
        assert_eq!(StoredAmount::new("5e3").parse().unwrap(), dec!(5000));
        assert!(matches!(
            StoredAmount::new("abc").parse(),
            Err(AmountError::NotANumber(_))
        ));
        assert!(matches!(
            StoredAmount::new("-1").parse(),
            Err(AmountError::Negative(_))
        ));
        assert!(StoredAmount::new("").parse().is_err());
        assert!(matches!(
            StoredAmount::new("79228162514264337593543950335").parse(),
            Err(AmountError::TooLarge(_))
        ));
        assert_eq!(
            StoredAmount::new("1000000000000000").parse().unwrap(),
            MAX_AMOUNT
        );
        assert_eq!(StoredAmount::new("").parse_or_zero().unwrap(), Decimal::ZERO);
    }
}
