// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure derivations from the three record collections to everything the
//! dashboard shows. Nothing in here touches the store.

pub mod aggregate;
pub mod balance;
pub mod dashboard;
pub mod issues;
pub mod ledger;
pub mod shopping;

pub use dashboard::{Dashboard, DashboardView, compute};
pub use issues::DataIssue;
pub use ledger::Ledger;
