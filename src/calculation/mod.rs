//! Calculation logic for the shift ledger.
//!
//! This module contains the derived-field arithmetic for a shift, the
//! expense ledger operations that keep an entry's expense list, and the
//! aggregation functions used for reporting by store, date range and
//! verification status.

mod aggregation;
mod derived;
mod expense_ledger;

pub use aggregation::{
    SummaryOptions, group_by_store, rank_stores, recent_entries, summarize,
};
pub use derived::{
    DerivedFigures, DrawerVariance, cash_difference, derive_figures, expected_cash, final_balance,
};
pub use expense_ledger::{add_expense, remove_expense, total_expenses};
