//! Core data models for the shift ledger.
//!
//! This module contains the money type, shift entries with their expenses,
//! actors and reference records, and reporting totals.

mod actor;
mod entry;
mod expense;
pub mod money;
mod record;
mod summary;

pub use actor::{Actor, Role, ShiftType, Store, User};
pub use entry::{CashCounts, EntryStatus, EntrySubmission, ShiftEntry};
pub(crate) use entry::check_expense_total;
pub use expense::{Expense, ExpenseInput};
pub use money::Money;
pub use record::EntryRecord;
pub use summary::{StoreStanding, StoreTotals, Summary};
