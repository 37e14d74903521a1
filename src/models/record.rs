//! The persisted shape of a shift entry.
//!
//! The entry store keeps derived figures as columns next to the raw inputs.
//! Those columns are only a cache: turning a record back into a
//! [`ShiftEntry`] recomputes every figure from the raw inputs and reports
//! any cached value that disagrees.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::{CashCounts, EntryStatus, Expense, Money, ShiftEntry};

/// A shift entry as stored and exchanged with collaborators.
///
/// Dimension ids are optional because the store clears them when the
/// referenced store, user or shift type is removed. A missing status reads
/// as pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The business date of the shift.
    pub date: NaiveDate,
    /// The store id, if still set.
    #[serde(default)]
    pub store_id: Option<String>,
    /// The staff member's user id, if still set.
    #[serde(default, alias = "user_id")]
    pub staff_user_id: Option<String>,
    /// The shift type id, if still set.
    #[serde(default)]
    pub shift_type_id: Option<String>,
    /// Till revenue.
    #[serde(default)]
    pub total_revenue: Money,
    /// Amount transferred out.
    #[serde(default)]
    pub transfer_amount: Money,
    /// Cached expected cash.
    #[serde(default)]
    pub expected_cash: Option<Money>,
    /// Counted drawer cash.
    #[serde(default)]
    pub actual_cash_in_drawer: Money,
    /// Cached difference.
    #[serde(default)]
    pub difference: Option<Money>,
    /// Expenses owned by the entry.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Cached expense total.
    #[serde(default)]
    pub total_expenses: Option<Money>,
    /// Cached final balance.
    #[serde(default)]
    pub final_balance: Option<Money>,
    /// Verification status.
    #[serde(default)]
    pub status: EntryStatus,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl From<ShiftEntry> for EntryRecord {
    fn from(entry: ShiftEntry) -> Self {
        let figures = entry.figures();
        Self {
            id: entry.id,
            date: entry.date,
            store_id: Some(entry.store_id),
            staff_user_id: Some(entry.staff_user_id),
            shift_type_id: Some(entry.shift_type_id),
            total_revenue: entry.counts.total_revenue,
            transfer_amount: entry.counts.transfer_amount,
            expected_cash: Some(figures.expected_cash),
            actual_cash_in_drawer: entry.counts.actual_cash_in_drawer,
            difference: Some(figures.difference),
            expenses: entry.expenses,
            total_expenses: Some(figures.total_expenses),
            final_balance: Some(figures.final_balance),
            status: entry.status,
            created_at: entry.created_at,
        }
    }
}

impl From<EntryRecord> for ShiftEntry {
    fn from(record: EntryRecord) -> Self {
        let entry = ShiftEntry {
            id: record.id,
            date: record.date,
            store_id: record.store_id.unwrap_or_default(),
            staff_user_id: record.staff_user_id.unwrap_or_default(),
            shift_type_id: record.shift_type_id.unwrap_or_default(),
            counts: CashCounts::new(
                record.total_revenue,
                record.transfer_amount,
                record.actual_cash_in_drawer,
            ),
            expenses: record.expenses,
            status: record.status,
            created_at: record.created_at,
        };

        let figures = entry.figures();
        let cached = [
            ("expected_cash", record.expected_cash, figures.expected_cash),
            ("difference", record.difference, figures.difference),
            ("total_expenses", record.total_expenses, figures.total_expenses),
            ("final_balance", record.final_balance, figures.final_balance),
        ];
        for (field, stored, computed) in cached {
            if let Some(stored) = stored.filter(|stored| *stored != computed) {
                warn!(
                    entry_id = %entry.id,
                    field,
                    stored = %stored,
                    computed = %computed,
                    "Stored figure disagrees with raw inputs; using recomputed value"
                );
            }
        }

        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntrySubmission, ExpenseInput};

    fn sample_entry() -> ShiftEntry {
        let submission = EntrySubmission::new(
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            "store-1",
            "staff-1",
            "shift-1",
            CashCounts::new(
                Money::new(1_000_000),
                Money::new(700_000),
                Money::new(295_000),
            ),
        )
        .with_expense(ExpenseInput::new(Money::new(120_000), "electricity"));
        ShiftEntry::create(submission).unwrap()
    }

    #[test]
    fn test_record_carries_computed_cache() {
        let record = EntryRecord::from(sample_entry());

        assert_eq!(record.expected_cash, Some(Money::new(300_000)));
        assert_eq!(record.difference, Some(Money::new(5_000)));
        assert_eq!(record.total_expenses, Some(Money::new(120_000)));
        assert_eq!(record.final_balance, Some(Money::new(175_000)));
    }

    #[test]
    fn test_stale_cache_is_ignored() {
        let mut record = EntryRecord::from(sample_entry());
        record.final_balance = Some(Money::new(999));
        record.difference = None;

        let entry = ShiftEntry::from(record);
        assert_eq!(entry.final_balance(), Money::new(175_000));
        assert_eq!(entry.difference(), Money::new(5_000));
    }

    #[test]
    fn test_entry_round_trips_through_json() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let restored: ShiftEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, restored);
    }

    #[test]
    fn test_deserializes_store_row_with_nulls_and_numeric_strings() {
        let json = r#"{
            "id": "8f6d4a36-6a53-4d3f-9a55-0d1c1f5e2b7a",
            "date": "2026-01-15",
            "store_id": null,
            "user_id": "staff-2",
            "shift_type_id": "shift-2",
            "total_revenue": "800000",
            "transfer_amount": "0",
            "expected_cash": "800000",
            "actual_cash_in_drawer": 790000,
            "difference": "10000",
            "total_expenses": "0",
            "final_balance": "790000",
            "created_at": "2026-01-15T17:30:00Z"
        }"#;

        let entry: ShiftEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.store_id(), "");
        assert_eq!(entry.staff_user_id(), "staff-2");
        assert_eq!(entry.status(), EntryStatus::Pending);
        assert_eq!(entry.difference(), Money::new(10_000));
        assert!(entry.expenses().is_empty());
    }
}
