//! An in-process entry store.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use uuid::Uuid;

use super::{EntryRepository, StoreError};
use crate::models::{EntryRecord, EntryStatus, Expense, ShiftEntry};

/// Keeps entry rows and expense rows in two tables guarded by locks.
///
/// Locks are always taken in the order entries, then expenses.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_ledger::models::{CashCounts, EntrySubmission, Money, ShiftEntry};
/// use shift_ledger::repository::{EntryRepository, InMemoryRepository};
///
/// let repository = InMemoryRepository::new();
/// let entry = ShiftEntry::create(EntrySubmission::new(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "store-1",
///     "staff-1",
///     "shift-1",
///     CashCounts::new(Money::new(10_000), Money::ZERO, Money::new(10_000)),
/// ))
/// .unwrap();
///
/// repository.insert_entry(&entry).unwrap();
/// assert_eq!(repository.list_entries().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    entries: RwLock<BTreeMap<Uuid, EntryRecord>>,
    expenses: RwLock<HashMap<Uuid, Vec<Expense>>>,
}

impl InMemoryRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with persisted records.
    ///
    /// Each record's expenses are moved into the expense table. Cached
    /// derived columns are kept as they are, so stale values surface when
    /// the entries are listed.
    pub fn with_records(records: impl IntoIterator<Item = EntryRecord>) -> Self {
        let mut entries = BTreeMap::new();
        let mut expenses = HashMap::new();

        for mut record in records {
            let owned = std::mem::take(&mut record.expenses);
            if !owned.is_empty() {
                expenses.insert(record.id, owned);
            }
            entries.insert(record.id, record);
        }

        Self {
            entries: RwLock::new(entries),
            expenses: RwLock::new(expenses),
        }
    }
}

fn poisoned(table: &str) -> StoreError {
    StoreError::Unavailable {
        message: format!("{} table lock poisoned", table),
    }
}

impl EntryRepository for InMemoryRepository {
    fn list_entries(&self) -> Result<Vec<ShiftEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned("entries"))?;
        let expenses = self.expenses.read().map_err(|_| poisoned("expenses"))?;

        let mut listed: Vec<ShiftEntry> = entries
            .values()
            .map(|record| {
                let mut record = record.clone();
                record.expenses = expenses.get(&record.id).cloned().unwrap_or_default();
                ShiftEntry::from(record)
            })
            .collect();

        listed.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(listed)
    }

    fn insert_entry(&self, entry: &ShiftEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned("entries"))?;

        if entries.contains_key(&entry.id()) {
            return Err(StoreError::Duplicate {
                entry_id: entry.id(),
            });
        }

        let mut record = EntryRecord::from(entry.clone());
        record.expenses.clear();
        entries.insert(entry.id(), record);
        Ok(())
    }

    fn insert_expenses(&self, entry_id: Uuid, expenses: &[Expense]) -> Result<(), StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned("entries"))?;
        if !entries.contains_key(&entry_id) {
            return Err(StoreError::MissingRow { entry_id });
        }

        let mut table = self.expenses.write().map_err(|_| poisoned("expenses"))?;
        table
            .entry(entry_id)
            .or_default()
            .extend(expenses.iter().cloned());
        Ok(())
    }

    fn update_entry_status(&self, entry_id: Uuid, status: EntryStatus) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned("entries"))?;
        let record = entries
            .get_mut(&entry_id)
            .ok_or(StoreError::MissingRow { entry_id })?;
        record.status = status;
        Ok(())
    }

    fn delete_entry(&self, entry_id: Uuid) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned("entries"))?;
        let mut expenses = self.expenses.write().map_err(|_| poisoned("expenses"))?;

        entries
            .remove(&entry_id)
            .ok_or(StoreError::MissingRow { entry_id })?;
        expenses.remove(&entry_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CashCounts, EntrySubmission, ExpenseInput, Money};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn make_entry(hour: i64) -> ShiftEntry {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap() + Duration::hours(hour);
        ShiftEntry::create_at(
            EntrySubmission::new(
                NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                "store-1",
                "staff-1",
                "shift-1",
                CashCounts::new(Money::new(500_000), Money::ZERO, Money::new(500_000)),
            )
            .with_expense(ExpenseInput::new(Money::new(20_000), "ice")),
            created_at,
        )
        .unwrap()
    }

    fn store(repository: &InMemoryRepository, entry: &ShiftEntry) {
        repository.insert_entry(entry).unwrap();
        repository
            .insert_expenses(entry.id(), entry.expenses())
            .unwrap();
    }

    #[test]
    fn test_round_trip_through_both_tables() {
        let repository = InMemoryRepository::new();
        let entry = make_entry(0);
        store(&repository, &entry);

        let listed = repository.list_entries().unwrap();
        assert_eq!(listed, vec![entry]);
        assert_eq!(listed[0].final_balance(), Money::new(480_000));
    }

    #[test]
    fn test_entry_row_alone_has_no_expenses() {
        let repository = InMemoryRepository::new();
        let entry = make_entry(0);
        repository.insert_entry(&entry).unwrap();

        let listed = repository.list_entries().unwrap();
        assert!(listed[0].expenses().is_empty());
        assert_eq!(listed[0].final_balance(), Money::new(500_000));
    }

    #[test]
    fn test_listing_is_newest_first() {
        let repository = InMemoryRepository::new();
        let older = make_entry(0);
        let newer = make_entry(3);
        store(&repository, &older);
        store(&repository, &newer);

        let ids: Vec<Uuid> = repository
            .list_entries()
            .unwrap()
            .iter()
            .map(ShiftEntry::id)
            .collect();
        assert_eq!(ids, vec![newer.id(), older.id()]);
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let repository = InMemoryRepository::new();
        let entry = make_entry(0);
        repository.insert_entry(&entry).unwrap();

        assert_eq!(
            repository.insert_entry(&entry),
            Err(StoreError::Duplicate {
                entry_id: entry.id()
            })
        );
    }

    #[test]
    fn test_expenses_need_parent_row() {
        let repository = InMemoryRepository::new();
        let entry = make_entry(0);

        assert_eq!(
            repository.insert_expenses(entry.id(), entry.expenses()),
            Err(StoreError::MissingRow {
                entry_id: entry.id()
            })
        );
    }

    #[test]
    fn test_delete_cascades_to_expenses() {
        let repository = InMemoryRepository::new();
        let entry = make_entry(0);
        store(&repository, &entry);

        repository.delete_entry(entry.id()).unwrap();

        assert!(repository.list_entries().unwrap().is_empty());
        assert!(repository.expenses.read().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_entry_fails() {
        let repository = InMemoryRepository::new();
        let id = Uuid::new_v4();
        assert_eq!(
            repository.delete_entry(id),
            Err(StoreError::MissingRow { entry_id: id })
        );
    }

    #[test]
    fn test_update_status() {
        let repository = InMemoryRepository::new();
        let entry = make_entry(0);
        store(&repository, &entry);

        repository
            .update_entry_status(entry.id(), EntryStatus::Verified)
            .unwrap();

        assert!(repository.list_entries().unwrap()[0].is_verified());
    }

    #[test]
    fn test_seeded_records_recompute_stale_columns() {
        let mut record = EntryRecord::from(make_entry(0));
        record.final_balance = Some(Money::new(1));
        record.status = EntryStatus::Verified;

        let repository = InMemoryRepository::with_records(vec![record]);
        let listed = repository.list_entries().unwrap();

        assert_eq!(listed[0].final_balance(), Money::new(480_000));
        assert_eq!(listed[0].expenses().len(), 1);
        assert!(listed[0].is_verified());
    }

    #[test]
    fn test_poisoned_lock_reports_unavailable() {
        let repository = std::sync::Arc::new(InMemoryRepository::new());
        let clone = repository.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.entries.write().unwrap();
            panic!("poison the entries table");
        })
        .join();

        match repository.list_entries() {
            Err(StoreError::Unavailable { message }) => assert!(message.contains("entries")),
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }
}
