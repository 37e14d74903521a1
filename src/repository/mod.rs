//! The persistence collaborator.
//!
//! The ledger never talks to a database directly. Everything it reads or
//! writes goes through an [`EntryRepository`], and whatever that repository
//! reports as a failure is handed back to the caller untouched.

mod memory;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{EntryStatus, Expense, ShiftEntry};

pub use memory::InMemoryRepository;

/// A failure reported by the entry store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An entry with this id is already stored.
    #[error("Entry {entry_id} already exists in the store")]
    Duplicate {
        /// The conflicting id.
        entry_id: Uuid,
    },

    /// The targeted entry row does not exist.
    #[error("No stored row for entry {entry_id}")]
    MissingRow {
        /// The id that was targeted.
        entry_id: Uuid,
    },

    /// The store could not be reached or is in a broken state.
    #[error("Entry store unavailable: {message}")]
    Unavailable {
        /// Transport or storage detail.
        message: String,
    },
}

/// Storage for shift entries and their expenses.
///
/// Entries and expenses are written separately, the way a relational store
/// keeps them in two tables. Deleting an entry removes its expenses too.
///
/// Implementations must be safe to share between request handlers.
pub trait EntryRepository: Send + Sync {
    /// Returns every stored entry, newest created first.
    fn list_entries(&self) -> Result<Vec<ShiftEntry>, StoreError>;

    /// Stores the entry row. Expenses are written by [`insert_expenses`].
    ///
    /// [`insert_expenses`]: EntryRepository::insert_expenses
    fn insert_entry(&self, entry: &ShiftEntry) -> Result<(), StoreError>;

    /// Stores expenses for an existing entry.
    fn insert_expenses(&self, entry_id: Uuid, expenses: &[Expense]) -> Result<(), StoreError>;

    /// Overwrites an entry's status.
    fn update_entry_status(&self, entry_id: Uuid, status: EntryStatus) -> Result<(), StoreError>;

    /// Deletes an entry and every expense it owns.
    fn delete_entry(&self, entry_id: Uuid) -> Result<(), StoreError>;
}
