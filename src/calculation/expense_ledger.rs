//! Expense ledger operations on a shift entry.
//!
//! Expenses can be added to or removed from a pending entry. Once the entry
//! is verified its expense list is frozen.

use tracing::debug;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::money::sum;
use crate::models::{Expense, ExpenseInput, Money, ShiftEntry, check_expense_total};

/// Appends a new expense to a pending entry.
///
/// # Errors
///
/// - `AlreadyVerified` if the entry is verified
/// - `Validation` if `amount <= 0`, the description is blank, or the new
///   expense total would exceed [`Money::MAX`]
///
/// The entry is unchanged on error.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_ledger::calculation::add_expense;
/// use shift_ledger::models::{CashCounts, EntrySubmission, Money, ShiftEntry};
///
/// let mut entry = ShiftEntry::create(EntrySubmission::new(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "store-1",
///     "staff-1",
///     "shift-1",
///     CashCounts::new(Money::new(10_000), Money::ZERO, Money::new(10_000)),
/// ))
/// .unwrap();
///
/// add_expense(&mut entry, Money::new(500), "water", None).unwrap();
/// assert_eq!(entry.final_balance(), Money::new(9_500));
/// ```
pub fn add_expense(
    entry: &mut ShiftEntry,
    amount: Money,
    description: impl Into<String>,
    evidence_ref: Option<String>,
) -> LedgerResult<Expense> {
    entry.ensure_mutable()?;

    let expense = Expense::new(ExpenseInput {
        amount,
        description: description.into(),
        evidence_ref,
    })?;
    check_expense_total(entry.expenses(), expense.amount())?;

    debug!(
        entry_id = %entry.id(),
        expense_id = %expense.id(),
        amount = %expense.amount(),
        "Expense added"
    );
    entry.expenses_mut().push(expense.clone());

    Ok(expense)
}

/// Removes an expense from a pending entry and returns it.
///
/// # Errors
///
/// - `AlreadyVerified` if the entry is verified
/// - `ExpenseNotFound` if the entry holds no expense with that id
pub fn remove_expense(entry: &mut ShiftEntry, expense_id: Uuid) -> LedgerResult<Expense> {
    entry.ensure_mutable()?;

    let entry_id = entry.id();
    let position = entry
        .expenses()
        .iter()
        .position(|e| e.id() == expense_id)
        .ok_or(LedgerError::ExpenseNotFound {
            entry_id,
            expense_id,
        })?;

    let removed = entry.expenses_mut().remove(position);
    debug!(entry_id = %entry_id, expense_id = %expense_id, "Expense removed");

    Ok(removed)
}

/// Sums the entry's current expenses.
pub fn total_expenses(entry: &ShiftEntry) -> Money {
    sum(entry.expenses().iter().map(Expense::amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CashCounts, EntrySubmission};
    use chrono::NaiveDate;

    fn pending_entry() -> ShiftEntry {
        ShiftEntry::create(EntrySubmission::new(
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            "store-1",
            "staff-1",
            "shift-1",
            CashCounts::new(
                Money::new(1_000_000),
                Money::new(700_000),
                Money::new(295_000),
            ),
        ))
        .unwrap()
    }

    #[test]
    fn test_add_expense_shifts_totals_by_amount() {
        let mut entry = pending_entry();
        let balance_before = entry.final_balance();
        let total_before = total_expenses(&entry);

        add_expense(&mut entry, Money::new(500), "drinking water", None).unwrap();

        assert_eq!(total_expenses(&entry), total_before + Money::new(500));
        assert_eq!(entry.total_expenses(), Money::new(500));
        assert_eq!(entry.final_balance(), balance_before - Money::new(500));
    }

    #[test]
    fn test_add_expense_preserves_insertion_order() {
        let mut entry = pending_entry();
        add_expense(&mut entry, Money::new(120_000), "electricity", None).unwrap();
        add_expense(&mut entry, Money::new(35_000), "ice", Some("photo-1".to_string())).unwrap();

        let descriptions: Vec<&str> = entry.expenses().iter().map(|e| e.description()).collect();
        assert_eq!(descriptions, vec!["electricity", "ice"]);
        assert_eq!(entry.expenses()[1].evidence_ref(), Some("photo-1"));
    }

    #[test]
    fn test_zero_amount_leaves_totals_unchanged() {
        let mut entry = pending_entry();
        add_expense(&mut entry, Money::new(1_000), "bags", None).unwrap();

        let result = add_expense(&mut entry, Money::ZERO, "x", None);

        assert!(matches!(result, Err(LedgerError::Validation { .. })));
        assert_eq!(entry.total_expenses(), Money::new(1_000));
        assert_eq!(entry.expenses().len(), 1);
    }

    #[test]
    fn test_expense_pushing_total_past_ceiling_is_rejected() {
        let mut entry = pending_entry();
        add_expense(&mut entry, Money::MAX, "safe deposit", None).unwrap();

        let result = add_expense(&mut entry, Money::new(1), "ice", None);

        assert!(matches!(result, Err(LedgerError::Validation { ref field, .. }) if field == "expenses"));
        assert_eq!(entry.expenses().len(), 1);
        assert_eq!(entry.total_expenses(), Money::MAX);
    }

    #[test]
    fn test_empty_description_is_rejected() {
        let mut entry = pending_entry();
        let result = add_expense(&mut entry, Money::new(1_000), "", None);
        assert!(matches!(result, Err(LedgerError::Validation { .. })));
    }

    #[test]
    fn test_remove_expense_restores_balance() {
        let mut entry = pending_entry();
        let expense = add_expense(&mut entry, Money::new(120_000), "electricity", None).unwrap();

        let removed = remove_expense(&mut entry, expense.id()).unwrap();

        assert_eq!(removed, expense);
        assert!(entry.expenses().is_empty());
        assert_eq!(entry.final_balance(), Money::new(295_000));
    }

    #[test]
    fn test_remove_unknown_expense_fails() {
        let mut entry = pending_entry();
        let unknown = Uuid::new_v4();

        match remove_expense(&mut entry, unknown).unwrap_err() {
            LedgerError::ExpenseNotFound {
                entry_id,
                expense_id,
            } => {
                assert_eq!(entry_id, entry.id());
                assert_eq!(expense_id, unknown);
            }
            other => panic!("Expected ExpenseNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_verified_entry_rejects_ledger_changes() {
        let mut entry = pending_entry();
        let expense = add_expense(&mut entry, Money::new(10_000), "ice", None).unwrap();
        entry.mark_verified();

        assert!(matches!(
            add_expense(&mut entry, Money::new(500), "water", None),
            Err(LedgerError::AlreadyVerified { .. })
        ));
        assert!(matches!(
            remove_expense(&mut entry, expense.id()),
            Err(LedgerError::AlreadyVerified { .. })
        ));
        assert_eq!(entry.total_expenses(), Money::new(10_000));
    }
}
