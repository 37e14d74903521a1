//! The shift entry aggregate.
//!
//! A [`ShiftEntry`] combines one shift's raw cash counts with the expenses
//! paid out of the drawer. Its derived figures are never stored on the
//! entry; they are recomputed from the raw inputs on every read.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntryRecord, Expense, ExpenseInput, Money};
use crate::calculation::{DerivedFigures, derive_figures};
use crate::error::{LedgerError, LedgerResult};

/// Verification status of a shift entry.
///
/// The only transition is `Pending` to `Verified`; it never reverts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// Submitted by staff, awaiting an administrator.
    #[default]
    Pending,
    /// Accepted by an administrator for reporting.
    Verified,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Pending => write!(f, "PENDING"),
            EntryStatus::Verified => write!(f, "VERIFIED"),
        }
    }
}

/// The raw counts staff record at the end of a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashCounts {
    /// Total revenue according to the till system.
    pub total_revenue: Money,
    /// Amount already transferred out, e.g. to a bank.
    pub transfer_amount: Money,
    /// Physical cash counted in the drawer.
    pub actual_cash_in_drawer: Money,
}

impl CashCounts {
    /// Creates a set of counts.
    pub fn new(total_revenue: Money, transfer_amount: Money, actual_cash_in_drawer: Money) -> Self {
        Self {
            total_revenue,
            transfer_amount,
            actual_cash_in_drawer,
        }
    }

    /// Rejects negative counts and counts above [`Money::MAX`].
    pub fn validate(&self) -> LedgerResult<()> {
        let fields = [
            ("total_revenue", self.total_revenue),
            ("transfer_amount", self.transfer_amount),
            ("actual_cash_in_drawer", self.actual_cash_in_drawer),
        ];

        for (field, amount) in fields {
            if amount.is_negative() {
                return Err(LedgerError::validation(
                    field,
                    format!("must not be negative, got {}", amount),
                ));
            }
            if amount.exceeds_max() {
                return Err(LedgerError::validation(
                    field,
                    format!("must not exceed {}, got {}", Money::MAX, amount),
                ));
            }
        }

        Ok(())
    }
}

/// Everything needed to create a shift entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySubmission {
    /// The business date of the shift.
    pub date: NaiveDate,
    /// The store the shift was worked at.
    pub store_id: String,
    /// The staff member the entry is attributed to.
    pub staff_user_id: String,
    /// The kind of shift.
    pub shift_type_id: String,
    /// Raw cash counts.
    pub counts: CashCounts,
    /// Expenses paid out of the drawer, in display order.
    #[serde(default)]
    pub expenses: Vec<ExpenseInput>,
}

impl EntrySubmission {
    /// Creates a submission without expenses.
    pub fn new(
        date: NaiveDate,
        store_id: impl Into<String>,
        staff_user_id: impl Into<String>,
        shift_type_id: impl Into<String>,
        counts: CashCounts,
    ) -> Self {
        Self {
            date,
            store_id: store_id.into(),
            staff_user_id: staff_user_id.into(),
            shift_type_id: shift_type_id.into(),
            counts,
            expenses: Vec::new(),
        }
    }

    /// Appends an expense.
    pub fn with_expense(mut self, expense: ExpenseInput) -> Self {
        self.expenses.push(expense);
        self
    }
}

/// One shift's reconciliation record.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_ledger::models::{
///     CashCounts, EntryStatus, EntrySubmission, ExpenseInput, Money, ShiftEntry,
/// };
///
/// let submission = EntrySubmission::new(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "store-1",
///     "staff-1",
///     "shift-1",
///     CashCounts::new(Money::new(1_000_000), Money::new(700_000), Money::new(295_000)),
/// )
/// .with_expense(ExpenseInput::new(Money::new(120_000), "electricity"));
///
/// let entry = ShiftEntry::create(submission).unwrap();
/// assert_eq!(entry.expected_cash(), Money::new(300_000));
/// assert_eq!(entry.difference(), Money::new(5_000));
/// assert_eq!(entry.total_expenses(), Money::new(120_000));
/// assert_eq!(entry.final_balance(), Money::new(175_000));
/// assert_eq!(entry.status(), EntryStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EntryRecord", from = "EntryRecord")]
pub struct ShiftEntry {
    pub(super) id: Uuid,
    pub(super) date: NaiveDate,
    pub(super) store_id: String,
    pub(super) staff_user_id: String,
    pub(super) shift_type_id: String,
    pub(super) counts: CashCounts,
    pub(super) expenses: Vec<Expense>,
    pub(super) status: EntryStatus,
    pub(super) created_at: DateTime<Utc>,
}

impl ShiftEntry {
    /// Validates a submission and creates a pending entry stamped now.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a dimension id is empty, a count is negative
    /// or above [`Money::MAX`], any expense is invalid, or the expenses add up
    /// to more than [`Money::MAX`]. No entry is produced in that case.
    pub fn create(submission: EntrySubmission) -> LedgerResult<Self> {
        Self::create_at(submission, Utc::now())
    }

    /// Validates a submission and creates a pending entry with the given
    /// creation time.
    pub fn create_at(submission: EntrySubmission, created_at: DateTime<Utc>) -> LedgerResult<Self> {
        require_reference("store_id", &submission.store_id)?;
        require_reference("shift_type_id", &submission.shift_type_id)?;
        require_reference("staff_user_id", &submission.staff_user_id)?;
        submission.counts.validate()?;

        let expenses = submission
            .expenses
            .into_iter()
            .map(Expense::new)
            .collect::<LedgerResult<Vec<_>>>()?;
        check_expense_total(&expenses, Money::ZERO)?;

        Ok(Self {
            id: Uuid::new_v4(),
            date: submission.date,
            store_id: submission.store_id,
            staff_user_id: submission.staff_user_id,
            shift_type_id: submission.shift_type_id,
            counts: submission.counts,
            expenses,
            status: EntryStatus::Pending,
            created_at,
        })
    }

    /// Returns the entry id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the business date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the store id.
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Returns the id of the staff member the entry belongs to.
    pub fn staff_user_id(&self) -> &str {
        &self.staff_user_id
    }

    /// Returns the shift type id.
    pub fn shift_type_id(&self) -> &str {
        &self.shift_type_id
    }

    /// Returns the raw cash counts.
    pub fn counts(&self) -> CashCounts {
        self.counts
    }

    /// Returns the till revenue.
    pub fn total_revenue(&self) -> Money {
        self.counts.total_revenue
    }

    /// Returns the amount transferred out.
    pub fn transfer_amount(&self) -> Money {
        self.counts.transfer_amount
    }

    /// Returns the counted drawer cash.
    pub fn actual_cash_in_drawer(&self) -> Money {
        self.counts.actual_cash_in_drawer
    }

    /// Returns the expenses in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Returns the verification status.
    pub fn status(&self) -> EntryStatus {
        self.status
    }

    /// Returns true once an administrator has verified the entry.
    pub fn is_verified(&self) -> bool {
        self.status == EntryStatus::Verified
    }

    /// Returns when the entry was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Computes all derived figures from the current raw inputs.
    pub fn figures(&self) -> DerivedFigures {
        derive_figures(&self.counts, &self.expenses)
    }

    /// Cash that should be on hand: revenue minus transfers.
    pub fn expected_cash(&self) -> Money {
        self.figures().expected_cash
    }

    /// Expected cash minus counted cash; positive means a shortfall.
    pub fn difference(&self) -> Money {
        self.figures().difference
    }

    /// Sum of all expense amounts.
    pub fn total_expenses(&self) -> Money {
        self.figures().total_expenses
    }

    /// Counted cash minus expenses; the net cash handed over.
    pub fn final_balance(&self) -> Money {
        self.figures().final_balance
    }

    /// Replaces the raw cash counts of a pending entry.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyVerified` once the entry is verified, or `Validation`
    /// for negative counts. The entry is unchanged on error.
    pub fn revise_counts(&mut self, counts: CashCounts) -> LedgerResult<()> {
        self.ensure_mutable()?;
        counts.validate()?;
        self.counts = counts;
        Ok(())
    }

    pub(crate) fn ensure_mutable(&self) -> LedgerResult<()> {
        if self.is_verified() {
            return Err(LedgerError::AlreadyVerified { entry_id: self.id });
        }
        Ok(())
    }

    pub(crate) fn expenses_mut(&mut self) -> &mut Vec<Expense> {
        &mut self.expenses
    }

    pub(crate) fn mark_verified(&mut self) {
        self.status = EntryStatus::Verified;
    }
}

/// Rejects an expense list whose total, plus `extra`, would exceed
/// [`Money::MAX`].
pub(crate) fn check_expense_total(expenses: &[Expense], extra: Money) -> LedgerResult<()> {
    let total = expenses
        .iter()
        .map(Expense::amount)
        .try_fold(extra, Money::checked_add)
        .filter(|total| !total.exceeds_max());

    match total {
        Some(_) => Ok(()),
        None => Err(LedgerError::validation(
            "expenses",
            format!("total expenses must not exceed {}", Money::MAX),
        )),
    }
}

fn require_reference(field: &str, value: &str) -> LedgerResult<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::validation(field, "must not be empty"));
    }
    Ok(())
}
