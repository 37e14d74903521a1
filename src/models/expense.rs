//! Itemized expenses paid out of a shift's cash drawer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Money;
use crate::error::{LedgerError, LedgerResult};

/// Raw expense data as entered by staff, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// The amount paid out.
    pub amount: Money,
    /// What the money was spent on.
    pub description: String,
    /// Opaque reference to supporting evidence, such as an uploaded photo.
    #[serde(default)]
    pub evidence_ref: Option<String>,
}

impl ExpenseInput {
    /// Creates expense input without an evidence reference.
    pub fn new(amount: Money, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            evidence_ref: None,
        }
    }

    /// Attaches an evidence reference.
    pub fn with_evidence(mut self, evidence_ref: impl Into<String>) -> Self {
        self.evidence_ref = Some(evidence_ref.into());
        self
    }
}

/// A single expense owned by exactly one shift entry.
///
/// Expenses are immutable once created. They are added and removed only
/// through the expense ledger, and disappear with their parent entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    id: Uuid,
    amount: Money,
    description: String,
    #[serde(default, alias = "image_url", skip_serializing_if = "Option::is_none")]
    evidence_ref: Option<String>,
}

impl Expense {
    /// Validates raw input and creates an expense with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the amount is zero, negative or above
    /// [`Money::MAX`], or when the description is blank.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_ledger::models::{Expense, ExpenseInput, Money};
    ///
    /// let expense = Expense::new(ExpenseInput::new(Money::new(120_000), "electricity")).unwrap();
    /// assert_eq!(expense.amount(), Money::new(120_000));
    ///
    /// assert!(Expense::new(ExpenseInput::new(Money::ZERO, "x")).is_err());
    /// ```
    pub fn new(input: ExpenseInput) -> LedgerResult<Self> {
        if !input.amount.is_positive() {
            return Err(LedgerError::validation(
                "amount",
                format!("expense amount must be greater than zero, got {}", input.amount),
            ));
        }
        if input.amount.exceeds_max() {
            return Err(LedgerError::validation(
                "amount",
                format!("expense amount must not exceed {}, got {}", Money::MAX, input.amount),
            ));
        }
        if input.description.trim().is_empty() {
            return Err(LedgerError::validation(
                "description",
                "expense description must not be empty",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            amount: input.amount,
            description: input.description,
            evidence_ref: input.evidence_ref.filter(|r| !r.is_empty()),
        })
    }

    /// Returns the expense id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the amount paid out.
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the evidence reference, if any.
    pub fn evidence_ref(&self) -> Option<&str> {
        self.evidence_ref.as_deref()
    }
}
