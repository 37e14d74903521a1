//! Aggregated reporting figures.

use serde::{Deserialize, Serialize};

use super::Money;

/// Totals over a set of shift entries.
///
/// # Example
///
/// ```
/// use shift_ledger::models::{Money, Summary};
///
/// let summary = Summary::default();
/// assert_eq!(summary.entry_count, 0);
/// assert_eq!(summary.final_balance, Money::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of entries included.
    pub entry_count: usize,
    /// Sum of till revenue.
    pub total_revenue: Money,
    /// Sum of amounts transferred out.
    pub total_transfers: Money,
    /// Sum of counted drawer cash.
    pub total_actual_cash: Money,
    /// Sum of drawer differences.
    pub total_difference: Money,
    /// Sum of expenses.
    pub total_expenses: Money,
    /// Sum of final balances.
    pub final_balance: Money,
}

/// Revenue and balance for one store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTotals {
    /// Sum of till revenue.
    pub revenue: Money,
    /// Sum of final balances.
    pub final_balance: Money,
}

/// A store's totals with its display name, for ranked listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStanding {
    /// The store id.
    pub store_id: String,
    /// The store name, when the store is in the reference list.
    pub name: Option<String>,
    /// Sum of till revenue.
    pub revenue: Money,
    /// Sum of final balances.
    pub final_balance: Money,
}
