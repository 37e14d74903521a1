//! Derived-field arithmetic for a shift.
//!
//! Every derived figure is a pure function of the raw cash counts and the
//! expense list. Nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::models::money::{subtract, sum};
use crate::models::{CashCounts, Expense, Money};

/// The four figures derived from a shift's raw inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFigures {
    /// Revenue minus transfers.
    pub expected_cash: Money,
    /// Expected cash minus counted cash.
    pub difference: Money,
    /// Sum of expense amounts.
    pub total_expenses: Money,
    /// Counted cash minus expenses.
    pub final_balance: Money,
}

impl DerivedFigures {
    /// Reads the drawer difference as a shortfall, a surplus, or balanced.
    pub fn drawer_variance(&self) -> DrawerVariance {
        DrawerVariance::from_difference(self.difference)
    }
}

/// How counted cash compares with expected cash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum DrawerVariance {
    /// Counted cash matches expected cash.
    Balanced,
    /// Less cash than expected, by the given amount.
    Shortfall(Money),
    /// More cash than expected, by the given amount.
    Surplus(Money),
}

impl DrawerVariance {
    /// Classifies a difference; positive means a shortfall.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_ledger::calculation::DrawerVariance;
    /// use shift_ledger::models::Money;
    ///
    /// assert_eq!(
    ///     DrawerVariance::from_difference(Money::new(5_000)),
    ///     DrawerVariance::Shortfall(Money::new(5_000))
    /// );
    /// assert_eq!(
    ///     DrawerVariance::from_difference(Money::new(-2_000)),
    ///     DrawerVariance::Surplus(Money::new(2_000))
    /// );
    /// ```
    pub fn from_difference(difference: Money) -> Self {
        if difference.is_positive() {
            DrawerVariance::Shortfall(difference)
        } else if difference.is_negative() {
            DrawerVariance::Surplus(difference.abs())
        } else {
            DrawerVariance::Balanced
        }
    }
}

/// Cash that should remain on hand after transfers.
pub fn expected_cash(total_revenue: Money, transfer_amount: Money) -> Money {
    subtract(total_revenue, transfer_amount)
}

/// Expected cash minus counted cash.
pub fn cash_difference(expected_cash: Money, actual_cash_in_drawer: Money) -> Money {
    subtract(expected_cash, actual_cash_in_drawer)
}

/// Counted cash minus expenses paid out of it.
pub fn final_balance(actual_cash_in_drawer: Money, total_expenses: Money) -> Money {
    subtract(actual_cash_in_drawer, total_expenses)
}

/// Computes all derived figures for a set of counts and expenses.
///
/// # Example
///
/// ```
/// use shift_ledger::calculation::derive_figures;
/// use shift_ledger::models::{CashCounts, Money};
///
/// let counts = CashCounts::new(Money::new(1_000_000), Money::new(700_000), Money::new(295_000));
/// let figures = derive_figures(&counts, &[]);
/// assert_eq!(figures.expected_cash, Money::new(300_000));
/// assert_eq!(figures.difference, Money::new(5_000));
/// assert_eq!(figures.final_balance, Money::new(295_000));
/// ```
pub fn derive_figures(counts: &CashCounts, expenses: &[Expense]) -> DerivedFigures {
    let expected = expected_cash(counts.total_revenue, counts.transfer_amount);
    let total_expenses = sum(expenses.iter().map(Expense::amount));

    DerivedFigures {
        expected_cash: expected,
        difference: cash_difference(expected, counts.actual_cash_in_drawer),
        total_expenses,
        final_balance: final_balance(counts.actual_cash_in_drawer, total_expenses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseInput;

    fn counts(revenue: i64, transfer: i64, cash: i64) -> CashCounts {
        CashCounts::new(Money::new(revenue), Money::new(transfer), Money::new(cash))
    }

    fn expense(amount: i64, description: &str) -> Expense {
        Expense::new(ExpenseInput::new(Money::new(amount), description)).unwrap()
    }

    #[test]
    fn test_reference_shift() {
        let figures = derive_figures(
            &counts(1_000_000, 700_000, 295_000),
            &[expense(120_000, "electricity")],
        );

        assert_eq!(figures.expected_cash, Money::new(300_000));
        assert_eq!(figures.difference, Money::new(5_000));
        assert_eq!(figures.total_expenses, Money::new(120_000));
        assert_eq!(figures.final_balance, Money::new(175_000));
        assert_eq!(
            figures.drawer_variance(),
            DrawerVariance::Shortfall(Money::new(5_000))
        );
    }

    #[test]
    fn test_multiple_expenses_are_summed() {
        let figures = derive_figures(
            &counts(600_000, 0, 600_000),
            &[expense(50_000, "ice"), expense(25_000, "gas"), expense(5_000, "bags")],
        );

        assert_eq!(figures.total_expenses, Money::new(80_000));
        assert_eq!(figures.final_balance, Money::new(520_000));
        assert_eq!(figures.drawer_variance(), DrawerVariance::Balanced);
    }

    #[test]
    fn test_expenses_exceeding_cash_give_negative_balance() {
        let figures = derive_figures(&counts(100_000, 0, 100_000), &[expense(150_000, "repair")]);
        assert_eq!(figures.final_balance, Money::new(-50_000));
    }

    #[test]
    fn test_transfer_above_revenue_gives_negative_expected_cash() {
        let figures = derive_figures(&counts(100_000, 150_000, 0), &[]);
        assert_eq!(figures.expected_cash, Money::new(-50_000));
        assert_eq!(
            figures.drawer_variance(),
            DrawerVariance::Surplus(Money::new(50_000))
        );
    }

    #[test]
    fn test_variance_serialization() {
        let json = serde_json::to_string(&DrawerVariance::Shortfall(Money::new(5_000))).unwrap();
        assert_eq!(json, r#"{"kind":"shortfall","amount":5000}"#);

        let json = serde_json::to_string(&DrawerVariance::Balanced).unwrap();
        assert_eq!(json, r#"{"kind":"balanced"}"#);
    }
}
