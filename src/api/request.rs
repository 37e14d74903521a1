//! Request types for the shift ledger API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::SummaryOptions;
use crate::models::{Actor, CashCounts, EntrySubmission, ExpenseInput, Money};
use crate::workflow::EntryFilter;

/// Request body for `POST /entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitEntryRequest {
    /// The business date of the shift.
    pub date: NaiveDate,
    /// The store the shift was worked at.
    pub store_id: String,
    /// Whom the entry is for. Defaults to the acting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_user_id: Option<String>,
    /// The kind of shift.
    pub shift_type_id: String,
    /// Till revenue.
    pub total_revenue: Money,
    /// Amount transferred out.
    #[serde(default)]
    pub transfer_amount: Money,
    /// Counted drawer cash.
    pub actual_cash_in_drawer: Money,
    /// Expenses paid out of the drawer.
    #[serde(default)]
    pub expenses: Vec<ExpenseInput>,
}

impl SubmitEntryRequest {
    /// Builds the submission, attributing it to the actor when no staff
    /// member is named.
    pub fn into_submission(self, actor: &Actor) -> EntrySubmission {
        EntrySubmission {
            date: self.date,
            store_id: self.store_id,
            staff_user_id: self.staff_user_id.unwrap_or_else(|| actor.id.clone()),
            shift_type_id: self.shift_type_id,
            counts: CashCounts::new(
                self.total_revenue,
                self.transfer_amount,
                self.actual_cash_in_drawer,
            ),
            expenses: self.expenses,
        }
    }
}

/// Query string for `GET /entries` and `GET /summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryQuery {
    /// Earliest business date, inclusive.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Latest business date, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Only this store.
    #[serde(default)]
    pub store_id: Option<String>,
    /// Only this staff member. Ignored for staff actors.
    #[serde(default)]
    pub staff_user_id: Option<String>,
    /// Count verified entries only. Only used by `/summary`.
    #[serde(default)]
    pub verified_only: bool,
}

impl EntryQuery {
    /// The filter part of the query.
    pub fn filter(&self) -> EntryFilter {
        EntryFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            store_id: self.store_id.clone(),
            staff_user_id: self.staff_user_id.clone(),
        }
    }

    /// The summary options part of the query.
    pub fn options(&self) -> SummaryOptions {
        SummaryOptions {
            verified_only: self.verified_only,
        }
    }
}
