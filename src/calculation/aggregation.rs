//! Aggregation of shift entries for reporting.
//!
//! All functions here are pure folds over whatever snapshot of entries the
//! caller supplies. They make no assumption that the snapshot is current.

use std::collections::BTreeMap;

use crate::models::{ShiftEntry, Store, StoreStanding, StoreTotals, Summary};

/// Options for [`summarize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Only count entries an administrator has verified.
    pub verified_only: bool,
}

impl SummaryOptions {
    /// Options counting verified entries only.
    pub fn verified_only() -> Self {
        Self {
            verified_only: true,
        }
    }

    /// Returns true if the entry should be counted under these options.
    pub fn includes(&self, entry: &ShiftEntry) -> bool {
        !self.verified_only || entry.is_verified()
    }
}

/// Sums the figures of the supplied entries.
///
/// With `verified_only` set, pending entries contribute nothing to any
/// total.
///
/// # Example
///
/// ```
/// use shift_ledger::calculation::{SummaryOptions, summarize};
/// use shift_ledger::models::{Money, ShiftEntry};
///
/// let entries: Vec<ShiftEntry> = Vec::new();
/// let summary = summarize(&entries, SummaryOptions::default());
/// assert_eq!(summary.final_balance, Money::ZERO);
/// ```
pub fn summarize<'a, I>(entries: I, options: SummaryOptions) -> Summary
where
    I: IntoIterator<Item = &'a ShiftEntry>,
{
    entries
        .into_iter()
        .filter(|entry| options.includes(entry))
        .fold(Summary::default(), |mut acc, entry| {
            let figures = entry.figures();
            acc.entry_count += 1;
            acc.total_revenue += entry.total_revenue();
            acc.total_transfers += entry.transfer_amount();
            acc.total_actual_cash += entry.actual_cash_in_drawer();
            acc.total_difference += figures.difference;
            acc.total_expenses += figures.total_expenses;
            acc.final_balance += figures.final_balance;
            acc
        })
}

/// Groups revenue and final balance by store id.
///
/// Every store in the reference list gets a group, zero-valued when no
/// entry matches. Entries for stores missing from the list still get their
/// own group.
pub fn group_by_store<'a, I>(entries: I, stores: &[Store]) -> BTreeMap<String, StoreTotals>
where
    I: IntoIterator<Item = &'a ShiftEntry>,
{
    let mut groups: BTreeMap<String, StoreTotals> = stores
        .iter()
        .map(|store| (store.id.clone(), StoreTotals::default()))
        .collect();

    for entry in entries {
        let totals = groups.entry(entry.store_id().to_string()).or_default();
        totals.revenue += entry.total_revenue();
        totals.final_balance += entry.final_balance();
    }

    groups
}

/// Orders store groups by final balance, highest first.
///
/// Ties keep store id order. Names are filled from the reference list.
pub fn rank_stores(groups: &BTreeMap<String, StoreTotals>, stores: &[Store]) -> Vec<StoreStanding> {
    let mut standings: Vec<StoreStanding> = groups
        .iter()
        .map(|(store_id, totals)| StoreStanding {
            store_id: store_id.clone(),
            name: stores
                .iter()
                .find(|store| &store.id == store_id)
                .map(|store| store.name.clone()),
            revenue: totals.revenue,
            final_balance: totals.final_balance,
        })
        .collect();

    standings.sort_by(|a, b| b.final_balance.cmp(&a.final_balance));
    standings
}

/// Returns up to `limit` entries, most recently created first.
pub fn recent_entries<'a, I>(entries: I, limit: usize) -> Vec<&'a ShiftEntry>
where
    I: IntoIterator<Item = &'a ShiftEntry>,
{
    let mut recent: Vec<&ShiftEntry> = entries.into_iter().collect();
    recent.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    recent.truncate(limit);
    recent
}
