//! Property-based tests for the reconciliation invariants.
//!
//! These tests check the derived-figure formulas, visibility scoping,
//! verification and verified-only aggregation over generated entry sets.

use chrono::NaiveDate;
use proptest::prelude::*;

use shift_ledger::calculation::{SummaryOptions, add_expense, summarize, total_expenses};
use shift_ledger::models::{
    Actor, CashCounts, EntryStatus, EntrySubmission, ExpenseInput, Money, ShiftEntry,
};
use shift_ledger::workflow::{EntryFilter, VerifyOutcome, verify, visible_entries};

const STAFF: [&str; 4] = ["staff-1", "staff-2", "staff-3", "staff-4"];

/// Strategy for realistic non-negative amounts.
fn amount() -> impl Strategy<Value = i64> {
    0i64..10_000_000_000
}

/// Strategy for valid expense amounts.
fn expense_amount() -> impl Strategy<Value = i64> {
    1i64..50_000_000
}

/// Strategy for a shift entry with random counts, expenses, staff member
/// and status.
fn entry_strategy() -> impl Strategy<Value = ShiftEntry> {
    (
        amount(),
        amount(),
        amount(),
        prop::collection::vec(expense_amount(), 0..6),
        0usize..STAFF.len(),
        0u32..28,
        any::<bool>(),
    )
        .prop_map(|(revenue, transfer, cash, expenses, staff, day, verified)| {
            let mut submission = EntrySubmission::new(
                NaiveDate::from_ymd_opt(2026, 2, 1 + day).unwrap(),
                if day % 2 == 0 { "store-1" } else { "store-2" },
                STAFF[staff],
                "shift-1",
                CashCounts::new(Money::new(revenue), Money::new(transfer), Money::new(cash)),
            );
            for (i, amount) in expenses.into_iter().enumerate() {
                submission =
                    submission.with_expense(ExpenseInput::new(Money::new(amount), format!("item {}", i)));
            }

            let mut entry = ShiftEntry::create(submission).unwrap();
            if verified {
                verify(&mut entry, &Actor::admin("admin-1")).unwrap();
            }
            entry
        })
}

proptest! {
    /// Property: derived figures follow the formulas for any raw inputs.
    #[test]
    fn prop_derived_figures_follow_formulas(entry in entry_strategy()) {
        let expense_sum: i64 = entry.expenses().iter().map(|e| e.amount().units()).sum();

        prop_assert_eq!(entry.expected_cash(), entry.total_revenue() - entry.transfer_amount());
        prop_assert_eq!(entry.difference(), entry.expected_cash() - entry.actual_cash_in_drawer());
        prop_assert_eq!(entry.total_expenses().units(), expense_sum);
        prop_assert_eq!(entry.final_balance(), entry.actual_cash_in_drawer() - entry.total_expenses());
    }

    /// Property: revising counts keeps the formulas true.
    #[test]
    fn prop_revised_counts_recompute(
        entry in entry_strategy(),
        revenue in amount(),
        transfer in amount(),
        cash in amount(),
    ) {
        let mut entry = entry;
        let result = entry.revise_counts(CashCounts::new(
            Money::new(revenue),
            Money::new(transfer),
            Money::new(cash),
        ));

        if entry.is_verified() {
            prop_assert!(result.is_err());
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(entry.expected_cash(), Money::new(revenue - transfer));
            prop_assert_eq!(entry.difference(), Money::new(revenue - transfer - cash));
        }
    }

    /// Property: adding an expense shifts totals by exactly its amount.
    #[test]
    fn prop_add_expense_shifts_totals(entry in entry_strategy(), extra in expense_amount()) {
        prop_assume!(!entry.is_verified());
        let mut entry = entry;
        let total_before = total_expenses(&entry);
        let balance_before = entry.final_balance();

        add_expense(&mut entry, Money::new(extra), "extra", None).unwrap();

        prop_assert_eq!(entry.total_expenses(), total_before + Money::new(extra));
        prop_assert_eq!(entry.final_balance(), balance_before - Money::new(extra));
    }

    /// Property: non-positive expense amounts never change the entry.
    #[test]
    fn prop_invalid_expense_leaves_entry_unchanged(entry in entry_strategy(), bad in -1_000_000i64..=0) {
        let mut entry = entry;
        let before = entry.clone();

        prop_assert!(add_expense(&mut entry, Money::new(bad), "x", None).is_err());
        prop_assert_eq!(entry, before);
    }

    /// Property: staff only ever see their own entries, whatever they ask for.
    #[test]
    fn prop_staff_visibility_is_scoped(
        entries in prop::collection::vec(entry_strategy(), 0..30),
        viewer in 0usize..STAFF.len() + 1,
        requested in 0usize..STAFF.len(),
    ) {
        let viewer_id = STAFF.get(viewer).copied().unwrap_or("staff-9");
        let actor = Actor::staff(viewer_id);
        let filter = EntryFilter::default().for_staff(STAFF[requested]);

        let visible = visible_entries(&entries, &actor, &filter);
        let expected = entries.iter().filter(|e| e.staff_user_id() == viewer_id).count();

        prop_assert!(visible.iter().all(|e| e.staff_user_id() == viewer_id));
        prop_assert_eq!(visible.len(), expected);
    }

    /// Property: admins see every entry without filters.
    #[test]
    fn prop_admin_sees_all(entries in prop::collection::vec(entry_strategy(), 0..30)) {
        let visible = visible_entries(&entries, &Actor::admin("admin-1"), &EntryFilter::default());
        prop_assert_eq!(visible.len(), entries.len());
    }

    /// Property: staff can never verify, and admins verify exactly the target.
    #[test]
    fn prop_only_admin_verifies(
        entries in prop::collection::vec(entry_strategy(), 1..10),
        target in any::<prop::sample::Index>(),
        staff in 0usize..STAFF.len(),
    ) {
        let mut entries = entries;
        let index = target.index(entries.len());
        let before: Vec<EntryStatus> = entries.iter().map(ShiftEntry::status).collect();

        prop_assert!(verify(&mut entries[index], &Actor::staff(STAFF[staff])).is_err());
        prop_assert_eq!(entries[index].status(), before[index]);

        let outcome = verify(&mut entries[index], &Actor::admin("admin-1")).unwrap();
        let expected_outcome = if before[index] == EntryStatus::Pending {
            VerifyOutcome::Verified
        } else {
            VerifyOutcome::AlreadyVerified
        };
        prop_assert_eq!(outcome, expected_outcome);

        for (i, entry) in entries.iter().enumerate() {
            if i == index {
                prop_assert_eq!(entry.status(), EntryStatus::Verified);
            } else {
                prop_assert_eq!(entry.status(), before[i]);
            }
        }
    }

    /// Property: verified-only summaries never count pending amounts.
    #[test]
    fn prop_verified_only_excludes_pending(entries in prop::collection::vec(entry_strategy(), 0..30)) {
        let verified: Vec<ShiftEntry> = entries.iter().filter(|e| e.is_verified()).cloned().collect();

        prop_assert_eq!(
            summarize(&entries, SummaryOptions::verified_only()),
            summarize(&verified, SummaryOptions::default())
        );
    }

    /// Property: when every entry is verified, both summaries agree.
    #[test]
    fn prop_all_verified_matches_unfiltered(entries in prop::collection::vec(entry_strategy(), 0..30)) {
        let admin = Actor::admin("admin-1");
        let mut entries = entries;
        for entry in &mut entries {
            verify(entry, &admin).unwrap();
        }

        prop_assert_eq!(
            summarize(&entries, SummaryOptions::verified_only()),
            summarize(&entries, SummaryOptions::default())
        );
    }
}
