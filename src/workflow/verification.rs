//! The verification state machine.
//!
//! An entry starts out `PENDING` and an administrator may move it to
//! `VERIFIED`. There is no way back.

use serde::{Deserialize, Serialize};

use super::policy::{Action, authorize};
use crate::error::LedgerResult;
use crate::models::{Actor, EntryStatus, ShiftEntry};

/// What a call to [`verify`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// The entry moved from pending to verified.
    Verified,
    /// The entry was already verified; nothing changed.
    AlreadyVerified,
}

/// Returns true if `from` may move to `to`.
pub fn can_transition(from: EntryStatus, to: EntryStatus) -> bool {
    matches!((from, to), (EntryStatus::Pending, EntryStatus::Verified))
}

/// Verifies a pending entry on behalf of an administrator.
///
/// Verifying an entry that is already verified is a no-op reported as
/// [`VerifyOutcome::AlreadyVerified`], so concurrent verifications of the
/// same entry end in the same state whatever order they land in.
///
/// # Errors
///
/// Returns `PermissionDenied` for staff actors. The entry is untouched.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_ledger::models::{Actor, CashCounts, EntrySubmission, Money, ShiftEntry};
/// use shift_ledger::workflow::{VerifyOutcome, verify};
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
/// let admin = Actor::admin("admin-1");
/// assert_eq!(verify(&mut entry, &admin).unwrap(), VerifyOutcome::Verified);
/// assert_eq!(verify(&mut entry, &admin).unwrap(), VerifyOutcome::AlreadyVerified);
/// ```
pub fn verify(entry: &mut ShiftEntry, actor: &Actor) -> LedgerResult<VerifyOutcome> {
    authorize(actor, &Action::VerifyEntry)?;

    if !can_transition(entry.status(), EntryStatus::Verified) {
        return Ok(VerifyOutcome::AlreadyVerified);
    }

    entry.mark_verified();
    Ok(VerifyOutcome::Verified)
}
