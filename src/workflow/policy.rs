//! Role-based access policy.
//!
//! Every permission check in the crate goes through [`authorize`] and
//! [`can_view`]. Callers never branch on [`Role`] themselves.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Actor, Role, ShiftEntry};

/// Something an actor may attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Read shift entries.
    ViewEntries,
    /// Submit an entry attributed to the given staff member.
    CreateEntry {
        /// Whom the entry will be attributed to.
        staff_user_id: String,
    },
    /// Delete an entry of any status.
    DeleteEntry,
    /// Move an entry from pending to verified.
    VerifyEntry,
    /// Reset another user's credential.
    ResetCredential {
        /// The user whose credential is reset.
        user_id: String,
    },
    /// Change a credential through the profile page.
    ChangeOwnCredential {
        /// The user whose credential is changed.
        user_id: String,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ViewEntries => write!(f, "view shift entries"),
            Action::CreateEntry { staff_user_id } => {
                write!(f, "create shift entries for '{}'", staff_user_id)
            }
            Action::DeleteEntry => write!(f, "delete shift entries"),
            Action::VerifyEntry => write!(f, "verify shift entries"),
            Action::ResetCredential { user_id } => {
                write!(f, "reset the credential of '{}'", user_id)
            }
            Action::ChangeOwnCredential { user_id } => {
                write!(f, "change the credential of '{}'", user_id)
            }
        }
    }
}

/// Checks whether the actor may perform the action.
///
/// Administrators may do everything. Staff may view entries, create entries
/// attributed to themselves and change their own credential.
///
/// # Example
///
/// ```
/// use shift_ledger::models::Actor;
/// use shift_ledger::workflow::{Action, authorize};
///
/// let staff = Actor::staff("staff-1");
/// assert!(authorize(&staff, &Action::ViewEntries).is_ok());
/// assert!(authorize(&staff, &Action::VerifyEntry).is_err());
/// assert!(authorize(&Actor::admin("admin-1"), &Action::VerifyEntry).is_ok());
/// ```
pub fn authorize(actor: &Actor, action: &Action) -> LedgerResult<()> {
    let permitted = match actor.role {
        Role::Admin => true,
        Role::Staff => match action {
            Action::ViewEntries => true,
            Action::CreateEntry { staff_user_id } => is_self(actor, staff_user_id),
            Action::ChangeOwnCredential { user_id } => is_self(actor, user_id),
            Action::DeleteEntry | Action::VerifyEntry | Action::ResetCredential { .. } => false,
        },
    };

    if permitted {
        Ok(())
    } else {
        Err(LedgerError::PermissionDenied {
            actor_id: actor.id.clone(),
            role: actor.role,
            action: action.to_string(),
        })
    }
}

fn is_self(actor: &Actor, user_id: &str) -> bool {
    !actor.id.is_empty() && actor.id == user_id
}

/// Returns true if the actor may read the entry.
pub fn can_view(actor: &Actor, entry: &ShiftEntry) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Staff => is_self(actor, entry.staff_user_id()),
    }
}

/// Narrowing applied on top of role visibility.
///
/// Date bounds are inclusive. Unset fields do not narrow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Earliest business date to include.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Latest business date to include.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Only this store.
    #[serde(default)]
    pub store_id: Option<String>,
    /// Only this staff member.
    #[serde(default)]
    pub staff_user_id: Option<String>,
}

impl EntryFilter {
    /// Restricts to business dates within `start..=end`.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Restricts to one store.
    pub fn for_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Restricts to one staff member.
    pub fn for_staff(mut self, staff_user_id: impl Into<String>) -> Self {
        self.staff_user_id = Some(staff_user_id.into());
        self
    }

    /// Returns the filter that actually applies for the actor.
    ///
    /// A staff actor's staff filter is always their own id, whatever was
    /// requested.
    pub fn scoped_to(&self, actor: &Actor) -> Self {
        let mut scoped = self.clone();
        if actor.role == Role::Staff {
            scoped.staff_user_id = Some(actor.id.clone());
        }
        scoped
    }

    /// Returns true if the entry passes every set field.
    pub fn matches(&self, entry: &ShiftEntry) -> bool {
        self.start_date.is_none_or(|start| entry.date() >= start)
            && self.end_date.is_none_or(|end| entry.date() <= end)
            && self
                .store_id
                .as_deref()
                .is_none_or(|store_id| entry.store_id() == store_id)
            && self
                .staff_user_id
                .as_deref()
                .is_none_or(|staff_user_id| entry.staff_user_id() == staff_user_id)
    }
}

/// Returns the entries the actor may see that pass the filter.
///
/// For staff the result only ever holds their own entries, whatever the
/// filter asks for. An empty result is not an error.
pub fn visible_entries<'a>(
    entries: &'a [ShiftEntry],
    actor: &Actor,
    filter: &EntryFilter,
) -> Vec<&'a ShiftEntry> {
    let scoped = filter.scoped_to(actor);
    entries
        .iter()
        .filter(|entry| can_view(actor, entry) && scoped.matches(entry))
        .collect()
}
