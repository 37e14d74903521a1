//! Actors and the reference records they are identified by.
//!
//! Users, stores and shift types belong to the identity collaborator. The
//! ledger refers to them by id only and never checks that an id exists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role an actor holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Records their own shifts.
    Staff,
    /// Sees everything, verifies and deletes entries.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Staff => write!(f, "STAFF"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

/// The identity on whose behalf an operation runs.
///
/// # Example
///
/// ```
/// use shift_ledger::models::{Actor, Role};
///
/// let actor = Actor::staff("staff-1");
/// assert_eq!(actor.role, Role::Staff);
/// assert!(!actor.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// The user id.
    pub id: String,
    /// The user's role.
    pub role: Role,
}

impl Actor {
    /// Creates a staff actor.
    pub fn staff(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Staff,
        }
    }

    /// Creates an administrator actor.
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Admin,
        }
    }

    /// Returns true if the actor is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user known to the identity collaborator. Credentials are not held here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// The user's role.
    pub role: Role,
}

impl User {
    /// Returns the actor this user acts as.
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id.clone(),
            role: self.role,
        }
    }
}

/// A retail store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Unique identifier for the store.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A kind of shift, such as morning or evening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftType {
    /// Unique identifier for the shift type.
    pub id: String,
    /// Display name.
    pub name: String,
}
