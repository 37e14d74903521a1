//! The identity collaborator.
//!
//! Users, stores and shift types are looked up by id through a
//! [`Directory`]. The ledger itself only stores the ids.

use crate::models::{ShiftType, Store, User};

/// Lookup of the reference records that entries point at.
pub trait Directory: Send + Sync {
    /// Finds a user by id.
    fn user(&self, id: &str) -> Option<&User>;

    /// Finds a store by id.
    fn store(&self, id: &str) -> Option<&Store>;

    /// Finds a shift type by id.
    fn shift_type(&self, id: &str) -> Option<&ShiftType>;

    /// Returns the reference list of stores in display order.
    fn stores(&self) -> &[Store];
}
