//! Configuration types for the shift ledger.
//!
//! This module contains the strongly-typed structures deserialized from
//! the YAML files in a configuration directory.

use serde::Deserialize;

use crate::directory::Directory;
use crate::models::{ShiftType, Store, User};

/// Metadata about the organisation running the stores.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganisationMetadata {
    /// A short code for the organisation.
    pub code: String,
    /// The human-readable name.
    pub name: String,
    /// ISO 4217 code of the currency all amounts are kept in.
    pub currency: String,
    /// Symbol shown next to amounts.
    #[serde(default)]
    pub currency_symbol: Option<String>,
}

/// Stores configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StoresConfig {
    /// Stores in display order.
    pub stores: Vec<Store>,
}

/// Shift types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTypesConfig {
    /// Shift types in display order.
    pub shift_types: Vec<ShiftType>,
}

/// Users configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersConfig {
    /// Known users.
    pub users: Vec<User>,
}

/// The reference records loaded from a configuration directory.
///
/// Lists keep their file order, which is the order they are displayed in.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    organisation: OrganisationMetadata,
    stores: Vec<Store>,
    shift_types: Vec<ShiftType>,
    users: Vec<User>,
}

impl ReferenceData {
    /// Creates reference data from its component parts.
    pub fn new(
        organisation: OrganisationMetadata,
        stores: Vec<Store>,
        shift_types: Vec<ShiftType>,
        users: Vec<User>,
    ) -> Self {
        Self {
            organisation,
            stores,
            shift_types,
            users,
        }
    }

    /// Returns the organisation metadata.
    pub fn organisation(&self) -> &OrganisationMetadata {
        &self.organisation
    }

    /// Returns all shift types.
    pub fn shift_types(&self) -> &[ShiftType] {
        &self.shift_types
    }

    /// Returns all users.
    pub fn users(&self) -> &[User] {
        &self.users
    }
}

impl Directory for ReferenceData {
    fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    fn store(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|store| store.id == id)
    }

    fn shift_type(&self, id: &str) -> Option<&ShiftType> {
        self.shift_types.iter().find(|shift_type| shift_type.id == id)
    }

    fn stores(&self) -> &[Store] {
        &self.stores
    }
}
