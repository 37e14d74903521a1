//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading reference
//! data from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};

use super::types::{
    OrganisationMetadata, ReferenceData, ShiftTypesConfig, StoresConfig, UsersConfig,
};

/// Loads and provides access to the ledger's reference data.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── organisation.yaml   # Organisation name and currency
/// ├── stores.yaml         # Reference list of stores
/// ├── shift_types.yaml    # Reference list of shift types
/// └── users.yaml          # Users and their roles
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_ledger::config::ConfigLoader;
/// use shift_ledger::directory::Directory;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let store = loader.reference_data().store("store-1").unwrap();
/// println!("Store: {}", store.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    data: ReferenceData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - An id is empty or appears twice in one file (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();

        let organisation = Self::load_yaml::<OrganisationMetadata>(&path.join("organisation.yaml"))?;

        let stores_path = path.join("stores.yaml");
        let stores = Self::load_yaml::<StoresConfig>(&stores_path)?.stores;
        Self::check_ids(&stores_path, stores.iter().map(|s| s.id.as_str()))?;

        let shift_types_path = path.join("shift_types.yaml");
        let shift_types = Self::load_yaml::<ShiftTypesConfig>(&shift_types_path)?.shift_types;
        Self::check_ids(&shift_types_path, shift_types.iter().map(|s| s.id.as_str()))?;

        let users_path = path.join("users.yaml");
        let users = Self::load_yaml::<UsersConfig>(&users_path)?.users;
        Self::check_ids(&users_path, users.iter().map(|u| u.id.as_str()))?;

        info!(
            organisation = %organisation.code,
            stores = stores.len(),
            shift_types = shift_types.len(),
            users = users.len(),
            "Reference data loaded"
        );

        Ok(Self {
            data: ReferenceData::new(organisation, stores, shift_types, users),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LedgerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LedgerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LedgerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects empty and repeated ids within one file.
    fn check_ids<'a>(path: &Path, ids: impl Iterator<Item = &'a str>) -> LedgerResult<()> {
        let mut seen = HashSet::new();

        for id in ids {
            if id.trim().is_empty() {
                return Err(LedgerError::ConfigParseError {
                    path: path.display().to_string(),
                    message: "id must not be empty".to_string(),
                });
            }
            if !seen.insert(id) {
                return Err(LedgerError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate id '{}'", id),
                });
            }
        }

        Ok(())
    }

    /// Returns the loaded reference data.
    pub fn reference_data(&self) -> &ReferenceData {
        &self.data
    }

    /// Consumes the loader and returns the reference data.
    pub fn into_reference_data(self) -> ReferenceData {
        self.data
    }
}
