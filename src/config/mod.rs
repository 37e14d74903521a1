//! Configuration loading for the shift ledger.
//!
//! This module loads the organisation's reference data (stores, shift types
//! and users) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Organisation: {}", config.reference_data().organisation().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    OrganisationMetadata, ReferenceData, ShiftTypesConfig, StoresConfig, UsersConfig,
};
