//! Application state for the shift ledger API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, ReferenceData};
use crate::repository::EntryRepository;
use crate::workflow::LedgerService;

/// Shared application state.
///
/// Holds the loaded reference data and the ledger service over the entry
/// store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    ledger: LedgerService,
}

impl AppState {
    /// Creates a new application state from loaded configuration and an
    /// entry store.
    pub fn new(config: ConfigLoader, repository: Arc<dyn EntryRepository>) -> Self {
        Self {
            config: Arc::new(config),
            ledger: LedgerService::new(repository),
        }
    }

    /// Returns the reference data used to resolve actors and stores.
    pub fn directory(&self) -> &ReferenceData {
        self.config.reference_data()
    }

    /// Returns the ledger service.
    pub fn ledger(&self) -> &LedgerService {
        &self.ledger
    }
}
