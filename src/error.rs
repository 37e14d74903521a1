//! Error types for the shift ledger.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the reconciliation engine can report.

use thiserror::Error;
use uuid::Uuid;

use crate::models::Role;
use crate::repository::StoreError;

/// The main error type for the shift ledger.
///
/// Every operation returns this error type. Failures are never retried or
/// swallowed inside the crate; the caller always receives the error as raised.
///
/// # Example
///
/// ```
/// use shift_ledger::error::LedgerError;
///
/// let error = LedgerError::Validation {
///     field: "store_id".to_string(),
///     message: "must not be empty".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid store_id: must not be empty");
/// ```
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or held inconsistent data.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Input was malformed or a required value was missing.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The offending input field.
        field: String,
        /// What made the field invalid.
        message: String,
    },

    /// No shift entry exists with the given id.
    #[error("Shift entry not found: {entry_id}")]
    EntryNotFound {
        /// The id that was looked up.
        entry_id: Uuid,
    },

    /// The entry exists but holds no expense with the given id.
    #[error("Expense '{expense_id}' not found on shift entry {entry_id}")]
    ExpenseNotFound {
        /// The parent entry.
        entry_id: Uuid,
        /// The expense id that was looked up.
        expense_id: Uuid,
    },

    /// The actor's role does not authorize the requested action.
    #[error("User '{actor_id}' ({role}) is not permitted to {action}")]
    PermissionDenied {
        /// The acting user's id.
        actor_id: String,
        /// The acting user's role.
        role: Role,
        /// A description of the refused action.
        action: String,
    },

    /// The entry has been verified and can no longer change.
    #[error("Shift entry {entry_id} is verified and can no longer be changed")]
    AlreadyVerified {
        /// The verified entry.
        entry_id: Uuid,
    },

    /// The external entry store failed; passed through untouched.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

/// The broad category of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration could not be loaded.
    Configuration,
    /// Malformed or missing input.
    Validation,
    /// The targeted entry or expense does not exist.
    NotFound,
    /// The actor may not perform the action.
    Permission,
    /// The targeted entry is already verified.
    AlreadyVerified,
    /// The entry store reported a failure.
    Persistence,
}

impl LedgerError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigNotFound { .. } | Self::ConfigParseError { .. } => {
                ErrorKind::Configuration
            }
            Self::Validation { .. } => ErrorKind::Validation,
            Self::EntryNotFound { .. } | Self::ExpenseNotFound { .. } => ErrorKind::NotFound,
            Self::PermissionDenied { .. } => ErrorKind::Permission,
            Self::AlreadyVerified { .. } => ErrorKind::AlreadyVerified,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;
