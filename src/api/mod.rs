//! HTTP API module for the shift ledger.
//!
//! This module provides a thin JSON surface over the ledger service. The
//! acting user is named by the `x-actor-id` header and resolved against
//! the configured users.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ACTOR_HEADER, create_router};
pub use request::{EntryQuery, SubmitEntryRequest};
pub use response::{ApiError, ApiErrorResponse, VerifyResponse};
pub use state::AppState;
