//! Access policy and the verification workflow.
//!
//! The policy decides what each actor may see and do. The verification
//! state machine moves entries from pending to verified. The service ties
//! both to an entry store.

mod policy;
mod service;
mod verification;

pub use policy::{Action, EntryFilter, authorize, can_view, visible_entries};
pub use service::{LedgerService, RECENT_LIMIT, Report};
pub use verification::{VerifyOutcome, can_transition, verify};
