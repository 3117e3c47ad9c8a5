//! Audit trail of navigation decisions.
//!
//! This module provides:
//! - `AccessEvent`: one navigation attempt and how it ended
//! - `AccessTrail`: in-memory, ordered recorder of access events
//!
//! Events never carry the session token; only the path, the outcome, the
//! session's roles and the redirect target are recorded.

mod event;
mod trail;

pub use event::{AccessEvent, AccessOutcome};
pub use trail::AccessTrail;
