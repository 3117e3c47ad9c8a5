//! Role-based route guarding for the point-of-sale administration client.
//!
//! Every navigation attempt is resolved against a declarative route table,
//! checked against the current session, and either rendered or redirected:
//! - **Unauthenticated** sessions are sent to `/login` with a "Session
//!   Expired" notice
//! - **Forbidden** sessions (token, but no allowed role) are sent to
//!   `/unauthorized` with an "Access Denied" notice
//! - **Unmatched** paths fall back to `/` silently
//!
//! # Core Types
//!
//! - [`RouteTable`]: immutable path-to-page mapping with per-route [`Access`]
//! - [`SessionGate`]: the pure session check producing a [`Verdict`]
//! - [`Router`]: resolves, gates and redirects; [`Router::decide`] is pure
//! - [`Session`]: token and roles, loaded through a [`SessionSource`]
//! - [`Navigator`] and [`Notifier`]: output seams for redirects and notices
//!
//! # Examples
//!
//! ```
//! use route_guard::{pos_router, GuardConfig, History, MemoryStorage, NoticeLog, Page};
//!
//! let router = pos_router(GuardConfig::default()).unwrap();
//!
//! let storage = MemoryStorage::new();
//! storage.set_item("token", "t2");
//! storage.set_item("roles", r#"["ROLE_CASHIER"]"#);
//! let session = router.stored_session(&storage);
//!
//! let history = History::starting_at("/settings");
//! let notices = NoticeLog::new();
//!
//! // A cashier may not open the settings screen
//! router.navigate("/settings", &session, &history, &notices);
//! assert_eq!(notices.last().unwrap().title, "Access Denied");
//! assert_eq!(history.current().as_deref(), Some("/unauthorized"));
//!
//! // but may open the till
//! let decision = router.navigate("/cashier", &session, &history, &notices);
//! assert_eq!(decision.page(), Some(&Page::Cashier));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod config;
mod error;
mod gate;
mod location;
mod logging;
mod navigator;
mod notice;
mod policy;
mod role;
pub mod route;
mod router;
pub mod session;
mod token;

pub use audit::{AccessEvent, AccessOutcome, AccessTrail};
pub use config::GuardConfig;
pub use error::{ConfigError, ConfigErrorKind, Error};
pub use gate::{SessionGate, Verdict};
pub use location::Location;
pub use logging::NavigationLog;
pub use navigator::{History, Navigator, RedirectOptions};
pub use notice::{Notice, NoticeLog, Notifier, Severity, TracingNotifier};
pub use policy::Access;
pub use role::{Role, RoleSet, UnknownRole};
pub use route::catalog::{pos_router, Page};
pub use route::{Chrome, ResolutionPolicy, RouteTable};
pub use router::{Decision, RedirectReason, Router};
pub use session::{MemoryStorage, Session, SessionSource, Storage, StoredSession};
pub use token::SessionToken;
