//! Navigation: resolve a location, run the gate, render or redirect.

use std::cell::Cell;
use std::fmt;

use crate::audit::{AccessEvent, AccessOutcome, AccessTrail};
use crate::config::GuardConfig;
use crate::gate::{SessionGate, Verdict};
use crate::location::Location;
use crate::logging::NavigationLog;
use crate::navigator::{Navigator, RedirectOptions};
use crate::notice::{Notice, Notifier};
use crate::route::{Chrome, Params, RouteTable};
use crate::session::{Session, SessionSource, Storage, StoredSession};

/// Why a navigation attempt was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// No session token
    Unauthenticated,
    /// Token present but none of the required roles
    Forbidden,
    /// No route matched the path
    NotFound,
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectReason::Unauthenticated => write!(f, "unauthenticated"),
            RedirectReason::Forbidden => write!(f, "forbidden"),
            RedirectReason::NotFound => write!(f, "not found"),
        }
    }
}

impl From<RedirectReason> for AccessOutcome {
    fn from(reason: RedirectReason) -> Self {
        match reason {
            RedirectReason::Unauthenticated => AccessOutcome::Unauthenticated,
            RedirectReason::Forbidden => AccessOutcome::Forbidden,
            RedirectReason::NotFound => AccessOutcome::NotFound,
        }
    }
}

/// What to do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<'a, P> {
    /// Show `page` inside `chrome`
    Render {
        /// The page to render
        page: &'a P,
        /// Wrapper around the page
        chrome: Chrome,
        /// Parameters captured from the path
        params: Params,
        /// The pattern that matched
        pattern: &'a str,
    },
    /// Show `notice` (if any), then move to `to`
    Redirect {
        /// Target path
        to: &'a str,
        /// Replace the current history entry
        replace: bool,
        /// Notice shown before the redirect
        notice: Option<Notice>,
        /// Why the attempt was redirected
        reason: RedirectReason,
    },
}

impl<'a, P> Decision<'a, P> {
    /// Returns the page to render, if any.
    pub fn page(&self) -> Option<&'a P> {
        match self {
            Decision::Render { page, .. } => Some(*page),
            Decision::Redirect { .. } => None,
        }
    }

    /// Returns the redirect target, if any.
    pub fn redirect_target(&self) -> Option<&'a str> {
        match self {
            Decision::Render { .. } => None,
            Decision::Redirect { to, .. } => Some(*to),
        }
    }

    /// Returns the redirect reason, if any.
    pub fn reason(&self) -> Option<RedirectReason> {
        match self {
            Decision::Render { .. } => None,
            Decision::Redirect { reason, .. } => Some(*reason),
        }
    }

    /// Returns the notice to show, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Decision::Render { .. } => None,
            Decision::Redirect { notice, .. } => notice.as_ref(),
        }
    }
}

/// Guards a [`RouteTable`] with a [`SessionGate`].
///
/// [`Router::decide`] is pure. [`Router::navigate`] loads the session,
/// decides, then shows the notice and issues the redirect through the
/// supplied collaborators, in that order.
///
/// # Examples
///
/// ```
/// use route_guard::{Access, Chrome, Role, RouteTable, Router, Session};
///
/// let table = RouteTable::builder()
///     .route("/login", Access::Public, "login", Chrome::Bare)
///     .route("/reports", Access::any_of(&[Role::Admin]), "reports", Chrome::Layout)
///     .build()
///     .unwrap();
/// let router = Router::new(table);
///
/// let admin = Session::new("t1", [Role::Admin]);
/// assert_eq!(router.decide("/reports", &admin).page(), Some(&"reports"));
///
/// let decision = router.decide("/reports", &Session::anonymous());
/// assert_eq!(decision.redirect_target(), Some("/login"));
/// assert_eq!(decision.notice().unwrap().title, "Session Expired");
/// ```
#[derive(Debug)]
pub struct Router<P> {
    table: RouteTable<P>,
    gate: SessionGate,
    config: GuardConfig,
    trail: Option<AccessTrail>,
    seq: Cell<u64>,
}

impl<P> Router<P> {
    /// Creates a router with the default configuration.
    pub fn new(table: RouteTable<P>) -> Self {
        Self::with_config(table, GuardConfig::default())
    }

    /// Creates a router using `config` for redirect targets, notice timing
    /// and storage keys.
    ///
    /// The table's resolution policy and case sensitivity are fixed when it
    /// is built; the matching `config` fields only matter to whoever builds
    /// the table.
    pub fn with_config(table: RouteTable<P>, config: GuardConfig) -> Self {
        let gate = SessionGate::new().with_notice_dismiss(config.notice_dismiss());
        Self {
            table,
            gate,
            config,
            trail: None,
            seq: Cell::new(0),
        }
    }

    /// Records every navigation in `trail`.
    pub fn with_trail(mut self, trail: AccessTrail) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Returns the attached access trail.
    pub fn trail(&self) -> Option<&AccessTrail> {
        self.trail.as_ref()
    }

    /// Returns the route table.
    pub fn table(&self) -> &RouteTable<P> {
        &self.table
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Reads the session from `storage` under the configured keys.
    pub fn stored_session<'s, S>(&self, storage: &'s S) -> StoredSession<'s, S>
    where
        S: Storage + ?Sized,
    {
        StoredSession::new(storage)
            .with_keys(self.config.token_key.as_str(), self.config.roles_key.as_str())
    }

    /// Decides what `location` shows for `session`.
    ///
    /// Public routes skip the gate. Unmatched paths redirect to the fallback
    /// without a notice.
    pub fn decide(&self, location: &str, session: &Session) -> Decision<'_, P> {
        let Some(resolved) = self.table.resolve(location) else {
            return Decision::Redirect {
                to: self.config.fallback_path.as_str(),
                replace: true,
                notice: None,
                reason: RedirectReason::NotFound,
            };
        };

        let entry = resolved.entry;
        let verdict = match entry.access.required_roles() {
            None => Verdict::Allowed,
            Some(required) => self.gate.evaluate(session, &required),
        };

        let (to, reason) = match verdict {
            Verdict::Allowed => {
                return Decision::Render {
                    page: &entry.page,
                    chrome: entry.chrome,
                    params: resolved.params,
                    pattern: entry.pattern.as_str(),
                };
            }
            Verdict::RedirectUnauthenticated => {
                (self.config.login_path.as_str(), RedirectReason::Unauthenticated)
            }
            Verdict::RedirectForbidden => {
                (self.config.unauthorized_path.as_str(), RedirectReason::Forbidden)
            }
        };

        Decision::Redirect {
            to,
            replace: true,
            notice: self.gate.notice_for(verdict),
            reason,
        }
    }

    /// Handles a navigation attempt end to end.
    ///
    /// Loads the session from `source` and decides. On a redirect, the
    /// notice goes to `notifier` first, then `navigator` receives the
    /// replacing redirect. Returns the decision so the caller can render.
    pub fn navigate(
        &self,
        location: &str,
        source: &dyn SessionSource,
        navigator: &dyn Navigator,
        notifier: &dyn Notifier,
    ) -> Decision<'_, P> {
        let nav = self.seq.get() + 1;
        self.seq.set(nav);

        let requested = Location::parse(location);
        let log = NavigationLog::new(nav, requested.path());

        let session = Session::load(source);
        let decision = self.decide(location, &session);

        let event = match &decision {
            Decision::Render { chrome, pattern, .. } => {
                log.debug(format_args!("allowed by {} ({})", pattern, chrome));
                AccessEvent::new(nav, requested.path(), AccessOutcome::Allowed)
                    .with_pattern(*pattern)
            }
            Decision::Redirect {
                to,
                replace,
                notice,
                reason,
            } => {
                match reason {
                    RedirectReason::NotFound => {
                        log.debug(format_args!("no route matched, falling back to {}", to))
                    }
                    _ => log.info(format_args!("{}, redirecting to {}", reason, to)),
                }
                if let Some(notice) = notice {
                    notifier.notify(notice);
                }
                navigator.redirect(to, RedirectOptions { replace: *replace });
                AccessEvent::new(nav, requested.path(), (*reason).into()).with_target(*to)
            }
        };

        if let Some(trail) = &self.trail {
            trail.record(event.with_roles(session.roles));
        }

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::History;
    use crate::notice::{NoticeLog, Severity};
    use crate::policy::Access;
    use crate::role::{Role, RoleSet};
    use crate::session::MemoryStorage;
    use std::time::Duration;

    fn table() -> RouteTable<&'static str> {
        RouteTable::builder()
            .route("/login", Access::Public, "login", Chrome::Bare)
            .route("/profile", Access::Authenticated, "profile", Chrome::Layout)
            .route("/settings", Access::any_of(&[Role::Admin]), "settings", Chrome::Layout)
            .route("/sales/:saleId", Access::any_of(&[Role::Cashier]), "sale", Chrome::Bare)
            .build()
            .unwrap()
    }

    fn storage(token: Option<&str>, roles: &str) -> MemoryStorage {
        let storage = MemoryStorage::new();
        if let Some(token) = token {
            storage.set_item("token", token);
        }
        storage.set_item("roles", roles);
        storage
    }

    #[test]
    fn public_route_renders_without_a_session() {
        let router = Router::new(table());
        let decision = router.decide("/login", &Session::anonymous());
        assert_eq!(decision.page(), Some(&"login"));
        assert!(decision.notice().is_none());
    }

    #[test]
    fn authenticated_route_only_needs_a_token() {
        let router = Router::new(table());
        let decision = router.decide("/profile", &Session::new("t", RoleSet::new()));
        assert_eq!(decision.page(), Some(&"profile"));

        let decision = router.decide("/profile", &Session::anonymous());
        assert_eq!(decision.reason(), Some(RedirectReason::Unauthenticated));
    }

    #[test]
    fn forbidden_redirect_carries_access_denied() {
        let router = Router::new(table());
        let decision = router.decide("/settings", &Session::new("t2", [Role::Cashier]));

        match decision {
            Decision::Redirect {
                to,
                replace,
                notice,
                reason,
            } => {
                assert_eq!(to, "/unauthorized");
                assert!(replace);
                assert_eq!(reason, RedirectReason::Forbidden);
                let notice = notice.unwrap();
                assert_eq!(notice.severity, Severity::Error);
                assert_eq!(notice.auto_dismiss, Duration::from_millis(2000));
            }
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn render_exposes_params_and_pattern() {
        let router = Router::new(table());
        match router.decide("/sales/42?tab=items", &Session::new("t4", [Role::Cashier])) {
            Decision::Render {
                page,
                chrome,
                params,
                pattern,
            } => {
                assert_eq!(*page, "sale");
                assert_eq!(chrome, Chrome::Bare);
                assert_eq!(params.get("saleId"), Some("42"));
                assert_eq!(pattern, "/sales/:saleId");
            }
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_path_falls_back_without_notice() {
        let router = Router::new(table());
        let decision = router.decide("/nowhere", &Session::new("t", [Role::Admin]));
        assert_eq!(decision.redirect_target(), Some("/"));
        assert_eq!(decision.reason(), Some(RedirectReason::NotFound));
        assert!(decision.notice().is_none());
    }

    #[test]
    fn configured_targets_and_dismiss_are_used() {
        let config = GuardConfig {
            login_path: "/signin".to_string(),
            fallback_path: "/home".to_string(),
            notice_dismiss_ms: 500,
            ..GuardConfig::default()
        };
        let router = Router::with_config(table(), config);

        let decision = router.decide("/settings", &Session::anonymous());
        assert_eq!(decision.redirect_target(), Some("/signin"));
        assert_eq!(decision.notice().unwrap().auto_dismiss, Duration::from_millis(500));

        assert_eq!(router.decide("/x", &Session::anonymous()).redirect_target(), Some("/home"));
    }

    #[test]
    fn navigate_notifies_then_redirects() {
        let router = Router::new(table());
        let history = History::starting_at("/settings");
        let notices = NoticeLog::new();
        let storage = storage(None, "[]");

        router.navigate("/settings", &router.stored_session(&storage), &history, &notices);

        assert_eq!(notices.last().unwrap().title, "Session Expired");
        assert_eq!(history.current().as_deref(), Some("/login"));
        assert_eq!(history.redirects(), vec![("/login".to_string(), RedirectOptions::replace())]);
    }

    #[test]
    fn navigate_allowed_touches_nothing() {
        let router = Router::new(table());
        let history = History::starting_at("/settings");
        let notices = NoticeLog::new();
        let storage = storage(Some("t1"), r#"["ROLE_ADMIN"]"#);

        let session = router.stored_session(&storage);
        let decision = router.navigate("/settings", &session, &history, &notices);

        assert_eq!(decision.page(), Some(&"settings"));
        assert!(notices.is_empty());
        assert!(history.redirects().is_empty());
    }

    #[test]
    fn navigate_records_events_in_order() {
        let router = Router::new(table()).with_trail(AccessTrail::new());
        let history = History::new();
        let notices = NoticeLog::new();
        let storage = storage(Some("t2"), r#"["ROLE_CASHIER"]"#);
        let source = router.stored_session(&storage);

        router.navigate("/sales/7", &source, &history, &notices);
        router.navigate("/settings", &source, &history, &notices);
        router.navigate("/missing/", &source, &history, &notices);

        let events = router.trail().unwrap().events();
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].nav(), 1);
        assert_eq!(events[0].outcome(), AccessOutcome::Allowed);
        assert_eq!(events[0].pattern(), Some("/sales/:saleId"));
        assert!(events[0].roles().contains(Role::Cashier));

        assert_eq!(events[1].outcome(), AccessOutcome::Forbidden);
        assert_eq!(events[1].target(), Some("/unauthorized"));

        assert_eq!(events[2].nav(), 3);
        assert_eq!(events[2].path(), "/missing");
        assert_eq!(events[2].outcome(), AccessOutcome::NotFound);
    }

    #[test]
    fn custom_storage_keys_are_honoured() {
        let config = GuardConfig {
            token_key: "auth.token".to_string(),
            roles_key: "auth.roles".to_string(),
            ..GuardConfig::default()
        };
        let router = Router::with_config(table(), config);
        let storage = MemoryStorage::new();
        storage.set_item("auth.token", "t1");
        storage.set_item("auth.roles", r#"["ROLE_ADMIN"]"#);

        let session = Session::load(&router.stored_session(&storage));
        assert!(session.is_authenticated());
        assert_eq!(router.decide("/settings", &session).page(), Some(&"settings"));
    }

    #[test]
    fn reason_maps_to_outcome() {
        assert_eq!(AccessOutcome::from(RedirectReason::NotFound), AccessOutcome::NotFound);
        assert_eq!(RedirectReason::NotFound.to_string(), "not found");
    }
}
