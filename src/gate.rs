use std::fmt;
use std::time::Duration;

use crate::notice::{Notice, DEFAULT_DISMISS};
use crate::role::RoleSet;
use crate::session::Session;

/// Outcome of checking a session against a route's required roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The page may be rendered
    Allowed,
    /// No token: send the user to the login screen
    RedirectUnauthenticated,
    /// Token present but no overlapping role: send to the unauthorized notice
    RedirectForbidden,
}

impl Verdict {
    /// Returns true for [`Verdict::Allowed`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Allowed => write!(f, "allowed"),
            Verdict::RedirectUnauthenticated => write!(f, "unauthenticated"),
            Verdict::RedirectForbidden => write!(f, "forbidden"),
        }
    }
}

/// The session check run before every restricted route.
///
/// `evaluate` is a pure function of the session and the required roles. It
/// performs no I/O and has no failure mode: missing data is itself the
/// denial signal. The notice that accompanies a denial is produced
/// separately by [`SessionGate::notice_for`], so the decision can be tested
/// without any UI.
///
/// # Examples
///
/// ```
/// use route_guard::{Role, RoleSet, Session, SessionGate, Verdict};
///
/// let gate = SessionGate::new();
/// let admin_only = RoleSet::from([Role::Admin, Role::SuperAdmin]);
///
/// let cashier = Session::new("t2", [Role::Cashier]);
/// assert_eq!(gate.evaluate(&cashier, &admin_only), Verdict::RedirectForbidden);
///
/// let nobody = Session::anonymous();
/// assert_eq!(gate.evaluate(&nobody, &admin_only), Verdict::RedirectUnauthenticated);
///
/// let admin = Session::new("t1", [Role::Admin]);
/// assert_eq!(gate.evaluate(&admin, &admin_only), Verdict::Allowed);
/// ```
#[derive(Debug, Clone)]
pub struct SessionGate {
    notice_dismiss: Duration,
}

impl SessionGate {
    /// Creates a gate whose notices dismiss after two seconds.
    pub fn new() -> Self {
        Self {
            notice_dismiss: DEFAULT_DISMISS,
        }
    }

    /// Sets how long denial notices stay visible.
    pub fn with_notice_dismiss(mut self, notice_dismiss: Duration) -> Self {
        self.notice_dismiss = notice_dismiss;
        self
    }

    /// Classifies a navigation attempt.
    ///
    /// An empty `required` set only checks for a token.
    pub fn evaluate(&self, session: &Session, required: &RoleSet) -> Verdict {
        if session.token.is_none() {
            return Verdict::RedirectUnauthenticated;
        }

        if !required.is_empty() && !session.roles.intersects(required) {
            return Verdict::RedirectForbidden;
        }

        Verdict::Allowed
    }

    /// Returns the notice to show before acting on `verdict`, if any.
    pub fn notice_for(&self, verdict: Verdict) -> Option<Notice> {
        let notice = match verdict {
            Verdict::Allowed => return None,
            Verdict::RedirectUnauthenticated => Notice::session_expired(),
            Verdict::RedirectForbidden => Notice::access_denied(),
        };
        Some(notice.with_auto_dismiss(self.notice_dismiss))
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}
