//! Access event schema.

use std::fmt;

use crate::role::RoleSet;

/// How a navigation attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The page was rendered
    Allowed,
    /// Redirected to the login screen
    Unauthenticated,
    /// Redirected to the unauthorized notice
    Forbidden,
    /// No route matched; redirected to the fallback
    NotFound,
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOutcome::Allowed => write!(f, "allowed"),
            AccessOutcome::Unauthenticated => write!(f, "unauthenticated"),
            AccessOutcome::Forbidden => write!(f, "forbidden"),
            AccessOutcome::NotFound => write!(f, "not_found"),
        }
    }
}

/// A recorded navigation attempt.
///
/// # Example
///
/// ```
/// use route_guard::audit::{AccessEvent, AccessOutcome};
/// use route_guard::{Role, RoleSet};
///
/// let event = AccessEvent::new(3, "/settings", AccessOutcome::Forbidden)
///     .with_roles(RoleSet::from([Role::Cashier]))
///     .with_pattern("/settings")
///     .with_target("/unauthorized");
///
/// assert_eq!(event.nav(), 3);
/// assert_eq!(event.target(), Some("/unauthorized"));
/// assert_eq!(
///     event.to_string(),
///     "AccessEvent[nav=3, outcome=forbidden, path=/settings, roles=[ROLE_CASHIER], \
///      pattern=/settings, target=/unauthorized]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    nav: u64,
    path: String,
    outcome: AccessOutcome,
    roles: RoleSet,
    pattern: Option<String>,
    target: Option<String>,
}

impl AccessEvent {
    /// Creates an event for navigation number `nav` to `path`.
    pub fn new(nav: u64, path: impl Into<String>, outcome: AccessOutcome) -> Self {
        Self {
            nav,
            path: path.into(),
            outcome,
            roles: RoleSet::new(),
            pattern: None,
            target: None,
        }
    }

    /// Sets the roles the session held.
    pub fn with_roles(mut self, roles: RoleSet) -> Self {
        self.roles = roles;
        self
    }

    /// Sets the route pattern that matched.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the redirect target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Returns the navigation sequence number.
    pub fn nav(&self) -> u64 {
        self.nav
    }

    /// Returns the requested path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> AccessOutcome {
        self.outcome
    }

    /// Returns the roles the session held.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Returns the matched route pattern, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Returns the redirect target, if the attempt was redirected.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AccessEvent[nav={}, outcome={}, path={}, roles={}",
            self.nav, self.outcome, self.path, self.roles
        )?;
        if let Some(pattern) = &self.pattern {
            write!(f, ", pattern={}", pattern)?;
        }
        if let Some(target) = &self.target {
            write!(f, ", target={}", target)?;
        }
        write!(f, "]")
    }
}
