use std::fmt;

use crate::role::{Role, RoleSet};

/// The access rule attached to a route.
///
/// `Public` routes bypass the session check entirely. The other two run the
/// [`SessionGate`](crate::SessionGate): both need a token, and `AnyOf` also
/// needs one of its roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No session check (login screen, role redirect, unauthorized notice)
    Public,
    /// Any logged-in session
    Authenticated,
    /// A logged-in session holding at least one of these roles
    AnyOf(RoleSet),
}

impl Access {
    /// Builds an `AnyOf` rule from a list of roles.
    ///
    /// An empty list yields an `AnyOf` with an empty set, which the route
    /// table builder rejects.
    pub fn any_of(roles: &[Role]) -> Self {
        Access::AnyOf(RoleSet::from(roles))
    }

    /// Returns true for [`Access::Public`].
    pub fn is_public(&self) -> bool {
        matches!(self, Access::Public)
    }

    /// The role set handed to the gate. Empty means "token only".
    ///
    /// Returns `None` for public routes, which never reach the gate.
    pub fn required_roles(&self) -> Option<RoleSet> {
        match self {
            Access::Public => None,
            Access::Authenticated => Some(RoleSet::new()),
            Access::AnyOf(roles) => Some(roles.clone()),
        }
    }

    /// Widens this rule to also admit whatever `other` admits.
    ///
    /// Returns `None` when one side is public and the other is not; that
    /// combination has no sensible union.
    pub fn union(&self, other: &Access) -> Option<Access> {
        match (self, other) {
            (Access::Public, Access::Public) => Some(Access::Public),
            (Access::Public, _) | (_, Access::Public) => None,
            (Access::Authenticated, _) | (_, Access::Authenticated) => Some(Access::Authenticated),
            (Access::AnyOf(a), Access::AnyOf(b)) => Some(Access::AnyOf(a.union(b))),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => write!(f, "public"),
            Access::Authenticated => write!(f, "authenticated"),
            Access::AnyOf(roles) => write!(f, "any of {}", roles),
        }
    }
}
