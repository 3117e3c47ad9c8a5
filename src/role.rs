//! Role identifiers and role sets.
//!
//! Roles form a closed enumeration. The stored session carries them as the
//! strings `ROLE_ADMIN`, `ROLE_SUPERADMIN`, `ROLE_SUPERVISOR` and
//! `ROLE_CASHIER`; anything else is not a role.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A coarse permission tier assigned to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Shop administrator
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    /// Administrator across all shops
    #[serde(rename = "ROLE_SUPERADMIN")]
    SuperAdmin,
    /// Floor supervisor (stock, purchase orders, expenses)
    #[serde(rename = "ROLE_SUPERVISOR")]
    Supervisor,
    /// Till operator
    #[serde(rename = "ROLE_CASHIER")]
    Cashier,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::SuperAdmin, Role::Supervisor, Role::Cashier];

    /// Returns the stored string form of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::SuperAdmin => "ROLE_SUPERADMIN",
            Role::Supervisor => "ROLE_SUPERVISOR",
            Role::Cashier => "ROLE_CASHIER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Matching is exact: `role_admin` is not `ROLE_ADMIN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// An ordered set of roles.
///
/// Used both for the roles a session holds and for the roles a route admits.
///
/// # Examples
///
/// ```
/// use route_guard::{Role, RoleSet};
///
/// let route = RoleSet::from([Role::Admin, Role::SuperAdmin]);
/// let session = RoleSet::from([Role::Cashier, Role::Admin]);
///
/// assert!(route.intersects(&session));
/// assert!(!route.intersects(&RoleSet::from([Role::Cashier])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Creates an empty role set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a role. Returns `false` if it was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    /// Returns true if the set holds `role`.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Returns true if the two sets share at least one role.
    pub fn intersects(&self, other: &RoleSet) -> bool {
        self.0.iter().any(|r| other.0.contains(r))
    }

    /// Returns the union of both sets.
    pub fn union(&self, other: &RoleSet) -> RoleSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    /// Returns true if the set holds no roles.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of roles in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the roles in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        Self(roles.into_iter().collect())
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        Self(roles.iter().copied().collect())
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        f.write_str("]")
    }
}
