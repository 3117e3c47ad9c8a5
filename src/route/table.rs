use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigErrorKind};
use crate::location::Location;
use crate::policy::Access;

use super::pattern::{Params, PathPattern};

/// Layout wrapper applied around a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    /// The shared navigation and header layout
    Layout,
    /// No wrapper
    Bare,
}

impl fmt::Display for Chrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chrome::Layout => write!(f, "layout"),
            Chrome::Bare => write!(f, "bare"),
        }
    }
}

/// How the table treats a path declared more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Keep every declaration; the first one declared shadows the rest
    #[default]
    FirstMatch,
    /// Collapse same-path declarations into one entry, unioning their access
    Merge,
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionPolicy::FirstMatch => write!(f, "first_match"),
            ResolutionPolicy::Merge => write!(f, "merge"),
        }
    }
}

/// One declared route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<P> {
    /// The path pattern
    pub pattern: PathPattern,
    /// Who may view the page
    pub access: Access,
    /// The opaque page to render
    pub page: P,
    /// The wrapper around the page
    pub chrome: Chrome,
    /// Position in declaration order
    pub index: usize,
}

/// A successful lookup: the chosen entry and the captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a, P> {
    /// The entry that won
    pub entry: &'a RouteEntry<P>,
    /// Parameters captured from the path
    pub params: Params,
}

/// Immutable, ordered path-to-page mapping.
///
/// Built once through [`RouteTable::builder`]. Lookups pick the most
/// specific matching pattern (literal segments outrank parameters) and
/// break ties by declaration order.
///
/// # Examples
///
/// ```
/// use route_guard::{Access, Chrome, Role, RouteTable};
///
/// let table = RouteTable::builder()
///     .route("/login", Access::Public, "login", Chrome::Bare)
///     .route("/sales/:saleId", Access::any_of(&[Role::Cashier]), "sale", Chrome::Bare)
///     .route("/sales/history", Access::any_of(&[Role::Cashier]), "history", Chrome::Layout)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.resolve("/sales/history").unwrap().entry.page, "history");
///
/// let sale = table.resolve("/sales/42").unwrap();
/// assert_eq!(sale.entry.page, "sale");
/// assert_eq!(sale.params.get("saleId"), Some("42"));
///
/// assert!(table.resolve("/nowhere").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<P> {
    entries: Vec<RouteEntry<P>>,
    policy: ResolutionPolicy,
    case_sensitive: bool,
}

impl<P> RouteTable<P> {
    /// Starts declaring a table.
    pub fn builder() -> RouteTableBuilder<P> {
        RouteTableBuilder::new()
    }

    /// Resolves a requested path to a single entry.
    ///
    /// The path is normalized first (query, fragment, repeated and trailing
    /// slashes are ignored). Returns `None` when nothing matches.
    pub fn resolve(&self, path: &str) -> Option<Resolved<'_, P>> {
        let location = Location::parse(path);
        let segments = location.segments();

        let mut best: Option<(u32, Resolved<'_, P>)> = None;
        for entry in &self.entries {
            let Some(params) = entry.pattern.matches(&segments, self.case_sensitive) else {
                continue;
            };
            let score = entry.pattern.score();
            // Strictly greater: on a tie the earlier declaration stays.
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, Resolved { entry, params }));
            }
        }

        best.map(|(_, resolved)| resolved)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[RouteEntry<P>] {
        &self.entries
    }

    /// Entries that can never be resolved because an earlier declaration
    /// has the same path. Always empty under [`ResolutionPolicy::Merge`].
    pub fn shadowed(&self) -> Vec<&RouteEntry<P>> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| !seen.insert(e.pattern.shape(self.case_sensitive)))
            .collect()
    }

    /// The duplicate policy the table was built with.
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Whether literal segments compare case-sensitively.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Declaration<P> {
    path: String,
    access: Access,
    page: P,
    chrome: Chrome,
}

/// Collects route declarations and validates them into a [`RouteTable`].
pub struct RouteTableBuilder<P> {
    declarations: Vec<Declaration<P>>,
    policy: ResolutionPolicy,
    case_sensitive: bool,
}

impl<P> RouteTableBuilder<P> {
    /// Creates an empty builder using [`ResolutionPolicy::FirstMatch`].
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
            policy: ResolutionPolicy::FirstMatch,
            case_sensitive: false,
        }
    }

    /// Sets the duplicate policy.
    pub fn policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets whether literal segments compare case-sensitively.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Declares a route. Order matters for tie-breaking.
    pub fn route(
        mut self,
        path: impl Into<String>,
        access: Access,
        page: P,
        chrome: Chrome,
    ) -> Self {
        self.declarations.push(Declaration {
            path: path.into(),
            access,
            page,
            chrome,
        });
        self
    }
}

impl<P: PartialEq> RouteTableBuilder<P> {
    /// Validates the declarations and builds the table.
    ///
    /// # Errors
    ///
    /// - `InvalidPattern` if a path does not parse.
    /// - `EmptyRoleSet` if an `Access::AnyOf` admits no role.
    /// - Under [`ResolutionPolicy::Merge`]: `ConflictingPages`,
    ///   `ConflictingChrome` or `ConflictingAccess` when two declarations of
    ///   the same path disagree.
    pub fn build(self) -> Result<RouteTable<P>, ConfigError> {
        let mut entries: Vec<RouteEntry<P>> = Vec::with_capacity(self.declarations.len());
        let mut by_shape: HashMap<String, usize> = HashMap::new();

        for (index, decl) in self.declarations.into_iter().enumerate() {
            let pattern = PathPattern::parse(&decl.path)?;

            if matches!(&decl.access, Access::AnyOf(roles) if roles.is_empty()) {
                return Err(ConfigError::new(
                    ConfigErrorKind::EmptyRoleSet,
                    &decl.path,
                    "restricted route admits no role",
                ));
            }

            let shape = pattern.shape(self.case_sensitive);
            let existing = match by_shape.get(&shape).copied() {
                Some(existing) => existing,
                None => {
                    by_shape.insert(shape, entries.len());
                    entries.push(RouteEntry {
                        pattern,
                        access: decl.access,
                        page: decl.page,
                        chrome: decl.chrome,
                        index,
                    });
                    continue;
                }
            };

            match self.policy {
                ResolutionPolicy::FirstMatch => {
                    tracing::warn!(
                        path = %decl.path,
                        shadowed_by = %entries[existing].pattern,
                        "duplicate route declaration is unreachable"
                    );
                    entries.push(RouteEntry {
                        pattern,
                        access: decl.access,
                        page: decl.page,
                        chrome: decl.chrome,
                        index,
                    });
                }
                ResolutionPolicy::Merge => {
                    let target = &mut entries[existing];
                    merge_into(target, decl)?;
                    tracing::debug!(
                        path = %target.pattern,
                        access = %target.access,
                        "merged duplicate route"
                    );
                }
            }
        }

        Ok(RouteTable {
            entries,
            policy: self.policy,
            case_sensitive: self.case_sensitive,
        })
    }
}

impl<P> Default for RouteTableBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn merge_into<P: PartialEq>(
    target: &mut RouteEntry<P>,
    decl: Declaration<P>,
) -> Result<(), ConfigError> {
    if target.page != decl.page {
        return Err(ConfigError::new(
            ConfigErrorKind::ConflictingPages,
            &decl.path,
            format!("already declared at '{}' with a different page", target.pattern),
        ));
    }
    if target.chrome != decl.chrome {
        return Err(ConfigError::new(
            ConfigErrorKind::ConflictingChrome,
            &decl.path,
            format!("declared with {} chrome, previously {}", decl.chrome, target.chrome),
        ));
    }
    target.access = target.access.union(&decl.access).ok_or_else(|| {
        ConfigError::new(
            ConfigErrorKind::ConflictingAccess,
            &decl.path,
            format!("cannot combine {} with {}", target.access, decl.access),
        )
    })?;
    Ok(())
}
