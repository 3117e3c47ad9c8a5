//! Session state as seen by the router.
//!
//! The login flow persists two values on the client: an opaque token and a
//! JSON-encoded list of role strings. This module reads them through the
//! [`SessionSource`] seam and turns them into a [`Session`]. Nothing here
//! fails: malformed role data degrades to an empty role set, which already
//! yields a "forbidden" outcome on every restricted route.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::role::{Role, RoleSet};
use crate::token::SessionToken;

/// Default storage key holding the session token.
pub const TOKEN_KEY: &str = "token";
/// Default storage key holding the JSON array of role strings.
pub const ROLES_KEY: &str = "roles";

/// The session a navigation attempt is evaluated against.
///
/// Populated externally by the login flow; read-only here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Opaque token, if the user is logged in
    pub token: Option<SessionToken>,
    /// Roles granted to the session
    pub roles: RoleSet,
}

impl Session {
    /// A session with no token and no roles.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in session holding `roles`.
    pub fn new(token: impl Into<String>, roles: impl Into<RoleSet>) -> Self {
        Self {
            token: Some(SessionToken::new(token)),
            roles: roles.into(),
        }
    }

    /// Reads a session from `source`.
    ///
    /// An empty token string counts as no token. Role strings that do not
    /// name a known [`Role`] are skipped.
    pub fn load(source: &dyn SessionSource) -> Self {
        let token = SessionToken::from_stored(source.token());

        let roles = source
            .roles()
            .iter()
            .filter_map(|raw| match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    tracing::debug!(role = %raw, "ignoring stored role: {}", err);
                    None
                }
            })
            .collect();

        Self { token, roles }
    }

    /// Returns true if a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Synchronous read access to the persisted session values.
///
/// # Examples
///
/// ```
/// use route_guard::{Session, SessionSource, Role};
///
/// struct Fixed;
///
/// impl SessionSource for Fixed {
///     fn token(&self) -> Option<String> {
///         Some("t1".to_string())
///     }
///
///     fn roles(&self) -> Vec<String> {
///         vec!["ROLE_CASHIER".to_string(), "ROLE_JANITOR".to_string()]
///     }
/// }
///
/// let session = Session::load(&Fixed);
/// assert!(session.is_authenticated());
/// assert!(session.roles.contains(Role::Cashier));
/// assert_eq!(session.roles.len(), 1);
/// ```
pub trait SessionSource {
    /// Returns the stored token, if any.
    fn token(&self) -> Option<String>;

    /// Returns the stored role strings. Never fails; unreadable data is empty.
    fn roles(&self) -> Vec<String>;
}

/// Key/value client storage, shaped like the browser's `localStorage`.
pub trait Storage {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;
}

/// In-memory [`Storage`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: impl Into<String>, value: impl Into<String>) {
        self.items.borrow_mut().insert(key.into(), value.into());
    }

    /// Removes the value stored under `key`.
    pub fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }

    /// Removes every stored value.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

/// A [`SessionSource`] reading the token and the JSON role list from a [`Storage`].
///
/// # Examples
///
/// ```
/// use route_guard::{MemoryStorage, Role, Session, StoredSession};
///
/// let storage = MemoryStorage::new();
/// storage.set_item("token", "t1");
/// storage.set_item("roles", r#"["ROLE_SUPERVISOR"]"#);
///
/// let session = Session::load(&StoredSession::new(&storage));
/// assert!(session.roles.contains(Role::Supervisor));
///
/// // Garbage degrades to no roles
/// storage.set_item("roles", "{not json");
/// let session = Session::load(&StoredSession::new(&storage));
/// assert!(session.roles.is_empty());
/// ```
#[derive(Debug)]
pub struct StoredSession<'a, S: Storage + ?Sized> {
    storage: &'a S,
    token_key: String,
    roles_key: String,
}

impl<'a, S: Storage + ?Sized> StoredSession<'a, S> {
    /// Reads from `storage` under the default `token` and `roles` keys.
    pub fn new(storage: &'a S) -> Self {
        Self {
            storage,
            token_key: TOKEN_KEY.to_string(),
            roles_key: ROLES_KEY.to_string(),
        }
    }

    /// Overrides the storage keys.
    pub fn with_keys(mut self, token_key: impl Into<String>, roles_key: impl Into<String>) -> Self {
        self.token_key = token_key.into();
        self.roles_key = roles_key.into();
        self
    }
}

impl<S: Storage + ?Sized> SessionSource for StoredSession<'_, S> {
    fn token(&self) -> Option<String> {
        self.storage.get_item(&self.token_key)
    }

    fn roles(&self) -> Vec<String> {
        parse_role_list(self.storage.get_item(&self.roles_key).as_deref())
    }
}

/// Decodes a stored role list.
///
/// A missing value is an empty list. Non-JSON input and JSON that is not an
/// array also yield an empty list; non-string elements are dropped.
///
/// ```
/// use route_guard::session::parse_role_list;
///
/// assert_eq!(parse_role_list(Some(r#"["ROLE_ADMIN", 7]"#)), vec!["ROLE_ADMIN"]);
/// assert!(parse_role_list(Some("\"ROLE_ADMIN\"")).is_empty());
/// assert!(parse_role_list(None).is_empty());
/// ```
pub fn parse_role_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                other => {
                    tracing::debug!(element = %other, "ignoring non-string role entry");
                    None
                }
            })
            .collect(),
        Ok(other) => {
            tracing::warn!(
                kind = json_kind(&other),
                "stored roles are not an array, treating as empty"
            );
            Vec::new()
        }
        Err(err) => {
            tracing::warn!(error = %err, "stored roles are not valid JSON, treating as empty");
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
