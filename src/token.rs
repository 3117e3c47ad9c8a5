use std::fmt;

/// The opaque session token written by the login flow.
///
/// The router only ever checks that a token is present. The value itself is
/// kept out of logs, notices and audit events: `Debug` and `Display` always
/// print `[REDACTED]`.
///
/// # Examples
///
/// ```
/// use route_guard::SessionToken;
///
/// let token = SessionToken::new("eyJhbGciOi...");
///
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.to_string(), "[REDACTED]");
/// assert_eq!(token.expose(), "eyJhbGciOi...");
/// ```
// Do NOT derive Debug or Serialize here; both would print the raw token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    inner: String,
}

impl SessionToken {
    /// Wraps a raw token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Wraps a stored token, treating the empty string as "no token".
    pub fn from_stored(value: Option<String>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(Self::new)
    }

    /// Returns the raw token. Never log the result.
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
