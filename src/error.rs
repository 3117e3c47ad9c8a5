use std::fmt;

/// Errors raised while building a route table or loading configuration.
///
/// Navigation itself never fails; denials are verdicts, not errors.
#[derive(Debug)]
pub enum Error {
    /// The route table or configuration is inconsistent
    Config(ConfigError),
    /// Configuration text is not valid JSON for [`GuardConfig`](crate::GuardConfig)
    Parse(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Parse(e) => write!(f, "Configuration parse error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Parse(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e)
    }
}

/// A configuration problem tied to one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The kind of problem
    pub kind: ConfigErrorKind,
    /// The route pattern or redirect target involved
    pub path: String,
    /// Human-readable detail
    pub message: String,
}

impl ConfigError {
    /// Creates a new configuration error.
    pub fn new(kind: ConfigErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}': {}", self.kind, self.path, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// The kind of configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A route pattern could not be parsed
    InvalidPattern,
    /// A role-restricted route admits no role at all
    EmptyRoleSet,
    /// The same path renders different pages
    ConflictingPages,
    /// The same path is wrapped in different chrome
    ConflictingChrome,
    /// The same path is both public and restricted
    ConflictingAccess,
    /// A redirect target is not an absolute path
    InvalidRedirectPath,
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErrorKind::InvalidPattern => write!(f, "invalid route pattern"),
            ConfigErrorKind::EmptyRoleSet => write!(f, "empty role set"),
            ConfigErrorKind::ConflictingPages => write!(f, "conflicting pages"),
            ConfigErrorKind::ConflictingChrome => write!(f, "conflicting chrome"),
            ConfigErrorKind::ConflictingAccess => write!(f, "conflicting access"),
            ConfigErrorKind::InvalidRedirectPath => write!(f, "invalid redirect path"),
        }
    }
}
