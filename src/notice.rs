//! Transient user notices shown before a redirect.
//!
//! Notices are fire-and-forget: they auto-dismiss, need no acknowledgement
//! and never hold up the redirect that follows them.

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

/// Default auto-dismiss interval.
pub const DEFAULT_DISMISS: Duration = Duration::from_millis(2000);

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational
    Info,
    /// Something the user should act on (e.g. log in again)
    Warning,
    /// A refused action
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A transient, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// How the notice is styled
    pub severity: Severity,
    /// Short heading
    pub title: String,
    /// Body text
    pub message: String,
    /// How long the notice stays visible
    pub auto_dismiss: Duration,
}

impl Notice {
    /// Shown when a restricted route is requested without a token.
    pub fn session_expired() -> Self {
        Self {
            severity: Severity::Warning,
            title: "Session Expired".to_string(),
            message: "Please log in again.".to_string(),
            auto_dismiss: DEFAULT_DISMISS,
        }
    }

    /// Shown when the session holds none of the route's roles.
    pub fn access_denied() -> Self {
        Self {
            severity: Severity::Error,
            title: "Access Denied".to_string(),
            message: "You do not have permission to access this section.".to_string(),
            auto_dismiss: DEFAULT_DISMISS,
        }
    }

    /// Replaces the auto-dismiss interval.
    pub fn with_auto_dismiss(mut self, auto_dismiss: Duration) -> Self {
        self.auto_dismiss = auto_dismiss;
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.title, self.message)
    }
}

/// Output seam for notices.
pub trait Notifier {
    /// Shows `notice`. Must not block.
    fn notify(&self, notice: &Notice);
}

/// Notifier that emits each notice as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        let dismiss_ms = u64::try_from(notice.auto_dismiss.as_millis()).unwrap_or(u64::MAX);
        let title = notice.title.as_str();
        match notice.severity {
            Severity::Info => tracing::info!(title, dismiss_ms, "{}", notice.message),
            Severity::Warning => tracing::warn!(title, dismiss_ms, "{}", notice.message),
            Severity::Error => tracing::error!(title, dismiss_ms, "{}", notice.message),
        }
    }
}

/// In-memory notifier that keeps every notice in order.
///
/// # Examples
///
/// ```
/// use route_guard::{Notice, NoticeLog, Notifier};
///
/// let log = NoticeLog::new();
/// log.notify(&Notice::access_denied());
///
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.last().unwrap().title, "Access Denied");
/// ```
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every notice shown so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Returns the most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    /// Returns the number of notices shown.
    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    /// Returns true if nothing has been shown.
    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }

    /// Forgets every notice.
    pub fn clear(&self) {
        self.notices.borrow_mut().clear();
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}
