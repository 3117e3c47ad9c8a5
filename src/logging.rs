use std::fmt;

/// Structured logger scoped to one navigation attempt.
///
/// Every event carries the navigation sequence number (`nav`) and the
/// requested path, so the log of one attempt can be followed through the
/// resolution, the gate and the redirect.
///
/// Session tokens are redacted by their `Debug` and `Display`
/// implementations, so passing a [`Session`](crate::Session) to a format
/// string never leaks one.
#[derive(Debug, Clone, Copy)]
pub struct NavigationLog<'a> {
    nav: u64,
    path: &'a str,
}

impl<'a> NavigationLog<'a> {
    /// Creates a logger for navigation number `nav` to `path`.
    ///
    /// ```
    /// use route_guard::NavigationLog;
    ///
    /// let log = NavigationLog::new(4, "/reports");
    /// log.info(format_args!("redirecting to {}", "/login"));
    /// assert_eq!(log.nav(), 4);
    /// ```
    pub fn new(nav: u64, path: &'a str) -> Self {
        Self { nav, path }
    }

    /// Returns the navigation sequence number.
    pub fn nav(&self) -> u64 {
        self.nav
    }

    /// Returns the requested path.
    pub fn path(&self) -> &str {
        self.path
    }

    /// Logs an info-level message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(nav = self.nav, path = %self.path, "{}", args);
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(nav = self.nav, path = %self.path, "{}", args);
    }
}
