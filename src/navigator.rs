use std::cell::RefCell;

/// Options for a programmatic redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedirectOptions {
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
}

impl RedirectOptions {
    /// Options that replace the current history entry.
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// Output seam for redirects.
pub trait Navigator {
    /// Moves the client to `path`.
    fn redirect(&self, path: &str, options: RedirectOptions);
}

/// In-memory navigator modelling a browser history stack.
///
/// A replacing redirect overwrites the top entry; otherwise the path is
/// pushed.
///
/// # Examples
///
/// ```
/// use route_guard::{History, Navigator, RedirectOptions};
///
/// let history = History::starting_at("/reports");
/// history.redirect("/login", RedirectOptions::replace());
///
/// assert_eq!(history.current().as_deref(), Some("/login"));
/// assert_eq!(history.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct History {
    entries: RefCell<Vec<String>>,
    redirects: RefCell<Vec<(String, RedirectOptions)>>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history whose first entry is `path`.
    pub fn starting_at(path: impl Into<String>) -> Self {
        let history = Self::new();
        history.entries.borrow_mut().push(path.into());
        history
    }

    /// Returns the current location.
    pub fn current(&self) -> Option<String> {
        self.entries.borrow().last().cloned()
    }

    /// Returns every history entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Returns every redirect issued, in order.
    pub fn redirects(&self) -> Vec<(String, RedirectOptions)> {
        self.redirects.borrow().clone()
    }

    /// Returns the number of history entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Navigator for History {
    fn redirect(&self, path: &str, options: RedirectOptions) {
        let mut entries = self.entries.borrow_mut();
        if options.replace {
            entries.pop();
        }
        entries.push(path.to_string());
        self.redirects.borrow_mut().push((path.to_string(), options));
    }
}
