//! Parsing of requested locations.
//!
//! Only the path takes part in route matching. The query string and the
//! fragment are split off and kept for the caller; repeated and trailing
//! slashes are dropped so `/shops/`, `//shops` and `/shops?tab=2` all
//! resolve like `/shops`.

use std::fmt;

/// A requested location, split into its parts.
///
/// # Examples
///
/// ```
/// use route_guard::Location;
///
/// let loc = Location::parse("/sales//42/?print=1#top");
///
/// assert_eq!(loc.path(), "/sales/42");
/// assert_eq!(loc.segments(), ["sales", "42"]);
/// assert_eq!(loc.query(), Some("print=1"));
/// assert_eq!(loc.fragment(), Some("top"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Location {
    /// Parses a raw location. Never fails; an empty input is the root path.
    pub fn parse(raw: &str) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, frag)) => (rest, Some(frag.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, q)) => (path, Some(q.to_string())),
            None => (rest, None),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let path = format!("/{}", segments.join("/"));

        Self {
            path,
            query: query.filter(|q| !q.is_empty()),
            fragment: fragment.filter(|f| !f.is_empty()),
        }
    }

    /// The normalized path, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The non-empty path segments.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// The query string without its leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The fragment without its leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(q) = &self.query {
            write!(f, "?{}", q)?;
        }
        if let Some(frag) = &self.fragment {
            write!(f, "#{}", frag)?;
        }
        Ok(())
    }
}
