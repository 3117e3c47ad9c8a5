//! Route path patterns.
//!
//! A pattern is a `/`-separated list of segments. A segment is either a
//! literal or a parameter written `:name`. Matching requires equal segment
//! counts and equal literals; parameters capture the request segment.

use std::fmt;

use crate::error::{ConfigError, ConfigErrorKind};

const LITERAL_SCORE: u32 = 10;
const PARAM_SCORE: u32 = 3;

/// One segment of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment
    Literal(String),
    /// Captures the request segment under this name
    Param(String),
}

/// A parsed route path such as `/sales/:saleId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a route path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigErrorKind::InvalidPattern` when the path is not
    /// absolute, contains an empty inner segment, uses a wildcard, has an
    /// unnamed or malformed parameter, or repeats a parameter name.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_guard::route::PathPattern;
    ///
    /// let pattern = PathPattern::parse("/sales/:saleId").unwrap();
    /// let params = pattern.matches(&["sales", "42"], false).unwrap();
    /// assert_eq!(params.get("saleId"), Some("42"));
    ///
    /// assert!(PathPattern::parse("sales").is_err());
    /// assert!(PathPattern::parse("/a/*").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid =
            |message: &str| ConfigError::new(ConfigErrorKind::InvalidPattern, raw, message);

        let Some(body) = raw.strip_prefix('/') else {
            return Err(invalid("pattern must start with '/'"));
        };
        let body = match body.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => body,
        };

        let mut segments = Vec::new();
        if !body.is_empty() {
            for part in body.split('/') {
                if part.is_empty() {
                    return Err(invalid("empty path segment"));
                }
                if part.contains('*') {
                    return Err(invalid("wildcard segments are not supported"));
                }
                if let Some(name) = part.strip_prefix(':') {
                    let well_formed = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                    if name.is_empty() || !well_formed {
                        return Err(invalid("parameter names must be non-empty [A-Za-z0-9_]"));
                    }
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(invalid("duplicate parameter name"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                } else {
                    segments.push(Segment::Literal(part.to_string()));
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Specificity used to rank several matching patterns. Higher wins.
    pub fn score(&self) -> u32 {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(_) => LITERAL_SCORE,
                Segment::Param(_) => PARAM_SCORE,
            })
            .sum()
    }

    /// A key equal for patterns that match exactly the same requests.
    ///
    /// Parameter names are erased, so `/sales/:id` and `/sales/:saleId`
    /// share a shape.
    pub fn shape(&self, case_sensitive: bool) -> String {
        let mut shape = String::new();
        for segment in &self.segments {
            shape.push('/');
            match segment {
                Segment::Literal(lit) if case_sensitive => shape.push_str(lit),
                Segment::Literal(lit) => shape.push_str(&lit.to_ascii_lowercase()),
                Segment::Param(_) => shape.push(':'),
            }
        }
        if shape.is_empty() {
            shape.push('/');
        }
        shape
    }

    /// Matches request segments, returning the captured parameters.
    ///
    /// Parameter values are percent-decoded; a segment that does not decode
    /// to UTF-8 is captured as-is.
    pub fn matches(&self, request: &[&str], case_sensitive: bool) -> Option<Params> {
        if request.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        for (segment, actual) in self.segments.iter().zip(request) {
            match segment {
                Segment::Literal(lit) => {
                    let equal = if case_sensitive {
                        lit == actual
                    } else {
                        lit.eq_ignore_ascii_case(actual)
                    };
                    if !equal {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = match urlencoding::decode(actual) {
                        Ok(decoded) => decoded.into_owned(),
                        Err(_) => (*actual).to_string(),
                    };
                    params.0.push((name.clone(), value));
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parameters captured while matching a pattern, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Returns the value captured under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of captured parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
