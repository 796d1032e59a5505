//! # Route Table
//!
//! An ordered sequence of `(pattern, handler descriptor)` pairs.
//!
//! # Resolution
//!
//! 1. An empty path is treated as `/`.
//! 2. If the path equals a declared pattern string exactly, that route is
//!    selected with no captures and no pattern matching takes place. This
//!    holds even when an earlier pattern would also match.
//! 3. Otherwise patterns are tried in declaration order; the first one that
//!    matches the whole path wins.
//! 4. If nothing matches the result is `None`, which the dispatcher reports
//!    through the `404` hook.
//!
//! There is no specificity ranking: order is the only tie-breaker.
//!
//! # Sharing
//!
//! A built table is immutable and cheap to clone; clones share the compiled
//! patterns.

use crate::{error::RouteError, handler::HandlerDescriptor, pattern::Pattern};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: Pattern,
    handler: HandlerDescriptor,
}

impl Route {
    /// The route pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The handler descriptor as declared.
    pub fn handler(&self) -> &HandlerDescriptor {
        &self.handler
    }
}

/// The outcome of a successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched route.
    pub route: &'a Route,
    /// Path captures, left to right. Empty for exact-key matches.
    pub captures: Vec<String>,
    /// True when the path equalled the pattern string.
    pub exact: bool,
}

impl RouteMatch<'_> {
    /// The matched route's handler descriptor.
    pub fn handler(&self) -> &HandlerDescriptor {
        &self.route.handler
    }
}

struct Inner {
    routes: Vec<Route>,
    exact: HashMap<String, usize>,
}

/// An immutable, ordered route table.
#[derive(Clone)]
pub struct RouteTable {
    inner: Arc<Inner>,
}

impl RouteTable {
    /// Start declaring a table.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// A table with no routes. Every request resolves to `None`.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(Inner {
                routes: Vec::new(),
                exact: HashMap::new(),
            }),
        }
    }

    /// Find the route for `path`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = if path.is_empty() { "/" } else { path };

        if let Some(&index) = self.inner.exact.get(path) {
            return Some(RouteMatch {
                route: &self.inner.routes[index],
                captures: Vec::new(),
                exact: true,
            });
        }

        self.inner.routes.iter().find_map(|route| {
            route.pattern.captures(path).map(|captures| RouteMatch {
                route,
                captures,
                exact: false,
            })
        })
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.inner.routes.iter()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.inner.routes.len()
    }

    /// Returns true when no route is declared.
    pub fn is_empty(&self) -> bool {
        self.inner.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.inner
                    .routes
                    .iter()
                    .map(|r| (r.pattern.as_str(), r.handler.label())),
            )
            .finish()
    }
}

/// Builder for [`RouteTable`].
///
/// Declaration order is preserved; patterns are compiled in [`build`].
///
/// # Example
/// ```ignore
/// let routes = RouteTable::builder()
///     .route("/", "Home")
///     .route("/post/:alpha", "Post?layout=wide")
///     .build()?;
/// ```
///
/// [`build`]: RouteTableBuilder::build
#[derive(Default)]
pub struct RouteTableBuilder {
    entries: Vec<(String, HandlerDescriptor)>,
}

impl RouteTableBuilder {
    /// Declare a route.
    pub fn route(mut self, pattern: impl Into<String>, handler: impl Into<HandlerDescriptor>) -> Self {
        self.push(pattern, handler);
        self
    }

    /// Declare a route (mutable version).
    pub fn push(&mut self, pattern: impl Into<String>, handler: impl Into<HandlerDescriptor>) {
        self.entries.push((pattern.into(), handler.into()));
    }

    /// Number of declared routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile every pattern and freeze the table.
    pub fn build(self) -> Result<RouteTable, RouteError> {
        let mut routes = Vec::with_capacity(self.entries.len());
        let mut exact = HashMap::with_capacity(self.entries.len());

        for (source, handler) in self.entries {
            if exact.contains_key(&source) {
                return Err(RouteError::DuplicateRoute(source));
            }
            let pattern = Pattern::compile(&source)?;
            exact.insert(source, routes.len());
            routes.push(Route { pattern, handler });
        }

        Ok(RouteTable {
            inner: Arc::new(Inner { routes, exact }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(routes: &[(&str, &str)]) -> RouteTable {
        routes
            .iter()
            .fold(RouteTable::builder(), |b, (p, h)| b.route(*p, *h))
            .build()
            .unwrap()
    }

    fn handler_for(routes: &RouteTable, path: &str) -> Option<String> {
        routes
            .resolve(path)
            .map(|m| m.handler().label().to_string())
    }

    #[test]
    fn test_exact_key_beats_earlier_pattern() {
        let routes = table(&[("/:string", "Pattern"), ("/about", "About")]);

        let m = routes.resolve("/about").unwrap();
        assert_eq!(m.handler().label(), "About");
        assert!(m.exact);
        assert!(m.captures.is_empty());
    }

    #[test]
    fn test_first_pattern_wins() {
        let routes = table(&[("/:alpha", "First"), ("/:string", "Second")]);
        assert_eq!(handler_for(&routes, "/abc"), Some("First".to_string()));
    }

    #[test]
    fn test_exact_key_with_trailing_slash_falls_back_to_patterns() {
        let routes = table(&[("/:string", "Pattern"), ("/about", "About")]);
        // "/about/" is not a key; the first pattern that matches wins.
        assert_eq!(handler_for(&routes, "/about/"), Some("Pattern".to_string()));
    }

    #[test]
    fn test_empty_path_is_root() {
        let routes = table(&[("/", "Home")]);
        let m = routes.resolve("").unwrap();
        assert!(m.exact);
        assert_eq!(m.handler().label(), "Home");
    }

    #[test]
    fn test_no_match() {
        let routes = table(&[("/post/:number", "Post")]);
        assert!(routes.resolve("/post/abc").is_none());
        assert!(RouteTable::empty().resolve("/").is_none());
    }

    #[test]
    fn test_zero_capture_pattern_match() {
        let routes = table(&[("/(?:a|b)", "AorB")]);
        let m = routes.resolve("/b/").unwrap();
        assert!(!m.exact);
        assert!(m.captures.is_empty());
    }

    #[test]
    fn test_duplicate_route() {
        let err = RouteTable::builder()
            .route("/a", "A")
            .route("/a", "B")
            .build()
            .unwrap_err();
        assert_eq!(err, RouteError::DuplicateRoute("/a".to_string()));
    }

    #[test]
    fn test_clone_shares_routes() {
        let routes = table(&[("/", "Home"), ("/x", "X")]);
        let clone = routes.clone();
        assert_eq!(clone.len(), 2);
        assert_eq!(format!("{clone:?}"), r#"[("/", "Home"), ("/x", "X")]"#);
    }
}
