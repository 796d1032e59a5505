//! Handler arguments.
//!
//! A handler method receives the path captures of the matched route, in
//! pattern order, followed by exactly one trailing entry: the static
//! parameters declared in the handler descriptor. The trailing entry is
//! present even when nothing was declared, so the list is never empty.

use std::collections::BTreeMap;
use std::fmt;

/// Static parameters declared in a handler descriptor's `?k=v&..` suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticParams {
    map: BTreeMap<String, String>,
}

impl StaticParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter. A later value for the same key replaces the earlier one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    /// Look up a parameter by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Returns true if `key` was declared.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true when no parameter was declared.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = StaticParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// One positional argument of a handler method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// A value captured from the request path.
    Capture(String),
    /// The static-parameter map (always the last argument).
    Params(StaticParams),
}

impl Argument {
    /// Returns the captured string, if this is a capture.
    pub fn as_capture(&self) -> Option<&str> {
        match self {
            Argument::Capture(s) => Some(s),
            Argument::Params(_) => None,
        }
    }

    /// Returns the parameter map, if this is the trailing entry.
    pub fn as_params(&self) -> Option<&StaticParams> {
        match self {
            Argument::Params(p) => Some(p),
            Argument::Capture(_) => None,
        }
    }
}

/// The ordered argument list passed to a handler method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    captures: Vec<String>,
    params: StaticParams,
}

impl Arguments {
    /// Build an argument list from path captures and static parameters.
    pub fn new(captures: Vec<String>, params: StaticParams) -> Self {
        Self { captures, params }
    }

    /// Path captures, in pattern order.
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// The capture at `index`, counting from the leftmost token.
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(String::as_str)
    }

    /// The static parameters (the trailing argument).
    pub fn params(&self) -> &StaticParams {
        &self.params
    }

    /// Shorthand for `self.params().get(key)`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// Number of positional arguments, including the trailing parameter map.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.captures.len() + 1
    }

    /// The full positional list: captures, then the parameter map.
    pub fn to_vec(&self) -> Vec<Argument> {
        let mut args: Vec<Argument> = self
            .captures
            .iter()
            .cloned()
            .map(Argument::Capture)
            .collect();
        args.push(Argument::Params(self.params.clone()));
        args
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for capture in &self.captures {
            write!(f, "{capture:?}, ")?;
        }
        f.write_str("{")?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v:?}")?;
        }
        f.write_str("}]")
    }
}
