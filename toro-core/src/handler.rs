//! # Handlers
//!
//! A handler is the terminal point of a request: an object exposing one
//! method per HTTP verb (`get`, `post`, ...) and optionally an XHR variant
//! of each (`get_xhr`, ...).
//!
//! # Method Lookup
//!
//! Whether a handler has a method for a verb is asked through
//! [`Handler::implements`]. A `false` answer is normal flow: the dispatcher
//! fires the `404` hook instead of invoking anything.
//!
//! # Usage Patterns
//!
//! 1. **Struct implementation**: `impl Handler for UserPage`
//! 2. **Closure table**: `MethodTable::new().on("get", |args| ...)` in `toro-std`
//!
//! Routes refer to handlers through a [`HandlerDescriptor`]: either a name
//! looked up in a handler registry, or an inline factory.

use crate::{arguments::Arguments, error::BoxError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The result of invoking a handler method.
pub type HandlerResult = Result<Value, BoxError>;

/// Name of a handler method: a lower-cased HTTP verb, optionally `_xhr`-suffixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodName {
    verb: String,
    xhr: bool,
}

impl MethodName {
    /// Method for `verb`. The verb is lower-cased.
    pub fn new(verb: &str) -> Self {
        Self {
            verb: verb.to_ascii_lowercase(),
            xhr: false,
        }
    }

    /// The XHR variant of `verb` (`<verb>_xhr`).
    pub fn xhr(verb: &str) -> Self {
        Self {
            verb: verb.to_ascii_lowercase(),
            xhr: true,
        }
    }

    /// Parse a method name as spelled on a handler, e.g. `get` or `get_xhr`.
    pub fn parse(name: &str) -> Self {
        match name.strip_suffix("_xhr") {
            Some(verb) if !verb.is_empty() => Self::xhr(verb),
            _ => Self::new(name),
        }
    }

    /// The XHR variant of this method's verb.
    pub fn to_xhr(&self) -> Self {
        Self {
            verb: self.verb.clone(),
            xhr: true,
        }
    }

    /// The lower-cased verb, without any suffix.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Returns true for `_xhr` variants.
    pub fn is_xhr(&self) -> bool {
        self.xhr
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.xhr {
            write!(f, "{}_xhr", self.verb)
        } else {
            f.write_str(&self.verb)
        }
    }
}

/// The request endpoint.
///
/// A fresh instance is created for every request that reaches it, so
/// implementations may keep per-request state in `&mut self`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a request `Handler`",
    label = "missing `Handler` implementation",
    note = "Handlers declare their verb methods through `implements` and run them in `call`."
)]
pub trait Handler {
    /// Returns true if this handler has a method named `method`.
    fn implements(&self, method: &MethodName) -> bool;

    /// Invoke `method` with the route's argument list.
    ///
    /// Only called for methods [`implements`](Handler::implements) reported.
    fn call(&mut self, method: &MethodName, args: Arguments) -> HandlerResult;
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn implements(&self, method: &MethodName) -> bool {
        (**self).implements(method)
    }

    fn call(&mut self, method: &MethodName, args: Arguments) -> HandlerResult {
        (**self).call(method, args)
    }
}

/// A zero-argument capability that produces a handler instance.
pub type HandlerFactory =
    Arc<dyn Fn() -> Result<Box<dyn Handler>, BoxError> + Send + Sync + 'static>;

/// How a route refers to its handler.
#[derive(Clone)]
pub enum HandlerDescriptor {
    /// A registered handler name, optionally suffixed with static
    /// parameters: `Name?k1=v1&k2=v2`.
    Named(String),
    /// A factory invoked directly to obtain the instance.
    Factory(HandlerFactory),
}

impl HandlerDescriptor {
    /// Descriptor for an inline factory.
    pub fn factory<F, H>(factory: F) -> Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: Handler + 'static,
    {
        HandlerDescriptor::Factory(Arc::new(move || Ok(Box::new(factory()) as Box<dyn Handler>)))
    }

    /// Descriptor for an inline factory that may fail.
    pub fn try_factory<F, H>(factory: F) -> Self
    where
        F: Fn() -> Result<H, BoxError> + Send + Sync + 'static,
        H: Handler + 'static,
    {
        HandlerDescriptor::Factory(Arc::new(move || {
            factory().map(|h| Box::new(h) as Box<dyn Handler>)
        }))
    }

    /// The handler name, or `None` for factories.
    pub fn name(&self) -> Option<&str> {
        match self {
            HandlerDescriptor::Named(name) => Some(name),
            HandlerDescriptor::Factory(_) => None,
        }
    }

    /// A printable label: the name, or `<factory>`.
    pub fn label(&self) -> &str {
        self.name().unwrap_or("<factory>")
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerDescriptor::Named(name) => f.debug_tuple("Named").field(name).finish(),
            HandlerDescriptor::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<&str> for HandlerDescriptor {
    fn from(name: &str) -> Self {
        HandlerDescriptor::Named(name.to_string())
    }
}

impl From<String> for HandlerDescriptor {
    fn from(name: String) -> Self {
        HandlerDescriptor::Named(name)
    }
}
