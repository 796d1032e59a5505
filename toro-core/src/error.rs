//! Error types for Toro.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`ToroError`] - Top-level error type for serving a request
//! - [`RouteError`] - Errors while building a route table
//! - [`DescriptorError`] - Malformed handler descriptors
//! - [`ResolveError`] - Handler references that cannot be instantiated
//! - [`HookError`] - Errors from individual listeners
//!
//! "No route" and "no method for this verb" are not errors. They are
//! reported through the `404` hook.

use crate::hook::HookName;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for a served request.
///
/// Any of these aborts the request: remaining lifecycle hooks do not fire.
#[derive(Error, Debug)]
pub enum ToroError {
    /// The matched handler descriptor carries a malformed static-parameter suffix.
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// The handler reference could not be turned into an instance.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// A listener failed.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// The handler method itself returned an error.
    #[error("handler method `{method}` failed")]
    Handler {
        /// Name of the invoked method (e.g. `get_xhr`).
        method: String,
        /// The error returned by the handler.
        #[source]
        source: BoxError,
    },
}

/// Errors that can occur while building a route table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The same pattern string was declared twice.
    #[error("route already exists for pattern: {0}")]
    DuplicateRoute(String),

    /// The pattern did not compile after token substitution.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The pattern as declared.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// Errors in the static-parameter suffix of a handler descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// A `key=value` pair is missing its `=`.
    #[error("malformed static parameter `{pair}` in handler descriptor `{descriptor}`")]
    MalformedPair {
        /// The full descriptor as declared in the route table.
        descriptor: String,
        /// The offending pair.
        pair: String,
    },
}

/// Errors that can occur while resolving a handler reference.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No factory is registered under this name.
    #[error("no handler registered under name: {0}")]
    UnknownHandler(String),

    /// The factory failed to produce an instance.
    #[error("handler factory for `{name}` failed")]
    Factory {
        /// The handler name, or `<factory>` for anonymous factories.
        name: String,
        /// The factory's error.
        #[source]
        source: BoxError,
    },
}

/// A listener failed while a hook was firing.
///
/// Listeners registered after the failing one did not run.
#[derive(Error, Debug)]
#[error("listener for hook `{hook}` failed")]
pub struct HookError {
    /// The hook that was firing.
    pub hook: HookName,
    /// The listener's error.
    #[source]
    pub source: BoxError,
}

impl HookError {
    /// Create a hook error for `hook`.
    pub fn new(hook: HookName, source: impl Into<BoxError>) -> Self {
        Self {
            hook,
            source: source.into(),
        }
    }
}
