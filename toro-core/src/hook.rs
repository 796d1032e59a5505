//! # Hooks and Listeners
//!
//! A hook is a named extension point in the request lifecycle. Listeners are
//! registered against a name and fire, in registration order, every time the
//! dispatcher reaches that point.
//!
//! # Built-in Hook Names
//!
//! | Name | Fired |
//! |------|-------|
//! | `before_request` | first thing in `serve` |
//! | `before_handler` | right before the handler method is invoked |
//! | `after_handler` | right after the handler method returned |
//! | `404` | no route matched, or the handler lacks the verb method |
//! | `after_request` | last thing in `serve`, on every non-fatal path |
//!
//! Any other string is a [`HookName::Custom`] name. Custom hooks are never
//! fired by the dispatcher itself but can be fired by application code.

use crate::{context::HookContext, error::BoxError};
use std::fmt;

/// Name of a hook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookName {
    /// `before_request`
    BeforeRequest,
    /// `before_handler`
    BeforeHandler,
    /// `after_handler`
    AfterHandler,
    /// `404`
    NotFound,
    /// `after_request`
    AfterRequest,
    /// Any user-defined name.
    Custom(String),
}

impl HookName {
    /// The built-in names, in the order a handled request fires them.
    pub const LIFECYCLE: [HookName; 5] = [
        HookName::BeforeRequest,
        HookName::BeforeHandler,
        HookName::AfterHandler,
        HookName::NotFound,
        HookName::AfterRequest,
    ];

    /// The canonical string spelling of this hook name.
    pub fn as_str(&self) -> &str {
        match self {
            HookName::BeforeRequest => "before_request",
            HookName::BeforeHandler => "before_handler",
            HookName::AfterHandler => "after_handler",
            HookName::NotFound => "404",
            HookName::AfterRequest => "after_request",
            HookName::Custom(name) => name,
        }
    }

    /// Returns true for the five names the dispatcher fires on its own.
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, HookName::Custom(_))
    }
}

impl From<&str> for HookName {
    fn from(name: &str) -> Self {
        match name {
            "before_request" => HookName::BeforeRequest,
            "before_handler" => HookName::BeforeHandler,
            "after_handler" => HookName::AfterHandler,
            "404" => HookName::NotFound,
            "after_request" => HookName::AfterRequest,
            other => HookName::Custom(other.to_string()),
        }
    }
}

impl From<String> for HookName {
    fn from(name: String) -> Self {
        match HookName::from(name.as_str()) {
            HookName::Custom(_) => HookName::Custom(name),
            known => known,
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A callable registered against a hook.
///
/// Listeners receive the context of the current firing by mutable reference.
/// Edits are visible to the listeners that run after it within the same
/// firing; the dispatcher builds a fresh context for every firing and never
/// reads edits back.
///
/// Returning an error aborts the firing: later listeners do not run and the
/// error propagates out of `serve`.
///
/// Closures of the shape `Fn(&mut HookContext) -> Result<(), BoxError>`
/// implement this trait automatically.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a hook `Listener`",
    label = "missing `Listener` implementation",
    note = "Listeners are `Fn(&mut HookContext) -> Result<(), BoxError>` closures or types implementing `on_fire`."
)]
pub trait Listener: Send + Sync + 'static {
    /// Called when the hook this listener is registered against fires.
    fn on_fire(&self, ctx: &mut HookContext) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<F> Listener for F
where
    F: Fn(&mut HookContext) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn on_fire(&self, ctx: &mut HookContext) -> Result<(), BoxError> {
        (self)(ctx)
    }
}
