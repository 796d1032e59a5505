//! Testing utilities for Toro.
//!
//! - [`RecordingListener`]: records every context it is fired with
//! - [`EchoHandler`]: a handler that returns its arguments as JSON

use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use toro_core::{Arguments, BoxError, Handler, HandlerResult, HookContext, HookName, Listener, MethodName};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records a snapshot of every context it receives.
///
/// Clones share the same record, so keep one handle and register another.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::new();
/// hooks.add_listener("404", recorder.clone());
///
/// dispatcher.serve(&routes, &Request::get("/missing"))?;
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingListener {
    contexts: Arc<Mutex<Vec<HookContext>>>,
}

impl RecordingListener {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register this recorder for every lifecycle hook on `hooks`.
    pub fn attach(&self, hooks: &crate::registry::HookRegistry) {
        for name in HookName::LIFECYCLE {
            hooks.add_listener(name, self.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HookContext>> {
        self.contexts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copies of the recorded contexts, oldest first.
    pub fn contexts(&self) -> Vec<HookContext> {
        self.lock().clone()
    }

    /// The hook names seen, oldest first.
    pub fn hooks(&self) -> Vec<HookName> {
        self.lock().iter().map(|ctx| ctx.hook.clone()).collect()
    }

    /// The most recent context recorded for `hook`.
    pub fn last(&self, hook: &HookName) -> Option<HookContext> {
        self.lock().iter().rev().find(|ctx| &ctx.hook == hook).cloned()
    }

    /// Number of recorded firings.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl std::fmt::Debug for RecordingListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingListener")
            .field("count", &self.count())
            .finish()
    }
}

impl Listener for RecordingListener {
    fn on_fire(&self, ctx: &mut HookContext) -> Result<(), BoxError> {
        self.lock().push(ctx.clone());
        Ok(())
    }
}

// ============================================================================
// Echo Handler
// ============================================================================

/// A handler that implements a fixed set of methods and answers each call
/// with its arguments:
///
/// ```json
/// { "method": "get_xhr", "captures": ["42"], "params": { "tab": "profile" } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct EchoHandler {
    methods: HashSet<MethodName>,
}

impl EchoHandler {
    /// A handler with no methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Implement `method`, written as `get`, `post_xhr`, ...
    pub fn with(mut self, method: &str) -> Self {
        self.methods.insert(MethodName::parse(method));
        self
    }

    /// The JSON `call` returns for `method` and `args`.
    pub fn echo(method: &MethodName, args: &Arguments) -> Value {
        let params: Map<String, Value> = args
            .params()
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect();
        json!({
            "method": method.to_string(),
            "captures": args.captures(),
            "params": params,
        })
    }
}

impl Handler for EchoHandler {
    fn implements(&self, method: &MethodName) -> bool {
        self.methods.contains(method)
    }

    fn call(&mut self, method: &MethodName, args: Arguments) -> HandlerResult {
        Ok(Self::echo(method, &args))
    }
}
