//! Hook registry.
//!
//! Maps hook names to ordered listener lists. A registry is normally created
//! once at startup and shared (via `Arc`) with every dispatcher; the
//! process-wide default is available through [`HookRegistry::shared`].
//!
//! # Concurrency
//!
//! Listener lists sit behind a reader/writer lock. Firing takes a snapshot of
//! the list under the read lock and releases it before running listeners, so
//! concurrent firings never block each other and a listener may call
//! [`HookRegistry::add`] without deadlocking. Listeners added during a firing
//! run from the next firing on.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use toro_core::{BoxError, HookContext, HookError, HookName, Listener};

static SHARED: Lazy<Arc<HookRegistry>> = Lazy::new(|| Arc::new(HookRegistry::new()));

/// Named, ordered listener lists.
///
/// # Example
/// ```ignore
/// let hooks = HookRegistry::new();
/// hooks.add("404", |ctx| {
///     eprintln!("nothing at {}", ctx.request.path());
///     Ok(())
/// });
/// ```
#[derive(Default)]
pub struct HookRegistry {
    listeners: RwLock<HashMap<HookName, Vec<Arc<dyn Listener>>>>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    pub fn shared() -> Arc<HookRegistry> {
        Arc::clone(&SHARED)
    }

    /// Append a closure listener to `name`'s list.
    pub fn add<F>(&self, name: impl Into<HookName>, listener: F)
    where
        F: Fn(&mut HookContext) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.add_listener(name, listener);
    }

    /// Append a listener to `name`'s list.
    pub fn add_listener<L: Listener>(&self, name: impl Into<HookName>, listener: L) {
        let name = name.into();
        #[cfg(feature = "tracing")]
        tracing::trace!(hook = %name, "registering listener");
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name)
            .or_default()
            .push(Arc::new(listener));
    }

    /// Run every listener registered for `name`, in registration order.
    ///
    /// A no-op if nothing is registered. The first listener error stops the
    /// firing and is returned.
    pub fn fire(&self, name: &HookName, ctx: &mut HookContext) -> Result<(), HookError> {
        let snapshot = match self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            Some(list) => list.clone(),
            None => return Ok(()),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(hook = %name, listeners = snapshot.len(), "firing hook");

        for listener in &snapshot {
            listener
                .on_fire(ctx)
                .map_err(|source| HookError::new(name.clone(), source))?;
        }
        Ok(())
    }

    /// Number of listeners registered for `name`.
    pub fn listener_count(&self, name: &HookName) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map_or(0, Vec::len)
    }

    /// Returns true if no listener is registered under any name.
    pub fn is_empty(&self) -> bool {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .all(Vec::is_empty)
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        let mut map = f.debug_map();
        for (name, list) in guard.iter() {
            map.entry(&name.as_str(), &list.len());
        }
        map.finish()
    }
}
