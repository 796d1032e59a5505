//! Handler registry and closure-based handlers.
//!
//! Named route descriptors are resolved through a [`HandlerRegistry`]: an
//! explicit map from handler name to factory. Resolution is a lookup, so a
//! typo in a route table surfaces as [`ResolveError::UnknownHandler`] on the
//! first request that reaches it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use toro_core::{
    Arguments, BoxError, Handler, HandlerDescriptor, HandlerFactory, HandlerResult, MethodName,
    ResolveError,
};

/// Map from handler name to factory.
///
/// # Example
/// ```ignore
/// let handlers = HandlerRegistry::new()
///     .register("Home", HomePage::default)
///     .register("Api", || MethodTable::new().on_xhr("get", |_| Ok(json!({}))));
/// ```
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`. A later registration replaces an earlier one.
    pub fn register<F, H>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: Handler + 'static,
    {
        self.insert(name, Arc::new(move || Ok(Box::new(factory()) as Box<dyn Handler>)));
        self
    }

    /// Register a factory that may fail.
    pub fn register_fallible<F, H>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<H, BoxError> + Send + Sync + 'static,
        H: Handler + 'static,
    {
        self.insert(
            name,
            Arc::new(move || factory().map(|h| Box::new(h) as Box<dyn Handler>)),
        );
        self
    }

    /// Register a factory (mutable version).
    pub fn insert(&mut self, name: impl Into<String>, factory: HandlerFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Returns true if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Turn a bare handler reference into an instance.
    ///
    /// Named references are looked up and their factory invoked; factory
    /// descriptors are invoked directly.
    pub fn resolve(&self, descriptor: &HandlerDescriptor) -> Result<Box<dyn Handler>, ResolveError> {
        let (name, factory) = match descriptor {
            HandlerDescriptor::Named(name) => {
                let factory = self
                    .factories
                    .get(name)
                    .ok_or_else(|| ResolveError::UnknownHandler(name.clone()))?;
                (name.as_str(), factory)
            }
            HandlerDescriptor::Factory(factory) => (descriptor.label(), factory),
        };

        factory().map_err(|source| ResolveError::Factory {
            name: name.to_string(),
            source,
        })
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("HandlerRegistry")
            .field("names", &names)
            .finish()
    }
}

type MethodFn = Box<dyn FnMut(Arguments) -> HandlerResult + Send>;

/// A handler assembled from closures, one per method.
///
/// # Example
/// ```ignore
/// let handler = MethodTable::new()
///     .on("get", |args| Ok(json!({ "id": args.capture(0) })))
///     .on_xhr("get", |args| Ok(json!({ "id": args.capture(0), "partial": true })));
/// ```
#[derive(Default)]
pub struct MethodTable {
    methods: HashMap<MethodName, MethodFn>,
}

impl MethodTable {
    /// Create a handler with no methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the plain method for `verb`.
    pub fn on<F>(self, verb: &str, f: F) -> Self
    where
        F: FnMut(Arguments) -> HandlerResult + Send + 'static,
    {
        self.method(MethodName::new(verb), f)
    }

    /// Add the `_xhr` method for `verb`.
    pub fn on_xhr<F>(self, verb: &str, f: F) -> Self
    where
        F: FnMut(Arguments) -> HandlerResult + Send + 'static,
    {
        self.method(MethodName::xhr(verb), f)
    }

    /// Add a method under an explicit name.
    pub fn method<F>(mut self, name: MethodName, f: F) -> Self
    where
        F: FnMut(Arguments) -> HandlerResult + Send + 'static,
    {
        self.methods.insert(name, Box::new(f));
        self
    }
}

impl Handler for MethodTable {
    fn implements(&self, method: &MethodName) -> bool {
        self.methods.contains_key(method)
    }

    fn call(&mut self, method: &MethodName, args: Arguments) -> HandlerResult {
        match self.methods.get_mut(method) {
            Some(f) => f(args),
            None => Err(format!("method `{method}` is not implemented").into()),
        }
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.methods.keys().map(ToString::to_string).collect();
        names.sort();
        f.debug_struct("MethodTable")
            .field("methods", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn greeter() -> MethodTable {
        MethodTable::new()
            .on("get", |_| Ok(json!("page")))
            .on_xhr("get", |_| Ok(json!({ "page": true })))
    }

    #[test]
    fn test_method_table_lookup() {
        let handler = greeter();
        assert!(handler.implements(&MethodName::new("get")));
        assert!(handler.implements(&MethodName::xhr("get")));
        assert!(!handler.implements(&MethodName::new("post")));
    }

    #[test]
    fn test_method_table_call() {
        let mut handler = greeter();
        let out = handler
            .call(&MethodName::xhr("get"), Arguments::default())
            .unwrap();
        assert_eq!(out, json!({ "page": true }));

        assert!(handler
            .call(&MethodName::new("post"), Arguments::default())
            .is_err());
    }

    #[test]
    fn test_method_table_keeps_state() {
        let mut count = 0;
        let mut handler = MethodTable::new().on("post", move |_| {
            count += 1;
            Ok(json!(count))
        });
        let post = MethodName::new("post");
        handler.call(&post, Arguments::default()).unwrap();
        let out = handler.call(&post, Arguments::default()).unwrap();
        assert_eq!(out, json!(2));
    }

    #[test]
    fn test_resolve_named() {
        let handlers = HandlerRegistry::new().register("Greeter", greeter);
        let handler = handlers
            .resolve(&HandlerDescriptor::from("Greeter"))
            .unwrap();
        assert!(handler.implements(&MethodName::new("get")));
    }

    #[test]
    fn test_resolve_unknown() {
        let handlers = HandlerRegistry::new();
        let Err(err) = handlers.resolve(&HandlerDescriptor::from("Missing")) else {
            panic!("resolving an unregistered name should fail");
        };
        assert!(matches!(err, ResolveError::UnknownHandler(ref n) if n == "Missing"));
    }

    #[test]
    fn test_resolve_factory_error() {
        let handlers = HandlerRegistry::new().register_fallible("Db", || {
            Err::<MethodTable, BoxError>("connection refused".into())
        });
        let Err(err) = handlers.resolve(&HandlerDescriptor::from("Db")) else {
            panic!("a failing factory should fail resolution");
        };
        match err {
            ResolveError::Factory { name, source } => {
                assert_eq!(name, "Db");
                assert_eq!(source.to_string(), "connection refused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_inline_factory() {
        let handlers = HandlerRegistry::new();
        let handler = handlers
            .resolve(&HandlerDescriptor::factory(greeter))
            .unwrap();
        assert!(handler.implements(&MethodName::xhr("get")));
    }

    #[test]
    fn test_debug_lists_names() {
        let handlers = HandlerRegistry::new()
            .register("B", greeter)
            .register("A", greeter);
        assert_eq!(
            format!("{handlers:?}"),
            r#"HandlerRegistry { names: ["A", "B"] }"#
        );
    }
}
