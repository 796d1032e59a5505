//! # Dispatcher
//!
//! Drives one request through the lifecycle:
//!
//! ```text
//! before_request
//!   → resolve route ──────────────── no match ──→ 404
//!   → split static parameters (malformed suffix aborts)
//!   → resolve handler (failure aborts)
//!   → pick method: <verb>_xhr for AJAX requests when implemented, else <verb>
//!   → before_handler → method → after_handler ── no method ──→ 404
//! after_request
//! ```
//!
//! "No route" and "no method" are normal outcomes reported through the
//! `404` hook. Descriptor, resolution, handler and listener errors abort the
//! request: `serve` returns early and `after_request` does not fire.

use crate::{descriptor::parse_descriptor, handlers::HandlerRegistry, registry::HookRegistry, xhr};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use toro_core::{
    Arguments, Handler, HookContext, HookName, MethodName, Request, ResponseHeaders, RouteTable,
    ToroError,
};

/// How a served request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A handler method was invoked.
    Handled,
    /// No route matched, or the handler had no method for the verb.
    NotFound,
}

/// What `serve` observed. Listeners saw the same values through their contexts.
#[derive(Debug, Clone)]
pub struct Served {
    /// How the request ended.
    pub outcome: Outcome,
    /// The handler method's return value, when one was invoked.
    pub result: Option<Value>,
    /// Response metadata for the transport layer.
    pub headers: ResponseHeaders,
}

impl Served {
    fn not_found(headers: ResponseHeaders) -> Self {
        Self {
            outcome: Outcome::NotFound,
            result: None,
            headers,
        }
    }

    /// Returns true if a handler method was invoked.
    pub fn is_handled(&self) -> bool {
        self.outcome == Outcome::Handled
    }
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Serves requests against route tables.
///
/// A dispatcher is immutable and may be shared between threads.
#[derive(Clone)]
pub struct Dispatcher {
    hooks: Arc<HookRegistry>,
    handlers: HandlerRegistry,
    clock: Clock,
}

impl Dispatcher {
    /// Start configuring a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// A dispatcher using the shared hook registry and the given handlers.
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self::builder().handlers(handlers).build()
    }

    /// The hook registry this dispatcher fires.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// The handler registry named descriptors are resolved against.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Serve `request` against `routes`.
    pub fn serve(&self, routes: &RouteTable, request: &Request) -> Result<Served, ToroError> {
        let mut ctx = HookContext::new(HookName::BeforeRequest, routes.clone(), request.clone());
        self.hooks.fire(&HookName::BeforeRequest, &mut ctx)?;

        let mut method = MethodName::parse(&request.verb());

        let Some(found) = routes.resolve(request.path()) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %request.path(), "no route matched");

            let mut ctx = self.context(HookName::NotFound, routes, request, None, &method, None);
            ctx.arguments = Some(Arguments::default());
            self.hooks.fire(&HookName::NotFound, &mut ctx)?;

            let mut ctx = self.context(HookName::AfterRequest, routes, request, None, &method, None);
            ctx.arguments = Some(Arguments::default());
            self.hooks.fire(&HookName::AfterRequest, &mut ctx)?;
            return Ok(Served::not_found(ResponseHeaders::new()));
        };

        let parsed = parse_descriptor(found.handler())?;
        let discovered = parsed.handler.label().to_string();
        let arguments = Arguments::new(found.captures, parsed.params);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            path = %request.path(),
            pattern = %found.route.pattern().as_str(),
            handler = %discovered,
            exact = found.exact,
            args = %arguments,
            "route matched"
        );

        let mut handler = self.handlers.resolve(&parsed.handler)?;

        let mut headers = ResponseHeaders::new();
        if request.is_ajax() && handler.implements(&method.to_xhr()) {
            method = method.to_xhr();
            headers = xhr::no_cache_json((self.clock)());
            #[cfg(feature = "tracing")]
            tracing::debug!(handler = %discovered, method = %method, "serving xhr variant");
        }

        let mut result = None;
        let outcome = if handler.implements(&method) {
            let mut ctx = self.context(
                HookName::BeforeHandler,
                routes,
                request,
                Some(&discovered),
                &method,
                Some(&arguments),
            );
            ctx.headers = headers.clone();
            self.hooks.fire(&HookName::BeforeHandler, &mut ctx)?;

            let value = self.invoke(&mut *handler, &method, arguments.clone())?;
            result = Some(value);

            let mut ctx = self.context(
                HookName::AfterHandler,
                routes,
                request,
                Some(&discovered),
                &method,
                Some(&arguments),
            );
            ctx.headers = headers.clone();
            ctx.result = result.clone();
            self.hooks.fire(&HookName::AfterHandler, &mut ctx)?;
            Outcome::Handled
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(handler = %discovered, method = %method, "handler has no method for verb");

            let mut ctx = self.context(
                HookName::NotFound,
                routes,
                request,
                Some(&discovered),
                &method,
                Some(&arguments),
            );
            self.hooks.fire(&HookName::NotFound, &mut ctx)?;
            Outcome::NotFound
        };

        let mut ctx = self.context(
            HookName::AfterRequest,
            routes,
            request,
            Some(&discovered),
            &method,
            Some(&arguments),
        );
        ctx.headers = headers.clone();
        ctx.result = result.clone();
        self.hooks.fire(&HookName::AfterRequest, &mut ctx)?;

        Ok(Served {
            outcome,
            result,
            headers,
        })
    }

    fn invoke(
        &self,
        handler: &mut dyn Handler,
        method: &MethodName,
        arguments: Arguments,
    ) -> Result<Value, ToroError> {
        handler
            .call(method, arguments)
            .map_err(|source| ToroError::Handler {
                method: method.to_string(),
                source,
            })
    }

    fn context(
        &self,
        hook: HookName,
        routes: &RouteTable,
        request: &Request,
        discovered: Option<&str>,
        method: &MethodName,
        arguments: Option<&Arguments>,
    ) -> HookContext {
        let mut ctx = HookContext::new(hook, routes.clone(), request.clone());
        ctx.discovered_handler = discovered.map(str::to_string);
        ctx.request_method = Some(method.clone());
        ctx.arguments = arguments.cloned();
        ctx
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("hooks", &self.hooks)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Dispatcher`].
///
/// # Example
/// ```ignore
/// let dispatcher = Dispatcher::builder()
///     .hooks(Arc::new(HookRegistry::new()))
///     .handler("Home", HomePage::default)
///     .build();
/// ```
#[derive(Default)]
pub struct DispatcherBuilder {
    hooks: Option<Arc<HookRegistry>>,
    handlers: HandlerRegistry,
    clock: Option<Clock>,
}

impl DispatcherBuilder {
    /// Use `hooks` instead of the shared registry.
    pub fn hooks(mut self, hooks: Arc<HookRegistry>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Replace the handler registry.
    pub fn handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    /// Register one handler factory.
    pub fn handler<F, H>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: Handler + 'static,
    {
        self.handlers = self.handlers.register(name, factory);
        self
    }

    /// Override the clock used for `Last-Modified`.
    pub fn clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            hooks: self.hooks.unwrap_or_else(HookRegistry::shared),
            handlers: self.handlers,
            clock: self.clock.unwrap_or_else(|| Arc::new(Utc::now) as Clock),
        }
    }
}
