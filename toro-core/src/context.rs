//! Hook context.
//!
//! Each firing gets its own [`HookContext`]. Which fields are populated
//! depends on how far the request got:
//!
//! | Hook | `discovered_handler` | `request_method` | `arguments` | `result` | `headers` |
//! |------|---|---|---|---|---|
//! | `before_request` | - | - | - | - | - |
//! | `404` | if a route matched | ✓ | ✓ | - | - |
//! | `before_handler` | ✓ | ✓ | ✓ | - | ✓ |
//! | `after_handler` | ✓ | ✓ | ✓ | ✓ | ✓ |
//! | `after_request` | if a route matched | ✓ | ✓ | if invoked | ✓ |
//!
//! `routes` and `request` are always present.

use crate::{
    arguments::Arguments, handler::MethodName, hook::HookName, request::Request,
    response::ResponseHeaders, route::RouteTable,
};
use serde_json::Value;

/// The values handed to the listeners of one firing.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// The hook being fired.
    pub hook: HookName,
    /// The route table the request is served against.
    pub routes: RouteTable,
    /// The request being served.
    pub request: Request,
    /// Bare handler reference of the matched route, static-parameter suffix
    /// stripped. `None` when no route matched.
    pub discovered_handler: Option<String>,
    /// The method selected on the handler (`get`, `post_xhr`, ...).
    pub request_method: Option<MethodName>,
    /// The argument list the handler method receives.
    pub arguments: Option<Arguments>,
    /// Value returned by the handler method.
    pub result: Option<Value>,
    /// Response metadata produced so far.
    pub headers: ResponseHeaders,
}

impl HookContext {
    /// Create a context carrying only the route table and request.
    pub fn new(hook: HookName, routes: RouteTable, request: Request) -> Self {
        Self {
            hook,
            routes,
            request,
            discovered_handler: None,
            request_method: None,
            arguments: None,
            result: None,
            headers: ResponseHeaders::new(),
        }
    }

    /// Returns the static parameters of the matched route, if any were parsed.
    ///
    /// This is always the last entry of the argument list.
    pub fn static_params(&self) -> Option<&crate::StaticParams> {
        self.arguments.as_ref().map(Arguments::params)
    }
}
