//! # toro - Minimal Request Router with Lifecycle Hooks
//!
//! `toro` maps a request path to a handler through an ordered table of URL
//! patterns, invokes the handler method named after the HTTP verb, and fires
//! named hooks at each step so cross-cutting behaviour can be attached
//! without touching handlers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use toro::prelude::*;
//! use serde_json::json;
//!
//! let routes = RouteTable::builder()
//!     .route("/", "Home")
//!     .route("/users/:number", "User?tab=profile")
//!     .build()?;
//!
//! let dispatcher = Dispatcher::builder()
//!     .handler("Home", || MethodTable::new().on("get", |_| Ok(json!("home"))))
//!     .handler("User", || {
//!         MethodTable::new()
//!             .on("get", |args| Ok(json!({ "id": args.capture(0), "tab": args.param("tab") })))
//!             .on_xhr("get", |args| Ok(json!({ "id": args.capture(0) })))
//!     })
//!     .build();
//!
//! dispatcher.hooks().add("404", |ctx| {
//!     eprintln!("nothing at {}", ctx.request.path());
//!     Ok(())
//! });
//!
//! let served = dispatcher.serve(&routes, &toro::cgi::request_from_env())?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use toro_core::{
    // Arguments
    Argument,
    Arguments,
    // Error types
    BoxError,
    DescriptorError,
    // Handler
    Handler,
    HandlerDescriptor,
    HandlerFactory,
    HandlerResult,
    // Hook
    HookContext,
    HookError,
    HookName,
    Listener,
    MethodName,
    // Routing
    Pattern,
    // Request / response
    Request,
    ResolveError,
    ResponseHeaders,
    Route,
    RouteError,
    RouteMatch,
    RouteTable,
    RouteTableBuilder,
    StaticParams,
    Token,
    ToroError,
};

pub use toro_std::{
    Dispatcher, DispatcherBuilder, HandlerRegistry, HookRegistry, MethodTable, Outcome,
    ParsedDescriptor, Served, parse_descriptor,
};

pub use toro_std::{cgi, xhr};

/// TOML route tables.
#[cfg(feature = "config")]
pub mod config {
    pub use toro_std::config::{ConfigError, load_routes, load_routes_file};
}

/// Standard listener implementations.
pub mod hooks {
    pub use toro_std::hooks::LoggingListener;
}

/// Testing utilities.
pub mod testing {
    pub use toro_std::testing::{EchoHandler, RecordingListener};
}

/// Prelude module - common imports for Toro.
///
/// # Usage
///
/// ```rust,ignore
/// use toro::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Arguments, BoxError, Dispatcher, Handler, HandlerRegistry, HandlerResult, HookContext,
        HookName, HookRegistry, Listener, MethodName, MethodTable, Outcome, Request, RouteTable,
        Served, StaticParams, ToroError,
    };
}
