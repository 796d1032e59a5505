//! # toro-core
//!
//! Core types and traits for the Toro request router.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! listener plugins and handler crates that don't need the full `toro-std`
//! implementation.
//!
//! # Request Lifecycle
//!
//! A request travels through a fixed sequence of decision points, each of
//! which fires a named hook:
//!
//! ```text
//! Request { method, path, is_ajax }
//!   → before_request
//!   → RouteTable::resolve (exact key, then patterns in declared order)
//!   → static parameters split off the handler descriptor
//!   → handler resolved to an instance
//!   → before_handler → <verb>[_xhr] method → after_handler   (or 404)
//!   → after_request
//! ```
//!
//! ## Routing ([`RouteTable`], [`Pattern`])
//!
//! An ordered table of patterns. Patterns understand three placeholder
//! tokens (`:string`, `:number`, `:alpha`); anything else is passed to the
//! regex engine verbatim. First match in declaration order wins.
//!
//! ## Hooks ([`Listener`], [`HookContext`])
//!
//! Listeners are plain callables registered against a [`HookName`]. They
//! receive a mutable [`HookContext`] describing the request at that point.
//!
//! ## Handlers ([`Handler`])
//!
//! A handler exposes one method per HTTP verb, optionally with an `_xhr`
//! variant. Whether a method exists is a typed lookup
//! ([`Handler::implements`]) rather than reflection.
//!
//! # Error Types
//!
//! - [`ToroError`] - Top-level error type for a served request
//! - [`RouteError`] - Route table construction errors
//! - [`DescriptorError`] - Malformed static-parameter suffix
//! - [`ResolveError`] - Handler resolution errors
//! - [`HookError`] - Listener failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod arguments;
mod context;
mod error;
mod handler;
mod hook;
mod pattern;
mod request;
mod response;
mod route;

// Re-exports
pub use arguments::{Argument, Arguments, StaticParams};
pub use context::HookContext;
pub use error::{BoxError, DescriptorError, HookError, ResolveError, RouteError, ToroError};
pub use handler::{Handler, HandlerDescriptor, HandlerFactory, HandlerResult, MethodName};
pub use hook::{HookName, Listener};
pub use pattern::{Pattern, Token};
pub use request::Request;
pub use response::ResponseHeaders;
pub use route::{Route, RouteMatch, RouteTable, RouteTableBuilder};
