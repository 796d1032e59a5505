//! # toro-std
//!
//! Standard implementations for the Toro request router.
//!
//! This crate provides:
//! - **Hooks**: [`HookRegistry`] and the ready-made [`hooks::LoggingListener`]
//! - **Handlers**: [`HandlerRegistry`] for named descriptors, [`MethodTable`] for closure handlers
//! - **Dispatch**: [`Dispatcher::serve`] drives a request through the lifecycle
//! - **Descriptors**: [`parse_descriptor`] splits static parameters off a handler reference
//! - **Transport glue**: [`cgi`] request derivation, [`xhr`] response metadata
//! - **Configuration**: TOML route tables (feature `config`)
//! - **Testing**: [`testing`] recorders and echo handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use toro_core;

// Modules
pub mod cgi;
#[cfg(feature = "config")]
pub mod config;
mod descriptor;
mod dispatch;
mod handlers;
pub mod hooks;
mod registry;
pub mod testing;
pub mod xhr;

pub use descriptor::{ParsedDescriptor, parse_descriptor};
pub use dispatch::{Dispatcher, DispatcherBuilder, Outcome, Served};
pub use handlers::{HandlerRegistry, MethodTable};
pub use registry::HookRegistry;
