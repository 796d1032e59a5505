#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use std::sync::{Arc, Mutex};
use toro::prelude::*;
use toro::testing::{EchoHandler, RecordingListener};

// ============================================================================
// Clock
// ============================================================================

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap()
}

pub const FIXED_HTTP_DATE: &str = "Tue, 05 Mar 2024 07:08:09 GMT";

// ============================================================================
// Dispatcher Fixture
// ============================================================================

/// A dispatcher with its own hook registry and a recorder on every lifecycle hook.
pub struct Fixture {
    pub dispatcher: Dispatcher,
    pub recorder: RecordingListener,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_handlers(handlers())
    }

    pub fn with_handlers(handlers: HandlerRegistry) -> Self {
        let hooks = Arc::new(HookRegistry::new());
        let recorder = RecordingListener::new();
        recorder.attach(&hooks);

        let dispatcher = Dispatcher::builder()
            .hooks(hooks)
            .handlers(handlers)
            .clock(fixed_now)
            .build();
        Self {
            dispatcher,
            recorder,
        }
    }

    pub fn hooks(&self) -> &HookRegistry {
        self.dispatcher.hooks()
    }

    pub fn serve(&self, routes: &RouteTable, request: Request) -> Result<Served, ToroError> {
        self.dispatcher.serve(routes, &request)
    }

    pub fn fired(&self) -> Vec<String> {
        self.recorder
            .hooks()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Handlers used across the integration tests:
///
/// - `H`: echoes `get` and `post`
/// - `Page`: `get` and `get_xhr`, answering which one ran
/// - `GetOnly`: echoes `get` only
pub fn handlers() -> HandlerRegistry {
    HandlerRegistry::new()
        .register("H", || EchoHandler::new().with("get").with("post"))
        .register("GetOnly", || EchoHandler::new().with("get"))
        .register("Page", || {
            MethodTable::new()
                .on("get", |_| Ok(json!("html")))
                .on_xhr("get", |_| Ok(json!({ "partial": true })))
        })
}

// ============================================================================
// Listeners
// ============================================================================

/// Registers a listener on `hook` that appends `tag` to `log`.
pub fn log_to(hooks: &HookRegistry, hook: &str, log: &Arc<Mutex<Vec<String>>>, tag: &str) {
    let log = log.clone();
    let tag = tag.to_string();
    hooks.add(hook, move |_ctx| {
        log.lock().unwrap().push(tag.clone());
        Ok(())
    });
}
