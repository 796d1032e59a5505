mod common;

use common::log_to;
use std::sync::{Arc, Mutex};
use std::thread;
use toro::prelude::*;
use toro::testing::RecordingListener;

fn ctx(hook: &HookName) -> HookContext {
    HookContext::new(hook.clone(), RouteTable::empty(), Request::get("/"))
}

#[test]
fn test_unregistered_hook_is_noop() {
    let hooks = HookRegistry::new();
    let name = HookName::from("never_registered");
    let mut c = ctx(&name);

    assert!(hooks.fire(&name, &mut c).is_ok());
    assert_eq!(hooks.listener_count(&name), 0);
}

#[test]
fn test_three_listeners_fire_in_registration_order() {
    let hooks = HookRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    log_to(&hooks, "before_request", &log, "a");
    log_to(&hooks, "before_request", &log, "b");
    log_to(&hooks, "before_request", &log, "c");

    let mut c = ctx(&HookName::BeforeRequest);
    hooks.fire(&HookName::BeforeRequest, &mut c).unwrap();
    hooks.fire(&HookName::BeforeRequest, &mut c).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c", "a", "b", "c"]);
}

#[test]
fn test_hook_names_are_independent() {
    let hooks = HookRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    log_to(&hooks, "404", &log, "missing");
    log_to(&hooks, "audit", &log, "custom");

    let mut c = ctx(&HookName::NotFound);
    hooks.fire(&HookName::NotFound, &mut c).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["missing"]);
    assert_eq!(hooks.listener_count(&HookName::NotFound), 1);
    assert_eq!(hooks.listener_count(&HookName::from("audit")), 1);
}

#[test]
fn test_failing_listener_stops_firing() {
    let hooks = HookRegistry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    log_to(&hooks, "after_request", &log, "before");
    hooks.add("after_request", |_ctx| Err("stop".into()));
    log_to(&hooks, "after_request", &log, "after");

    let mut c = ctx(&HookName::AfterRequest);
    let err = hooks.fire(&HookName::AfterRequest, &mut c).unwrap_err();

    assert_eq!(err.hook, HookName::AfterRequest);
    assert_eq!(err.source.to_string(), "stop");
    assert_eq!(*log.lock().unwrap(), vec!["before"]);
}

#[test]
fn test_custom_hook_fired_by_application() {
    let hooks = HookRegistry::new();
    let recorder = RecordingListener::new();
    hooks.add_listener("cache_miss", recorder.clone());

    let name = HookName::from("cache_miss");
    let mut c = ctx(&name);
    hooks.fire(&name, &mut c).unwrap();

    assert_eq!(recorder.hooks(), vec![HookName::Custom("cache_miss".to_string())]);
}

#[test]
fn test_concurrent_add_and_fire() {
    let hooks = Arc::new(HookRegistry::new());
    let log = Arc::new(Mutex::new(Vec::new()));

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let hooks = hooks.clone();
            let log = log.clone();
            thread::spawn(move || {
                for j in 0..25 {
                    log_to(&hooks, "before_request", &log, &format!("{i}-{j}"));
                    let mut c = ctx(&HookName::BeforeRequest);
                    hooks.fire(&HookName::BeforeRequest, &mut c).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(hooks.listener_count(&HookName::BeforeRequest), 100);
}

#[test]
fn test_listener_registers_another_during_firing() {
    let hooks = Arc::new(HookRegistry::new());
    let log = Arc::new(Mutex::new(Vec::new()));
    {
        let inner = hooks.clone();
        let log = log.clone();
        hooks.add("custom", move |_ctx| {
            log_to(&inner, "custom", &log, "late");
            Ok(())
        });
    }

    let name = HookName::from("custom");
    let mut c = ctx(&name);
    hooks.fire(&name, &mut c).unwrap();
    assert!(log.lock().unwrap().is_empty());

    hooks.fire(&name, &mut c).unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["late"]);
    assert_eq!(hooks.listener_count(&name), 3);
}

#[test]
fn test_shared_registry_is_process_wide() {
    let a = HookRegistry::shared();
    let b = HookRegistry::shared();
    assert!(Arc::ptr_eq(&a, &b));

    let dispatcher = Dispatcher::new(HandlerRegistry::new());
    assert!(Arc::ptr_eq(dispatcher.hooks(), &a));
}
