// tests/stop_hook_failure.rs

//! Disconnect must never fail because of the stop hook: the node is
//! already being removed from service, so failures are logged and
//! swallowed.

mod common;
use crate::common::init_tracing;

use std::sync::Arc;

use nodehook::connector::{NodeConnector, NodeSession};
use nodehook::controller::{HookedConnector, SessionPhase};
use nodehook::hook::HookConfig;
use nodehook_test_utils::doubles::{
    journal, BufferSink, FakeContext, FakeLauncher, SpyConnector, UnavailableContext,
};

fn hooks(stop: Option<&str>) -> HookConfig {
    HookConfig::new(None, stop.map(String::from))
}

#[tokio::test]
async fn stop_hook_nonzero_exit_is_swallowed() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(FakeLauncher::new(journal.clone()).exit_code("teardown.sh", 3));
    let controller = HookedConnector::new(
        hooks(Some("teardown.sh")),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    // Returns normally; the () output is the whole point.
    controller.disconnect(&session, sink.clone()).await;

    assert!(sink.contains("Failed executing command 'teardown.sh' (exit code 3)"));
    assert_eq!(SpyConnector::disconnect_calls(&journal), 1);
    assert_eq!(controller.phase(), SessionPhase::Disconnected);
}

#[tokio::test]
async fn stop_hook_spawn_failure_is_swallowed() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(
        FakeLauncher::new(journal.clone()).spawn_error("teardown.sh", "missing interpreter"),
    );
    let controller = HookedConnector::new(
        hooks(Some("teardown.sh")),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    controller.disconnect(&session, sink.clone()).await;

    assert!(sink.contains("Failed executing command 'teardown.sh'"));
    assert!(sink.contains("missing interpreter"));
    assert_eq!(controller.phase(), SessionPhase::Disconnected);
}

#[tokio::test]
async fn empty_stop_command_is_noticed_and_delegate_still_runs() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(FakeLauncher::new(journal.clone()));
    let controller = HookedConnector::new(
        hooks(None),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    controller.disconnect(&session, sink.clone()).await;

    assert_eq!(SpyConnector::disconnect_calls(&journal), 1);
    assert!(sink.contains("No command to be executed"));
    assert_eq!(controller.phase(), SessionPhase::Disconnected);
}

#[tokio::test]
async fn unavailable_context_skips_stop_hook() {
    init_tracing();

    let journal = journal();
    let controller = HookedConnector::new(
        hooks(Some("teardown.sh")),
        Box::new(SpyConnector::new(journal.clone())),
        Arc::new(UnavailableContext),
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    controller.disconnect(&session, sink.clone()).await;

    assert_eq!(SpyConnector::disconnect_calls(&journal), 1);
    assert!(sink.contains("Management context is not ready"));
    assert_eq!(controller.phase(), SessionPhase::Disconnected);
}
