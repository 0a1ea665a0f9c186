// tests/controller_hooks.rs

mod common;
use crate::common::init_tracing;

use std::sync::Arc;

use nodehook::connector::{NodeConnector, NodeSession};
use nodehook::controller::{HookedConnector, SessionPhase};
use nodehook::errors::NodehookError;
use nodehook::hook::HookConfig;
use nodehook::sink::SharedSink;
use nodehook_test_utils::doubles::{
    journal, journal_entries, BufferSink, FakeContext, FakeLauncher, Journal, SpyConnector,
    UnavailableContext,
};

fn hooks(start: Option<&str>, stop: Option<&str>) -> HookConfig {
    HookConfig::new(start.map(String::from), stop.map(String::from))
}

fn run_entries(journal: &Journal) -> Vec<String> {
    journal_entries(journal)
        .into_iter()
        .filter(|e| e.starts_with("run:"))
        .collect()
}

#[tokio::test]
async fn empty_start_command_skips_hook_and_connects() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(FakeLauncher::new(journal.clone()));
    let controller = HookedConnector::new(
        hooks(None, None),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let shared: SharedSink = sink.clone();
    let session = NodeSession::new("agent-1");

    controller
        .connect(&session, shared)
        .await
        .expect("connect should succeed without a start hook");

    assert!(run_entries(&journal).is_empty(), "no process may be spawned");
    assert_eq!(SpyConnector::connect_calls(&journal), 1);
    assert!(sink.contains("No command to be executed"));
    assert_eq!(controller.phase(), SessionPhase::Connected);
}

#[tokio::test]
async fn failing_start_hook_aborts_connect() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(FakeLauncher::new(journal.clone()).exit_code("provision.sh", 1));
    let controller = HookedConnector::new(
        hooks(Some("provision.sh"), None),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    let result = controller.connect(&session, sink.clone()).await;

    assert!(matches!(result, Err(NodehookError::HookFailed(1))));
    assert_eq!(SpyConnector::connect_calls(&journal), 0);
    assert!(sink.contains("Start command failed with return code 1"));
    assert_eq!(controller.phase(), SessionPhase::StartHookFailed);
}

#[tokio::test]
async fn start_hook_spawn_failure_aborts_connect() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(
        FakeLauncher::new(journal.clone()).spawn_error("provision.sh", "missing interpreter"),
    );
    let controller = HookedConnector::new(
        hooks(Some("provision.sh"), None),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    let result = controller.connect(&session, sink.clone()).await;

    assert!(matches!(result, Err(NodehookError::HookSpawn(_))));
    assert_eq!(SpyConnector::connect_calls(&journal), 0);
}

#[tokio::test]
async fn unavailable_context_fails_open_on_connect() {
    init_tracing();

    let journal = journal();
    let controller = HookedConnector::new(
        hooks(Some("provision.sh"), None),
        Box::new(SpyConnector::new(journal.clone())),
        Arc::new(UnavailableContext),
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    controller
        .connect(&session, sink.clone())
        .await
        .expect("connect should proceed without a management context");

    assert!(run_entries(&journal).is_empty());
    assert_eq!(SpyConnector::connect_calls(&journal), 1);
    assert!(sink.contains("Management context is not ready"));
}

#[tokio::test]
async fn delegate_disconnect_runs_before_stop_hook() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(FakeLauncher::new(journal.clone()));
    let controller = HookedConnector::new(
        hooks(None, Some("teardown.sh")),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    controller.disconnect(&session, sink.clone()).await;

    let entries = journal_entries(&journal);
    assert_eq!(
        entries,
        vec!["disconnect:agent-1".to_string(), "run:teardown.sh".to_string()]
    );
    assert_eq!(controller.phase(), SessionPhase::Disconnected);
}

#[tokio::test]
async fn repeated_disconnects_each_attempt_stop_hook() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(FakeLauncher::new(journal.clone()));
    let controller = HookedConnector::new(
        hooks(None, Some("teardown.sh")),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    controller.disconnect(&session, sink.clone()).await;
    controller.disconnect(&session, sink.clone()).await;

    assert_eq!(SpyConnector::disconnect_calls(&journal), 2);
    assert_eq!(run_entries(&journal).len(), 2);
}

#[tokio::test]
async fn delegate_connect_errors_propagate_verbatim() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(FakeLauncher::new(journal.clone()));
    let controller = HookedConnector::new(
        hooks(Some("provision.sh"), None),
        Box::new(SpyConnector::failing_connect(journal.clone(), "node exploded")),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    let err = controller
        .connect(&session, sink.clone())
        .await
        .expect_err("delegate failure must surface");

    assert!(err.to_string().contains("node exploded"));
    // The hook ran first, then the delegate was invoked.
    let entries = journal_entries(&journal);
    assert_eq!(
        entries,
        vec!["run:provision.sh".to_string(), "connect:agent-1".to_string()]
    );
}

#[tokio::test]
async fn hook_output_reaches_the_sink_in_order() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(
        FakeLauncher::new(journal.clone())
            .output_line("provision.sh", "allocating instance")
            .output_line("provision.sh", "instance ready"),
    );
    let controller = HookedConnector::new(
        hooks(Some("provision.sh"), None),
        Box::new(SpyConnector::new(journal.clone())),
        context,
    );

    let sink = BufferSink::new();
    let session = NodeSession::new("agent-1");

    controller
        .connect(&session, sink.clone())
        .await
        .expect("connect should succeed");

    let first = sink.index_of("allocating instance").unwrap();
    let second = sink.index_of("instance ready").unwrap();
    let notice = sink.index_of("Start command executed successfully").unwrap();
    assert!(first < second);
    assert!(second < notice);
}

#[tokio::test]
async fn is_supported_passes_through_to_the_delegate() {
    init_tracing();

    let journal = journal();
    let context = FakeContext::new(FakeLauncher::new(journal.clone()));
    let controller = HookedConnector::new(
        hooks(None, None),
        Box::new(SpyConnector::unsupported(journal.clone())),
        context,
    );

    assert!(!controller.is_supported());
}
