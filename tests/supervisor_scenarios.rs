// tests/supervisor_scenarios.rs
mod common;
use crate::common::{init_tracing, supervise, supervise_with, Script, SNAPSHOT_TEXT};

use std::time::Duration;

use runwatch::engine::{Outcome, StatusEvent};
use runwatch::types::{OutputLine, StreamOrigin};
use runwatch_test_utils::fakes::{FixedSnapshot, RecordingSink};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn echo_hello_reports_started_then_success() {
    init_tracing();

    let run = supervise("echo hello", 5).await;

    assert_eq!(run.outcome, Outcome::Success);
    assert_eq!(run.outcome.exit_code(), 0);

    let events = run.sink.events();
    assert_eq!(events.len(), 2, "unexpected events: {events:?}");
    match &events[0] {
        StatusEvent::Started { pid, snapshot } => {
            assert!(*pid > 0);
            assert_eq!(snapshot, SNAPSHOT_TEXT);
        }
        other => panic!("expected Started first, got {other:?}"),
    }
    assert_eq!(events[1], StatusEvent::Succeeded);

    assert_eq!(
        run.echo.lines(),
        vec![OutputLine::new(StreamOrigin::Stdout, "hello")]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn false_reports_failure() {
    init_tracing();

    let run = supervise("false", 5).await;

    assert!(matches!(run.outcome, Outcome::Failure(_)), "got {:?}", run.outcome);
    assert_eq!(run.outcome.exit_code(), 1);

    assert_eq!(run.sink.started_count(), 1);
    assert_eq!(run.sink.heartbeat_count(), 0);
    assert_eq!(run.sink.terminal_count(), 1);

    match run.sink.events().last() {
        Some(StatusEvent::Failed { reason }) => {
            assert!(reason.contains('1'), "reason should carry the exit code: {reason}");
        }
        other => panic!("expected Failed last, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_executable_is_a_launch_error_without_started() {
    init_tracing();

    let run = supervise("runwatch-test-no-such-binary --flag", 5).await;

    match &run.outcome {
        Outcome::LaunchError(reason) => {
            assert!(reason.contains("runwatch-test-no-such-binary"), "{reason}");
        }
        other => panic!("expected LaunchError, got {other:?}"),
    }
    assert_eq!(run.outcome.exit_code(), 1);

    let events = run.sink.events();
    assert_eq!(events.len(), 1, "unexpected events: {events:?}");
    assert!(matches!(events[0], StatusEvent::Failed { .. }));
    assert!(run.echo.lines().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blank_command_is_a_launch_error() {
    init_tracing();

    let run = supervise("   ", 5).await;

    assert!(matches!(run.outcome, Outcome::LaunchError(_)));
    assert_eq!(run.sink.started_count(), 0);
    assert_eq!(run.sink.terminal_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lines_are_forwarded_per_stream_in_order_including_unterminated_tail() {
    init_tracing();

    let script = Script::new(
        "printf 'one\\ntwo\\n'\n\
         printf 'oops\\n' >&2\n\
         printf 'still bad\\n' >&2\n\
         printf 'three'\n",
    );

    let run = supervise(&script.command_line(), 5).await;

    assert_eq!(run.outcome, Outcome::Success);
    assert_eq!(
        run.echo.texts(StreamOrigin::Stdout),
        vec!["one", "two", "three"]
    );
    assert_eq!(
        run.echo.texts(StreamOrigin::Stderr),
        vec!["oops", "still bad"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn large_output_is_drained_without_deadlock() {
    init_tracing();

    let run = supervise("seq 1 20000", 5).await;

    assert_eq!(run.outcome, Outcome::Success);
    let expected: Vec<String> = (1..=20000).map(|n| n.to_string()).collect();
    assert_eq!(run.echo.texts(StreamOrigin::Stdout), expected);
    assert_eq!(run.sink.started_count(), 1);
    assert_eq!(run.sink.terminal_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failing_output_script_keeps_stderr_and_fails() {
    init_tracing();

    let script = Script::new("echo 'about to fail' >&2\nexit 3\n");

    let run = supervise(&script.command_line(), 5).await;

    match &run.outcome {
        Outcome::Failure(reason) => assert!(reason.contains('3'), "{reason}"),
        other => panic!("expected Failure, got {other:?}"),
    }
    assert_eq!(run.echo.texts(StreamOrigin::Stderr), vec!["about to fail"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn heartbeats_fire_once_per_elapsed_interval() {
    init_tracing();

    // Boundaries at 2s and 4s; the command ends at ~3s.
    let run = supervise("sleep 3", 2).await;

    assert_eq!(run.outcome, Outcome::Success);
    assert_eq!(run.sink.heartbeat_count(), 1);

    let events = run.sink.events();
    assert!(matches!(events.first(), Some(StatusEvent::Started { .. })));
    assert_eq!(events.last(), Some(&StatusEvent::Succeeded));
    match &events[1] {
        StatusEvent::Heartbeat {
            elapsed, snapshot, ..
        } => {
            assert!(*elapsed >= Duration::from_secs(2));
            assert!(*elapsed < Duration::from_secs(3));
            assert_eq!(snapshot, SNAPSHOT_TEXT);
        }
        other => panic!("expected Heartbeat, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn heartbeat_elapsed_values_strictly_increase() {
    init_tracing();

    let run = supervise("sleep 2", 1).await;

    let elapsed: Vec<Duration> = run
        .sink
        .events()
        .iter()
        .filter_map(|e| match e {
            StatusEvent::Heartbeat { elapsed, .. } => Some(*elapsed),
            _ => None,
        })
        .collect();

    assert!(
        (1..=2).contains(&elapsed.len()),
        "expected one or two heartbeats, got {elapsed:?}"
    );
    for (i, value) in elapsed.iter().enumerate() {
        assert!(*value >= Duration::from_secs(i as u64 + 1));
    }
    assert!(elapsed.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zero_interval_disables_heartbeats() {
    init_tracing();

    let run = supervise("sleep 1", 0).await;

    assert_eq!(run.outcome, Outcome::Success);
    assert_eq!(run.sink.heartbeat_count(), 0);
    assert_eq!(run.sink.events().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sink_errors_do_not_change_the_outcome() {
    init_tracing();

    let run = supervise_with(
        "echo hello",
        5,
        RecordingSink::failing(),
        FixedSnapshot::ok(SNAPSHOT_TEXT),
    )
    .await;

    assert_eq!(run.outcome, Outcome::Success);
    assert_eq!(run.sink.started_count(), 1);
    assert_eq!(run.sink.terminal_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn snapshot_errors_are_folded_into_started_event() {
    init_tracing();

    let run = supervise_with(
        "true",
        5,
        RecordingSink::new(),
        FixedSnapshot::err("ps is not installed"),
    )
    .await;

    assert_eq!(run.outcome, Outcome::Success);
    match run.sink.events().first() {
        Some(StatusEvent::Started { snapshot, .. }) => {
            assert!(snapshot.starts_with("snapshot unavailable"));
            assert!(snapshot.contains("ps is not installed"));
        }
        other => panic!("expected Started, got {other:?}"),
    }
}
