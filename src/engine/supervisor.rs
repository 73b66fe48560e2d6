// src/engine/supervisor.rs

use std::time::Instant;

use chrono::{DateTime, Local};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, error, info, warn};

use crate::exec::{snapshot_or_error, spawn_drain, Command, DrainMessage, OutputEcho, ProcessSnapshot};
use crate::notify::StatusSink;
use crate::types::StreamOrigin;

use super::heartbeat::HeartbeatTimer;
use super::{Outcome, StatusEvent};

/// Where the supervision loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Child started; no output forwarded yet, or one drain already closed.
    Running,
    /// Both drains open and at least one line has been forwarded.
    Draining,
    /// Both drains have closed; the loop is done.
    Completed,
}

impl RunPhase {
    /// Phase implied by the drain states and whether any line was forwarded.
    pub fn from_streams(stdout_done: bool, stderr_done: bool, output_seen: bool) -> Self {
        match (stdout_done, stderr_done) {
            (true, true) => RunPhase::Completed,
            (false, false) if output_seen => RunPhase::Draining,
            _ => RunPhase::Running,
        }
    }
}

/// Mutable state of one run.
///
/// Created after a successful launch and only touched by the supervisor's
/// own loop.
struct RunState {
    child: Child,
    pid: u32,
    started: Instant,
    started_at: DateTime<Local>,
    timer: HeartbeatTimer,
    stdout_done: bool,
    stderr_done: bool,
    output_seen: bool,
}

impl RunState {
    fn new(child: Child, pid: u32, interval: u64) -> Self {
        Self {
            child,
            pid,
            started: Instant::now(),
            started_at: Local::now(),
            timer: HeartbeatTimer::new(interval),
            stdout_done: false,
            stderr_done: false,
            output_seen: false,
        }
    }

    fn phase(&self) -> RunPhase {
        RunPhase::from_streams(self.stdout_done, self.stderr_done, self.output_seen)
    }

    fn line_forwarded(&mut self) {
        self.output_seen = true;
    }

    fn mark_closed(&mut self, origin: StreamOrigin) {
        match origin {
            StreamOrigin::Stdout => self.stdout_done = true,
            StreamOrigin::Stderr => self.stderr_done = true,
        }
    }
}

/// Runs one command at a time, reporting its progress.
///
/// - `sink` receives the [`StatusEvent`]s.
/// - `echo` receives every output line as it is read.
/// - `snapshot` describes the child for `Started` and `Heartbeat` events.
pub struct Supervisor<S, E, P> {
    sink: S,
    echo: E,
    snapshot: P,
}

impl<S, E, P> Supervisor<S, E, P>
where
    S: StatusSink,
    E: OutputEcho,
    P: ProcessSnapshot,
{
    pub fn new(sink: S, echo: E, snapshot: P) -> Self {
        Self {
            sink,
            echo,
            snapshot,
        }
    }

    /// Launch `command_line`, supervise it to completion and report.
    ///
    /// `interval` is the heartbeat period in seconds; `0` disables
    /// heartbeats. Exactly one terminal event is emitted whatever happens.
    pub async fn run(&mut self, command_line: &str, interval: u64) -> Outcome {
        let command = match Command::parse(command_line) {
            Ok(command) => command,
            Err(err) => return self.launch_failed(err.to_string()).await,
        };

        info!(%command, interval, "launching command");

        // Both pipes are created inside `spawn` before the child is forked,
        // so failing to acquire them surfaces here with no child started.
        let mut child = match command.to_process().spawn() {
            Ok(child) => child,
            Err(err) => {
                return self
                    .launch_failed(format!("failed to start '{}': {err}", command.program()))
                    .await;
            }
        };

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                if let Err(err) = child.kill().await {
                    warn!(error = %err, "failed to kill child without output pipes");
                }
                return self
                    .launch_failed("child process output streams are unavailable".to_string())
                    .await;
            }
        };

        let pid = child.id().unwrap_or_default();
        let mut run = RunState::new(child, pid, interval);
        info!(pid, "command started");

        let snapshot = snapshot_or_error(&self.snapshot, pid).await;
        self.emit(StatusEvent::Started { pid, snapshot }).await;

        let mut stdout_rx = spawn_drain(StreamOrigin::Stdout, stdout);
        let mut stderr_rx = spawn_drain(StreamOrigin::Stderr, stderr);

        self.drive(&mut run, &mut stdout_rx, &mut stderr_rx).await;
        self.finish(run).await
    }

    /// Non-blocking multiplex over both drains and the heartbeat timer.
    ///
    /// Priority per iteration: stdout, then stderr, then the timer. The timer
    /// is only consulted when neither drain has anything ready, and the loop
    /// never awaits a drain; an idle iteration just yields to the scheduler.
    async fn drive(
        &mut self,
        run: &mut RunState,
        stdout_rx: &mut mpsc::Receiver<DrainMessage>,
        stderr_rx: &mut mpsc::Receiver<DrainMessage>,
    ) {
        while run.phase() != RunPhase::Completed {
            let message = poll_drain(StreamOrigin::Stdout, stdout_rx, run.stdout_done)
                .or_else(|| poll_drain(StreamOrigin::Stderr, stderr_rx, run.stderr_done));

            match message {
                Some(DrainMessage::Line(line)) => {
                    self.echo.echo(&line);
                    run.line_forwarded();
                }
                Some(DrainMessage::Closed(origin)) => {
                    debug!(stream = %origin, "drain closed");
                    run.mark_closed(origin);
                }
                None => {
                    self.check_heartbeat(run).await;
                    tokio::task::yield_now().await;
                }
            }
        }
    }

    async fn check_heartbeat(&mut self, run: &mut RunState) {
        let elapsed = run.started.elapsed();
        if !run.timer.poll(elapsed) {
            return;
        }

        debug!(
            pid = run.pid,
            elapsed_secs = elapsed.as_secs(),
            next_boundary = run.timer.next_boundary(),
            "heartbeat"
        );

        let snapshot = snapshot_or_error(&self.snapshot, run.pid).await;
        self.emit(StatusEvent::Heartbeat {
            elapsed,
            started_at: run.started_at,
            snapshot,
        })
        .await;
    }

    /// Reap the child and emit the terminal event.
    async fn finish(&mut self, mut run: RunState) -> Outcome {
        let outcome = match run.child.wait().await {
            Ok(status) if status.success() => Outcome::Success,
            Ok(status) => Outcome::Failure(status.to_string()),
            Err(err) => Outcome::Failure(format!("waiting for child process: {err}")),
        };

        info!(
            pid = run.pid,
            elapsed_secs = run.started.elapsed().as_secs(),
            success = outcome.is_success(),
            "command exited"
        );

        let event = match &outcome {
            Outcome::Success => StatusEvent::Succeeded,
            Outcome::Failure(reason) | Outcome::LaunchError(reason) => StatusEvent::Failed {
                reason: reason.clone(),
            },
        };
        self.emit(event).await;

        outcome
    }

    async fn launch_failed(&mut self, reason: String) -> Outcome {
        error!(%reason, "launch failed");
        self.emit(StatusEvent::Failed {
            reason: reason.clone(),
        })
        .await;
        Outcome::LaunchError(reason)
    }

    /// Deliver `event`; failures are logged and otherwise ignored.
    async fn emit(&mut self, event: StatusEvent) {
        if let Err(err) = self.sink.emit(event).await {
            warn!(error = %err, "status notification failed");
        }
    }
}

/// Take the next message from a drain without waiting.
///
/// A channel whose sender is gone counts as closed.
fn poll_drain(
    origin: StreamOrigin,
    rx: &mut mpsc::Receiver<DrainMessage>,
    done: bool,
) -> Option<DrainMessage> {
    if done {
        return None;
    }
    match rx.try_recv() {
        Ok(message) => Some(message),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(DrainMessage::Closed(origin)),
    }
}
