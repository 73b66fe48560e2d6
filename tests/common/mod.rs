#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub use runwatch_test_utils::{init_tracing, with_timeout};

use runwatch::engine::{Outcome, Supervisor};
use runwatch_test_utils::fakes::{FixedSnapshot, RecordingEcho, RecordingSink};

/// Text returned by the fake snapshot in supervisor tests.
pub const SNAPSHOT_TEXT: &str = "fake snapshot";

/// A shell script on disk, kept alive as long as the value is.
///
/// `command_line()` is `sh <path>`; temp paths contain no whitespace, so the
/// whitespace-only splitting of command strings is fine here.
pub struct Script {
    _dir: TempDir,
    path: PathBuf,
}

impl Script {
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("script.sh");
        fs::write(&path, body).expect("write script");
        Self { _dir: dir, path }
    }

    pub fn command_line(&self) -> String {
        format!("sh {}", self.path.display())
    }
}

/// Everything a supervised run left behind.
pub struct RunRecord {
    pub outcome: Outcome,
    pub sink: RecordingSink,
    pub echo: RecordingEcho,
}

/// Supervise `command_line` with recording fakes and a fixed snapshot.
pub async fn supervise(command_line: &str, interval: u64) -> RunRecord {
    supervise_with(command_line, interval, RecordingSink::new(), FixedSnapshot::ok(SNAPSHOT_TEXT)).await
}

pub async fn supervise_with(
    command_line: &str,
    interval: u64,
    sink: RecordingSink,
    snapshot: FixedSnapshot,
) -> RunRecord {
    let echo = RecordingEcho::new();
    let mut supervisor = Supervisor::new(sink.clone(), echo.clone(), snapshot);
    let outcome = with_timeout(supervisor.run(command_line, interval)).await;
    RunRecord { outcome, sink, echo }
}
