// src/engine/mod.rs

//! Command supervision engine.
//!
//! This module ties together:
//! - the child process lifecycle (spawn, reap, classify)
//! - the two output drains
//! - the heartbeat timer
//! - the status events reported while the command runs
//!
//! The pure boundary arithmetic lives in [`heartbeat`]; the async loop that
//! multiplexes drain output against the timer is in [`supervisor`].

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::cli::{EXIT_ERR, EXIT_OK};

/// Status reported to the notification channel during one run.
///
/// A run produces exactly one terminal event (`Succeeded` or `Failed`).
/// `Started` precedes it unless the launch itself failed, and any
/// `Heartbeat`s fall in between with strictly increasing `elapsed`.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// The child process is running.
    Started { pid: u32, snapshot: String },
    /// Periodic liveness report.
    Heartbeat {
        elapsed: Duration,
        started_at: DateTime<Local>,
        snapshot: String,
    },
    /// The child exited with status zero.
    Succeeded,
    /// The child could not be launched, or exited unsuccessfully.
    Failed { reason: String },
}

impl StatusEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusEvent::Succeeded | StatusEvent::Failed { .. })
    }
}

/// Final result of supervising one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The child ran but exited non-zero, was killed by a signal, or could
    /// not be waited on.
    Failure(String),
    /// The child was never started.
    LaunchError(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Process exit code for the overall tool.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { EXIT_OK } else { EXIT_ERR }
    }
}

pub mod heartbeat;
pub mod supervisor;

pub use heartbeat::HeartbeatTimer;
pub use supervisor::{RunPhase, Supervisor};
