// src/engine/heartbeat.rs

//! Heartbeat boundary arithmetic.
//!
//! Everything here is pure: no clocks, no IO. The supervisor passes in the
//! elapsed time it measured.
//!
//! Boundaries sit at `interval, 2*interval, 3*interval, ...` seconds after
//! launch and are inclusive, so polling continuously over a run of `d`
//! seconds fires `d / interval` times.
//!
//! An interval of `0` disables heartbeats. Taken literally, the boundary
//! would stay at 0 forever and fire on every idle poll of the busy loop.

use std::time::Duration;

/// Has the run crossed `next_boundary`?
pub fn should_fire(elapsed_secs: u64, next_boundary: u64) -> bool {
    elapsed_secs >= next_boundary
}

/// The boundary after `next_boundary`.
pub fn advance(next_boundary: u64, interval: u64) -> u64 {
    next_boundary.saturating_add(interval)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatTimer {
    interval: u64,
    next_boundary: u64,
}

impl HeartbeatTimer {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval: interval_secs,
            next_boundary: interval_secs,
        }
    }

    pub fn next_boundary(&self) -> u64 {
        self.next_boundary
    }

    pub fn is_disabled(&self) -> bool {
        self.interval == 0
    }

    /// Check `elapsed` against the current boundary; on a hit, move to the
    /// next boundary and return `true`.
    ///
    /// One call fires at most once. If several boundaries were skipped
    /// (e.g. a slow notification), successive calls catch up one at a time.
    pub fn poll(&mut self, elapsed: Duration) -> bool {
        if self.is_disabled() || !should_fire(elapsed.as_secs(), self.next_boundary) {
            return false;
        }
        self.next_boundary = advance(self.next_boundary, self.interval);
        true
    }
}
