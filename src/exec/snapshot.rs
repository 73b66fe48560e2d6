// src/exec/snapshot.rs

//! Best-effort resource snapshot of a running process.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;

/// Columns requested from `ps`.
pub const PS_COLUMNS: &str = "user,pid,%cpu,%mem,vsz,rss,tt,state,start,time";

/// Something that can describe a process by pid.
///
/// Failures are returned to the caller, which folds them into the
/// notification text via [`snapshot_or_error`]; they never abort a run.
pub trait ProcessSnapshot: Send + Sync {
    fn snapshot(&self, pid: u32) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;
}

/// Snapshot backed by the system `ps` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsSnapshot;

impl ProcessSnapshot for PsSnapshot {
    fn snapshot(&self, pid: u32) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        Box::pin(async move {
            let output = Command::new("ps")
                .arg("-p")
                .arg(pid.to_string())
                .arg("-o")
                .arg(PS_COLUMNS)
                .env("LC_ALL", "POSIX")
                .stdin(Stdio::null())
                .output()
                .await
                .with_context(|| format!("running ps for pid {pid}"))?;

            if !output.status.success() {
                bail!("ps exited with {} for pid {pid}", output.status);
            }

            Ok(format!(
                "```{}```",
                String::from_utf8_lossy(&output.stdout)
            ))
        })
    }
}

/// Run `snapshot`, embedding any error as text.
pub async fn snapshot_or_error<P: ProcessSnapshot + ?Sized>(snapshot: &P, pid: u32) -> String {
    match snapshot.snapshot(pid).await {
        Ok(text) => text,
        Err(err) => format!("snapshot unavailable: {err:#}"),
    }
}
