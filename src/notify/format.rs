// src/notify/format.rs

//! Rendering of status events into notification text.

use std::time::Duration;

use crate::engine::StatusEvent;

use super::{Notification, NotifyColor};

/// Body of the `Started` notification, before the snapshot.
pub const STARTED_MESSAGE: &str = "Exec Command";

/// Body of the `Succeeded` notification.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Text appended after the mentions on error notifications.
pub const ERROR_MENTION_SUFFIX: &str = "an error occurred";

impl Notification {
    pub fn from_event(title: &str, event: &StatusEvent) -> Self {
        let (body, color, mention) = match event {
            StatusEvent::Started { snapshot, .. } => (
                format!("{STARTED_MESSAGE}\n{snapshot}"),
                NotifyColor::Good,
                false,
            ),
            StatusEvent::Heartbeat {
                elapsed,
                started_at,
                snapshot,
            } => (
                format!(
                    "{} elapsed since {}\n{}",
                    format_elapsed(*elapsed),
                    started_at.format("%Y-%m-%d %H:%M:%S"),
                    snapshot
                ),
                NotifyColor::Good,
                false,
            ),
            StatusEvent::Succeeded => (SUCCESS_MESSAGE.to_string(), NotifyColor::Good, false),
            StatusEvent::Failed { reason } => (reason.clone(), NotifyColor::Danger, true),
        };

        Self {
            title: title.to_string(),
            body,
            color,
            mention,
        }
    }
}

/// `HH:MM:SS`; hours are not wrapped at 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Escape the three characters Slack treats as control sequences.
pub fn escape_message(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Add the `#` prefix to a bare channel name.
pub fn normalize_channel(channel: &str) -> String {
    if channel.is_empty() || channel.starts_with('#') {
        channel.to_string()
    } else {
        format!("#{channel}")
    }
}

/// Leading message text for error notifications, or empty when no mention
/// is wanted or none are configured.
pub fn mention_text(mentions: &[String], mention: bool) -> String {
    if !mention || mentions.is_empty() {
        return String::new();
    }
    format!("{} {ERROR_MENTION_SUFFIX}", mentions.join(" "))
}
