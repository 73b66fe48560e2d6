// src/notify/mod.rs

//! Delivery of status events to the outside world.
//!
//! The supervisor only knows about [`StatusSink`]. In production that sink is
//! a [`NotifyingSink`], which renders each `StatusEvent` into a
//! [`Notification`] (see [`format`]) and hands it to a [`NotificationSink`]
//! such as the Slack incoming-webhook client in [`slack`]. Tests swap in a
//! recording sink at either seam.

use std::future::Future;
use std::pin::Pin;

use crate::engine::StatusEvent;
use crate::errors::Result;

pub mod format;
pub mod slack;

pub use slack::SlackWebhook;

/// Attachment color of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyColor {
    /// Started, heartbeat, success.
    Good,
    /// Launch errors and failed runs.
    Danger,
}

impl NotifyColor {
    pub fn hex(&self) -> &'static str {
        match self {
            NotifyColor::Good => "#5CB589",
            NotifyColor::Danger => "#961D13",
        }
    }
}

/// One message for the notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub color: NotifyColor,
    /// Ping the configured mentions along with this message.
    pub mention: bool,
}

/// Transport for rendered notifications.
pub trait NotificationSink: Send + Sync {
    fn send(
        &self,
        notification: Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Receiver of the supervisor's status events.
///
/// Errors are reported back so the supervisor can log them; they never
/// influence the outcome of the run.
pub trait StatusSink: Send {
    fn emit(&mut self, event: StatusEvent) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Production `StatusSink`: render, then deliver through a `NotificationSink`.
#[derive(Debug)]
pub struct NotifyingSink<N> {
    title: String,
    notifier: N,
}

impl<N: NotificationSink> NotifyingSink<N> {
    /// `title` is shown on every notification; normally the command string.
    pub fn new(title: impl Into<String>, notifier: N) -> Self {
        Self {
            title: title.into(),
            notifier,
        }
    }
}

impl<N: NotificationSink> StatusSink for NotifyingSink<N> {
    fn emit(&mut self, event: StatusEvent) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let notification = Notification::from_event(&self.title, &event);
        Box::pin(async move { self.notifier.send(notification).await })
    }
}
