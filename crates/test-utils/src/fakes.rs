use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use runwatch::engine::StatusEvent;
use runwatch::errors::{Result, RunwatchError};
use runwatch::exec::{OutputEcho, ProcessSnapshot};
use runwatch::notify::{Notification, NotificationSink, StatusSink};
use runwatch::types::OutputLine;

/// A status sink that records every event it is given.
///
/// With `failing()`, each emit is still recorded but then reported as a
/// delivery error, to check that the supervisor shrugs it off.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<StatusEvent>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            events: Arc::default(),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn started_count(&self) -> usize {
        self.count(|e| matches!(e, StatusEvent::Started { .. }))
    }

    pub fn heartbeat_count(&self) -> usize {
        self.count(|e| matches!(e, StatusEvent::Heartbeat { .. }))
    }

    pub fn terminal_count(&self) -> usize {
        self.count(StatusEvent::is_terminal)
    }

    fn count(&self, pred: impl Fn(&StatusEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(*e)).count()
    }
}

impl StatusSink for RecordingSink {
    fn emit(&mut self, event: StatusEvent) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let events = Arc::clone(&self.events);
        let fail = self.fail;

        Box::pin(async move {
            events.lock().unwrap().push(event);
            if fail {
                return Err(RunwatchError::Other(anyhow::anyhow!(
                    "recording sink configured to fail"
                )));
            }
            Ok(())
        })
    }
}

/// An echo that keeps every forwarded line.
#[derive(Clone, Default)]
pub struct RecordingEcho {
    lines: Arc<Mutex<Vec<OutputLine>>>,
}

impl RecordingEcho {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<OutputLine> {
        self.lines.lock().unwrap().clone()
    }

    /// Texts of the lines from one stream, in forwarding order.
    pub fn texts(&self, origin: runwatch::types::StreamOrigin) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.origin == origin)
            .map(|l| l.text.clone())
            .collect()
    }
}

impl OutputEcho for RecordingEcho {
    fn echo(&mut self, line: &OutputLine) {
        self.lines.lock().unwrap().push(line.clone());
    }
}

/// A snapshot source that never touches the system.
#[derive(Clone, Debug)]
pub enum FixedSnapshot {
    Text(String),
    Error(String),
}

impl FixedSnapshot {
    pub fn ok(text: &str) -> Self {
        FixedSnapshot::Text(text.to_string())
    }

    pub fn err(message: &str) -> Self {
        FixedSnapshot::Error(message.to_string())
    }
}

impl ProcessSnapshot for FixedSnapshot {
    fn snapshot(&self, _pid: u32) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + '_>> {
        Box::pin(async move {
            match self {
                FixedSnapshot::Text(text) => Ok(text.clone()),
                FixedSnapshot::Error(message) => Err(anyhow::anyhow!("{message}")),
            }
        })
    }
}

/// A notification transport that records what it was asked to send.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn send(
        &self,
        notification: Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(notification);
            if self.fail {
                return Err(RunwatchError::WebhookStatus(500));
            }
            Ok(())
        })
    }
}
