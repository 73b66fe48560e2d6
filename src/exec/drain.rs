// src/exec/drain.rs

//! Line-oriented readers for the child's output streams.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::types::{OutputLine, StreamOrigin};

/// Number of lines a drain may run ahead of the supervisor loop.
pub const DRAIN_CHANNEL_CAPACITY: usize = 64;

/// What a drain hands to the supervisor.
///
/// Lines and the completion signal share one channel so the supervisor can
/// only observe `Closed` after every line of that stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrainMessage {
    Line(OutputLine),
    Closed(StreamOrigin),
}

/// Spawn a Tokio task that reads `reader` line by line until end of stream.
///
/// - Each line is sent as `DrainMessage::Line`, without its `\n` / `\r\n`.
/// - A final line without a trailing newline is still delivered.
/// - Invalid UTF-8 is replaced rather than treated as an error.
/// - A read error ends the stream; it is logged at debug and not reported.
/// - `DrainMessage::Closed` is sent exactly once, last.
pub fn spawn_drain<R>(origin: StreamOrigin, reader: R) -> mpsc::Receiver<DrainMessage>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<DrainMessage>(DRAIN_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = OutputLine::new(origin, decode_line(&buf));
                    if tx.send(DrainMessage::Line(line)).await.is_err() {
                        debug!(stream = %origin, "drain receiver dropped; stopping");
                        return;
                    }
                }
                Err(e) => {
                    debug!(stream = %origin, error = %e, "read error; treating as end of stream");
                    break;
                }
            }
        }

        debug!(stream = %origin, "drain reached end of stream");
        let _ = tx.send(DrainMessage::Closed(origin)).await;
    });

    rx
}

/// Strip one trailing `\n` (and a preceding `\r`) and decode lossily.
fn decode_line(raw: &[u8]) -> String {
    let mut end = raw.len();
    if end > 0 && raw[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && raw[end - 1] == b'\r' {
            end -= 1;
        }
    }
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
