// tests/drain_lines.rs

use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use runwatch::exec::{spawn_drain, DrainMessage};
use runwatch::types::{OutputLine, StreamOrigin};
use runwatch_test_utils::with_timeout;

/// Receive until `Closed`, asserting nothing follows it.
async fn collect(mut rx: mpsc::Receiver<DrainMessage>) -> Vec<DrainMessage> {
    let mut out = Vec::new();
    while let Some(msg) = rx.recv().await {
        let closed = matches!(msg, DrainMessage::Closed(_));
        out.push(msg);
        if closed {
            break;
        }
    }
    assert!(rx.recv().await.is_none(), "nothing may follow Closed");
    out
}

fn line(origin: StreamOrigin, text: &str) -> DrainMessage {
    DrainMessage::Line(OutputLine::new(origin, text))
}

#[tokio::test]
async fn lines_then_single_close() {
    let rx = spawn_drain(StreamOrigin::Stdout, &b"alpha\nbeta\n"[..]);

    let got = with_timeout(collect(rx)).await;

    assert_eq!(
        got,
        vec![
            line(StreamOrigin::Stdout, "alpha"),
            line(StreamOrigin::Stdout, "beta"),
            DrainMessage::Closed(StreamOrigin::Stdout),
        ]
    );
}

#[tokio::test]
async fn unterminated_last_line_is_delivered() {
    let rx = spawn_drain(StreamOrigin::Stderr, &b"first\nlast"[..]);

    let got = with_timeout(collect(rx)).await;

    assert_eq!(
        got,
        vec![
            line(StreamOrigin::Stderr, "first"),
            line(StreamOrigin::Stderr, "last"),
            DrainMessage::Closed(StreamOrigin::Stderr),
        ]
    );
}

#[tokio::test]
async fn crlf_blank_lines_and_invalid_utf8() {
    let rx = spawn_drain(StreamOrigin::Stdout, &b"dos\r\n\nbad \xff byte\n"[..]);

    let got = with_timeout(collect(rx)).await;

    assert_eq!(
        got,
        vec![
            line(StreamOrigin::Stdout, "dos"),
            line(StreamOrigin::Stdout, ""),
            line(StreamOrigin::Stdout, "bad \u{FFFD} byte"),
            DrainMessage::Closed(StreamOrigin::Stdout),
        ]
    );
}

#[tokio::test]
async fn empty_stream_only_closes() {
    let rx = spawn_drain(StreamOrigin::Stdout, &b""[..]);

    let got = with_timeout(collect(rx)).await;

    assert_eq!(got, vec![DrainMessage::Closed(StreamOrigin::Stdout)]);
}

#[tokio::test]
async fn drain_follows_a_live_writer_until_it_closes() {
    let (mut writer, reader) = tokio::io::duplex(16);
    let rx = spawn_drain(StreamOrigin::Stdout, reader);

    tokio::spawn(async move {
        for i in 0..100 {
            writer
                .write_all(format!("line {i}\n").as_bytes())
                .await
                .unwrap();
        }
        // Dropping the writer ends the stream.
    });

    let got = with_timeout(collect(rx)).await;

    assert_eq!(got.len(), 101);
    for (i, msg) in got.iter().take(100).enumerate() {
        assert_eq!(msg, &line(StreamOrigin::Stdout, &format!("line {i}")));
    }
    assert_eq!(got[100], DrainMessage::Closed(StreamOrigin::Stdout));
}
