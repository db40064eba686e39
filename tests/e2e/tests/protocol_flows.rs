//! End-to-end protocol scenarios over real TCP

use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::time::timeout;

use msp_codec::MessageBuilder;
use msp_e2e_tests::{ann_and_bob, read_reply, send_frame, TestDaemon};

const LONG_IDLE_MS: u64 = 60_000;

#[tokio::test]
async fn two_messages_on_one_connection_get_two_acks() {
    let daemon = TestDaemon::spawn(ann_and_bob(), LONG_IDLE_MS).await;
    let mut stream = daemon.connect().await;

    let first = MessageBuilder::new()
        .recipient(&b"ann"[..])
        .body(&b"first note"[..])
        .sender(&b"bob"[..])
        .sender_terminal(&b"tty2"[..])
        .encode();
    send_frame(&mut stream, &first).await;
    assert_eq!(read_reply(&mut stream).await, b"+");

    let second = MessageBuilder::new()
        .recipient(&b"bob"[..])
        .body(&b"second note"[..])
        .sender(&b"ann"[..])
        .sender_terminal(&b"tty1"[..])
        .encode();
    send_frame(&mut stream, &second).await;
    assert_eq!(read_reply(&mut stream).await, b"+");

    let writes = daemon.sink.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].0, b"tty1");
    assert!(writes[0].1.contains("New message from bob:"));
    assert!(writes[0].1.contains("first note"));
    assert_eq!(writes[1].0, b"tty2");
    assert!(writes[1].1.contains("second note"));
}

#[tokio::test]
async fn idle_connection_is_closed_without_a_reply() {
    let daemon = TestDaemon::spawn(ann_and_bob(), 300).await;
    let mut stream = daemon.connect().await;

    // Send nothing. The server must close the socket after the idle
    // timeout; the client observes a clean end of stream with zero bytes
    // of reply.
    let mut buffer = [0u8; 16];
    let read = timeout(Duration::from_secs(5), stream.read(&mut buffer))
        .await
        .expect("server should have closed the idle connection")
        .expect("clean close, not an error");
    assert_eq!(read, 0);
    assert!(daemon.sink.writes().is_empty());
}

#[tokio::test]
async fn wildcard_broadcast_reaches_every_terminal() {
    let daemon = TestDaemon::spawn(ann_and_bob(), LONG_IDLE_MS).await;
    let mut stream = daemon.connect().await;

    let frame = MessageBuilder::new()
        .every_terminal()
        .body(&b"system going down"[..])
        .sender(&b"root"[..])
        .encode();
    send_frame(&mut stream, &frame).await;
    assert_eq!(read_reply(&mut stream).await, b"+");

    let targets: Vec<Vec<u8>> = daemon.sink.writes().into_iter().map(|(t, _)| t).collect();
    assert_eq!(targets, vec![b"tty1".to_vec(), b"tty2".to_vec()]);
}

#[tokio::test]
async fn unknown_recipient_is_refused_and_the_connection_survives() {
    let daemon = TestDaemon::spawn(ann_and_bob(), LONG_IDLE_MS).await;
    let mut stream = daemon.connect().await;

    let refused = MessageBuilder::new()
        .recipient(&b"carl"[..])
        .body(&b"hello?"[..])
        .sender(&b"ann"[..])
        .encode();
    send_frame(&mut stream, &refused).await;

    let reply = read_reply(&mut stream).await;
    assert_eq!(reply[0], b'-');
    let text = String::from_utf8_lossy(&reply[1..]).into_owned();
    assert!(text.contains("carl"), "{text}");
    assert!(daemon.sink.writes().is_empty());

    // Same connection, next attempt succeeds.
    let accepted = MessageBuilder::new()
        .recipient(&b"ann"[..])
        .body(&b"hello!"[..])
        .sender(&b"bob"[..])
        .encode();
    send_frame(&mut stream, &accepted).await;
    assert_eq!(read_reply(&mut stream).await, b"+");
}

#[tokio::test]
async fn malformed_frame_is_reported_and_the_connection_survives() {
    let daemon = TestDaemon::spawn(ann_and_bob(), LONG_IDLE_MS).await;
    let mut stream = daemon.connect().await;

    // Long enough to cross the read floor, but with no delimiters at all.
    send_frame(&mut stream, b"Bjunkjunkjunk").await;

    let reply = read_reply(&mut stream).await;
    assert_eq!(reply[0], b'-');
    assert!(String::from_utf8_lossy(&reply).contains("malformed"));

    let accepted = MessageBuilder::new()
        .recipient(&b"bob"[..])
        .body(&b"still here"[..])
        .sender(&b"ann"[..])
        .encode();
    send_frame(&mut stream, &accepted).await;
    assert_eq!(read_reply(&mut stream).await, b"+");
}

#[tokio::test]
async fn wrong_revision_is_refused_by_name() {
    let daemon = TestDaemon::spawn(ann_and_bob(), LONG_IDLE_MS).await;
    let mut stream = daemon.connect().await;

    // Well-formed shape (seven delimiters), unsupported leading revision.
    send_frame(&mut stream, b"Aann\0tty1\0hi\0bob\0tty2\0\0\0").await;

    let reply = read_reply(&mut stream).await;
    assert_eq!(reply[0], b'-');
    assert!(String::from_utf8_lossy(&reply).contains("B protocol revision"));
}

#[tokio::test]
async fn unknown_terminal_without_recipient_is_refused() {
    let daemon = TestDaemon::spawn(ann_and_bob(), LONG_IDLE_MS).await;
    let mut stream = daemon.connect().await;

    let frame = MessageBuilder::new()
        .recipient_terminal(&b"tty9"[..])
        .body(&b"anyone there?"[..])
        .sender(&b"ann"[..])
        .encode();
    send_frame(&mut stream, &frame).await;

    let reply = read_reply(&mut stream).await;
    assert!(String::from_utf8_lossy(&reply).contains("no such terminal as tty9"));
}

#[tokio::test]
async fn console_broadcast_routes_to_the_console_hook() {
    let daemon = TestDaemon::spawn(ann_and_bob(), LONG_IDLE_MS).await;
    let mut stream = daemon.connect().await;

    let frame = MessageBuilder::new()
        .body(&b"to whom it may concern"[..])
        .sender(&b"root"[..])
        .stamp_cookie()
        .encode();
    send_frame(&mut stream, &frame).await;
    assert_eq!(read_reply(&mut stream).await, b"+");

    assert!(daemon.sink.writes().is_empty());
    let console_writes = daemon.console.writes();
    assert_eq!(console_writes.len(), 1);
    assert!(console_writes[0].contains("to whom it may concern"));
}

#[tokio::test]
async fn sessions_are_independent_across_connections() {
    let daemon = TestDaemon::spawn(ann_and_bob(), LONG_IDLE_MS).await;
    let mut first = daemon.connect().await;
    let mut second = daemon.connect().await;

    // A failure on one connection must not disturb the other.
    send_frame(&mut first, b"Bjunkjunkjunk").await;
    assert_eq!(read_reply(&mut first).await[0], b'-');

    let frame = MessageBuilder::new()
        .recipient(&b"ann"[..])
        .body(&b"unaffected"[..])
        .sender(&b"bob"[..])
        .encode();
    send_frame(&mut second, &frame).await;
    assert_eq!(read_reply(&mut second).await, b"+");
}
