//! Harness for end-to-end protocol tests
//!
//! Runs the real daemon in-process — real listener, real sessions, real
//! codec — with in-memory collaborators standing in for the login database
//! and `/dev`, on an ephemeral localhost port. Tests talk to it over plain
//! `TcpStream`s exactly like a remote client would.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use msp_delivery::test_utils::{RecordingConsole, RecordingSink, StaticDirectory};
use msp_delivery::Dispatcher;
use msp_types::protocol_constants::{ACK_SUCCESS, FIELD_DELIMITER};
use msp_types::TerminalSession;
use mspd::{DaemonConfig, Listener};

/// An in-process daemon plus handles to everything it wrote.
pub struct TestDaemon {
    pub addr: SocketAddr,
    pub sink: Arc<RecordingSink>,
    pub console: Arc<RecordingConsole>,
    accept_loop: JoinHandle<std::io::Result<()>>,
}

impl TestDaemon {
    /// Spawn a daemon serving `sessions` with the given idle timeout.
    pub async fn spawn(sessions: Vec<TerminalSession>, idle_timeout_ms: u64) -> Self {
        let mut config = DaemonConfig::default();
        config.listen.address = "127.0.0.1".to_string();
        config.listen.port = 0;
        config.session.idle_timeout_ms = idle_timeout_ms;

        let sink = Arc::new(RecordingSink::default());
        let console = Arc::new(RecordingConsole::default());
        let dispatcher = Dispatcher::new(
            Arc::new(StaticDirectory::new(sessions)),
            sink.clone(),
            console.clone(),
            config.delivery.columns,
        );

        let listener = Listener::bind(&config, dispatcher)
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let accept_loop = tokio::spawn(listener.run());

        Self {
            addr,
            sink,
            console,
            accept_loop,
        }
    }

    pub async fn connect(&self) -> TcpStream {
        TcpStream::connect(self.addr).await.expect("connect")
    }
}

impl Drop for TestDaemon {
    fn drop(&mut self) {
        self.accept_loop.abort();
    }
}

/// The usual two-user directory the protocol scenarios are written against.
pub fn ann_and_bob() -> Vec<TerminalSession> {
    vec![
        TerminalSession::new(&b"ann"[..], &b"tty1"[..]),
        TerminalSession::new(&b"bob"[..], &b"tty2"[..]),
    ]
}

/// Write one frame in a single send, the way real clients do.
pub async fn send_frame(stream: &mut TcpStream, frame: &[u8]) {
    stream.write_all(frame).await.expect("send frame");
}

/// Read one acknowledgement: the success marker alone, or the failure
/// marker followed by NUL-terminated text (returned without the NUL).
pub async fn read_reply(stream: &mut TcpStream) -> Vec<u8> {
    let marker = stream.read_u8().await.expect("reply marker");
    let mut reply = vec![marker];
    if marker == ACK_SUCCESS {
        return reply;
    }
    loop {
        let byte = stream.read_u8().await.expect("reply text");
        if byte == FIELD_DELIMITER {
            return reply;
        }
        reply.push(byte);
    }
}
