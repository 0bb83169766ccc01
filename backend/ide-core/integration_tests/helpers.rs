//! Shared helpers: a bound messaging server and a newline-delimited JSON
//! client standing in for an external IDE plugin.

use ide_core::MESSAGING_SERVER_HOSTNAME;
use ide_core::ipc::MessagingServer;
use ide_core::ipc::messages::{
    ClientMessage, HandshakeRequest, OpenFileResponse, ServerMessage,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

/// Create a server bound to an OS-assigned loopback port, writing its
/// metadata into `metadata_dir`.
pub async fn bound_server(metadata_dir: &Path) -> Arc<MessagingServer> {
    let server = Arc::new(MessagingServer::new(
        PathBuf::from("/bin/editor-host"),
        metadata_dir.to_path_buf(),
    ));
    server.listen().await;
    assert!(!server.is_disposed(), "server failed to bind");
    server
}

/// A fake external IDE talking the line protocol over loopback TCP.
pub struct TestIdeClient {
    reader: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestIdeClient {
    pub async fn connect(port: u16) -> Self {
        let stream = TcpStream::connect((MESSAGING_SERVER_HOSTNAME, port))
            .await
            .expect("connect to messaging server");
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half).lines(),
            writer: write_half,
        }
    }

    /// Connect and complete the handshake, asserting it was accepted.
    pub async fn connect_and_handshake(port: u16, identity: &str) -> Self {
        let mut client = Self::connect(port).await;
        client
            .send(&ClientMessage::Handshake(HandshakeRequest {
                identity: identity.to_string(),
            }))
            .await;

        match client.recv().await {
            ServerMessage::HandshakeResponse(response) if response.accepted => {}
            other => panic!("expected accepting handshake response, got {other:?}"),
        }
        client
    }

    pub async fn send(&mut self, message: &ClientMessage) {
        let mut line = serde_json::to_string(message).expect("serialize client message");
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .expect("send line");
    }

    /// Send an arbitrary protocol line, bypassing message serialization.
    pub async fn send_raw(&mut self, line: &str) {
        self.writer
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("send raw line");
    }

    /// Read the next server message, failing the test after 5 seconds.
    pub async fn recv(&mut self) -> ServerMessage {
        let line = tokio::time::timeout(Duration::from_secs(5), self.reader.next_line())
            .await
            .expect("timed out waiting for server message")
            .expect("read line")
            .expect("connection closed while expecting a message");
        serde_json::from_str(&line).expect("parse server message")
    }

    /// Assert that the server closes the connection without another message.
    pub async fn expect_closed(&mut self) {
        let next = tokio::time::timeout(Duration::from_secs(5), self.reader.next_line())
            .await
            .expect("timed out waiting for close")
            .expect("read line");
        assert_eq!(next, None, "expected connection close, got a message");
    }

    pub async fn acknowledge(&mut self) {
        self.send(&ClientMessage::OpenFileResponse(OpenFileResponse {}))
            .await;
    }
}

/// Poll `predicate` for up to two seconds; the registry is updated by a
/// background task, so tests observe it with a little patience.
pub async fn wait_until(predicate: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    predicate()
}
