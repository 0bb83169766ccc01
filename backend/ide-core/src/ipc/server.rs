//! The messaging server external IDEs connect to.
//!
//! A process-local TCP server bound to the loopback interface. External
//! IDE plugins connect, identify themselves with a handshake line, and
//! then receive open-file requests pushed by the launch strategies.
//!
//! # Protocol
//!
//! Newline-delimited JSON. See [`crate::ipc::messages`] for the message
//! definitions. The first line of every connection MUST be a handshake;
//! anything else closes the connection (fail-closed).
//!
//! # Lifecycle
//!
//! The server is created by the IDE manager and recreated lazily whenever
//! [`MessagingServer::is_disposed`] reports true. Bind failures do not
//! surface as errors; they leave the server disposed and the next access
//! builds a fresh one.
//!
//! # Security
//!
//! - Binds to `127.0.0.1` only (no network exposure)
//! - Rejects non-loopback connections

use crate::MESSAGING_SERVER_BIND_ADDRESS;
use crate::error::ipc::IpcError;
use crate::ipc::clients::{ClientRegistry, ConnectedClient};
use crate::ipc::messages::{
    ClientMessage, HandshakeResponse, OpenFileRequest, ServerMessage,
};

use common::ErrorLocation;

use std::net::SocketAddr;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn as TokioSpawn;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Name of the metadata file advertising the server port.
///
/// Written to the project metadata directory as `<port>\n<host executable>`
/// so IDE plugins can find the server without any prior agreement on a
/// port number. Removed again on disposal.
pub const META_FILE_NAME: &str = "ipc_meta.txt";

/// Accepts connections from external IDE processes and routes open-file
/// requests to them by identity.
pub struct MessagingServer {
    registry: ClientRegistry,
    disposed: Arc<AtomicBool>,
    port: AtomicU16,
    host_executable: PathBuf,
    metadata_dir: PathBuf,
    accept_task: Mutex<Option<JoinHandle<()>>>,
}

impl MessagingServer {
    /// `host_executable` is recorded in the metadata file so IDE plugins
    /// can tell which editor instance the server belongs to.
    pub fn new(host_executable: PathBuf, metadata_dir: PathBuf) -> Self {
        Self {
            registry: ClientRegistry::new(),
            disposed: Arc::new(AtomicBool::new(false)),
            port: AtomicU16::new(0),
            host_executable,
            metadata_dir,
            accept_task: Mutex::new(None),
        }
    }

    /// Bind the loopback endpoint and start accepting connections in the
    /// background.
    ///
    /// Does not return an error: a bind failure is logged and leaves the
    /// server disposed, which the owning manager detects on next use and
    /// answers by creating a fresh server.
    pub async fn listen(&self) {
        let listener = match TcpListener::bind(MESSAGING_SERVER_BIND_ADDRESS).await {
            Ok(listener) => listener,
            Err(e) => {
                let err = IpcError::Bind {
                    message: format!("Failed to bind {MESSAGING_SERVER_BIND_ADDRESS}: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                };
                error!("{err}");
                self.disposed.store(true, Ordering::SeqCst);
                return;
            }
        };

        let port = match listener.local_addr() {
            Ok(addr) => addr.port(),
            Err(e) => {
                error!("Failed to read messaging server address: {e}");
                self.disposed.store(true, Ordering::SeqCst);
                return;
            }
        };
        self.port.store(port, Ordering::SeqCst);

        info!("Messaging server listening on port {port}");
        self.write_meta_file(port);

        let registry = self.registry.clone();
        let disposed = Arc::clone(&self.disposed);

        let task = TokioSpawn(async move {
            while let Ok((stream, addr)) = listener.accept().await {
                debug!("Client connecting from {addr}");
                let registry_clone = registry.clone();
                TokioSpawn(async move {
                    if let Err(e) = handle_connection(stream, addr, registry_clone).await {
                        warn!("Connection from {addr} ended with error: {e}");
                    }
                });
            }

            // Accept only fails when the listener broke underneath us;
            // leave the server disposed so the manager rebuilds it.
            warn!("Messaging server accept loop ended");
            disposed.store(true, Ordering::SeqCst);
        });

        let mut guard = self.accept_task.lock().expect("accept task lock poisoned");
        *guard = Some(task);
    }

    /// The OS-assigned port, once [`listen`](Self::listen) has bound.
    pub fn port(&self) -> Option<u16> {
        match self.port.load(Ordering::SeqCst) {
            0 => None,
            port => Some(port),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Whether at least one live session is registered under `identity`.
    pub fn is_any_connected(&self, identity: &str) -> bool {
        self.registry.is_any_connected(identity)
    }

    /// Suspend until a client with `identity` is connected.
    ///
    /// Resolves immediately when one is already registered; interest is
    /// recorded before the first suspension point, so a connection racing
    /// this call is never missed. Also resolves if the server is disposed
    /// while waiting (a subsequent broadcast then reaches no one, which is
    /// within the best-effort delivery contract).
    pub async fn await_client_connected(&self, identity: &str) {
        let receiver = self.registry.subscribe_connected(identity);
        let _ = receiver.await;
    }

    /// Queue `request` to every connected client under `identity`.
    ///
    /// Fire-and-forget: returns once the sends are queued locally, without
    /// waiting for any acknowledgement. Send failures are logged, never
    /// retried.
    pub fn broadcast_request(&self, identity: &str, request: OpenFileRequest) -> usize {
        let message = ServerMessage::OpenFileRequest(request);
        let sent = self.registry.broadcast(identity, &message);
        debug!("Broadcast open-file request to {sent} client(s) with identity '{identity}'");
        sent
    }

    /// Tear the server down: stop accepting, drop every session, remove
    /// the metadata file. Idempotent.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        let mut guard = self.accept_task.lock().expect("accept task lock poisoned");
        if let Some(task) = guard.take() {
            task.abort();
        }

        self.registry.clear();
        self.remove_meta_file();
        info!("Messaging server disposed");
    }

    /// Register a client directly, bypassing the socket handshake. The
    /// returned receiver plays the connection's writer task.
    #[cfg(test)]
    pub(crate) fn register_test_client(
        &self,
        identity: &str,
    ) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.registry.register(ConnectedClient {
            session_id: Uuid::new_v4(),
            identity: identity.to_string(),
            sender,
            connected_at: Instant::now(),
        });
        receiver
    }

    fn meta_file_path(&self) -> PathBuf {
        self.metadata_dir.join(META_FILE_NAME)
    }

    fn write_meta_file(&self, port: u16) {
        let contents = format!("{port}\n{}\n", self.host_executable.display());
        if let Err(e) = std::fs::write(self.meta_file_path(), contents) {
            // Non-fatal: direct-connection IDE plugins still work.
            warn!(
                "Failed to write messaging metadata file {}: {e}",
                self.meta_file_path().display()
            );
        }
    }

    fn remove_meta_file(&self) {
        if let Err(e) = std::fs::remove_file(self.meta_file_path()) {
            debug!("Messaging metadata file not removed: {e}");
        }
    }
}

impl Drop for MessagingServer {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Handle a single IDE connection.
///
/// 1. **Rejects non-loopback peers** (silently; no information leak)
/// 2. Requires a handshake as the first line (fail-closed)
/// 3. Registers the client, waking any connection waiters
/// 4. Reads acknowledgements until the IDE disconnects
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    registry: ClientRegistry,
) -> Result<(), IpcError> {
    if !addr.ip().is_loopback() {
        warn!("Rejected non-loopback connection from {addr}");
        return Ok(());
    }

    let (read_half, write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    let first_line = match lines.next_line().await {
        Ok(Some(line)) => line,
        Ok(None) => {
            debug!("Client {addr} disconnected before handshake");
            return Ok(());
        }
        Err(e) => {
            return Err(IpcError::Read {
                message: format!("Error reading handshake line: {e}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    let identity = match serde_json::from_str::<ClientMessage>(&first_line) {
        Ok(ClientMessage::Handshake(handshake)) => handshake.identity,
        Ok(_) => {
            warn!("Client {addr} rejected: first message was not a handshake");
            return Ok(());
        }
        Err(e) => {
            return Err(IpcError::Handshake {
                message: format!("Malformed handshake from {addr}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    let session_id = Uuid::new_v4();
    let (sender, receiver) = mpsc::unbounded_channel();
    TokioSpawn(write_messages(write_half, receiver, session_id));

    // Queue the handshake response before registration so it is the first
    // message on the wire even if a broadcast lands immediately after.
    let response = ServerMessage::HandshakeResponse(HandshakeResponse {
        accepted: true,
        error: None,
    });
    sender.send(response).map_err(|e| IpcError::Send {
        message: format!("Failed to queue handshake response: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    info!("Client '{identity}' connected from {addr} (session {session_id})");
    registry.register(ConnectedClient {
        session_id,
        identity: identity.clone(),
        sender,
        connected_at: Instant::now(),
    });

    while let Some(line) = lines.next_line().await.transpose() {
        match line {
            Ok(line) => match serde_json::from_str::<ClientMessage>(&line) {
                Ok(ClientMessage::OpenFileResponse(_)) => {
                    debug!("Client '{identity}' acknowledged open-file request");
                }
                Ok(ClientMessage::Handshake(_)) => {
                    warn!("Client '{identity}' sent a second handshake; ignoring");
                }
                Err(e) => {
                    let err = IpcError::from(e);
                    warn!("Unreadable message from '{identity}': {err}");
                }
            },
            Err(e) => {
                registry.unregister(&identity, session_id);
                return Err(IpcError::Read {
                    message: format!("Error reading from '{identity}': {e}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }
    }

    registry.unregister(&identity, session_id);
    info!("Client '{identity}' disconnected (session {session_id})");
    Ok(())
}

/// Writer task: drains the session's outbound queue onto the socket.
///
/// Ends when the registry drops the sender (disconnect or disposal) or a
/// write fails; transport failures are logged, not retried.
async fn write_messages(
    mut write_half: OwnedWriteHalf,
    mut receiver: mpsc::UnboundedReceiver<ServerMessage>,
    session_id: Uuid,
) {
    while let Some(message) = receiver.recv().await {
        let mut payload = match serde_json::to_string(&message) {
            Ok(json) => json,
            Err(e) => {
                let err = IpcError::Encode {
                    message: format!("Failed to encode message for session {session_id}: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                };
                warn!("{err}");
                continue;
            }
        };
        payload.push('\n');

        if let Err(e) = write_half.write_all(payload.as_bytes()).await {
            warn!("Failed to send message to session {session_id}: {e}");
            break;
        }
    }
}
