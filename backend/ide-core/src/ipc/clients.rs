//! Connected-client bookkeeping for the messaging server.
//!
//! The registry is the only shared mutable structure in the subsystem: the
//! background accept loop registers clients while the foreground manager
//! thread queries and broadcasts. Both maps live behind one mutex with
//! short critical sections.
//!
//! Waiter registration and client registration take the same lock, so a
//! connection that races [`ClientRegistry::subscribe_connected`] can never
//! be missed: either the client is already in the map (the waiter is
//! satisfied immediately) or the registration that follows drains the
//! waiter list.

use crate::ipc::messages::ServerMessage;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// A live session between an external IDE and the messaging server.
///
/// Owned exclusively by the registry; dropping it closes the outbound
/// channel, which ends the connection's writer task.
pub(crate) struct ConnectedClient {
    pub session_id: Uuid,
    pub identity: String,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
    pub connected_at: Instant,
}

#[derive(Default)]
struct RegistryInner {
    clients: HashMap<String, Vec<ConnectedClient>>,
    waiters: HashMap<String, Vec<oneshot::Sender<()>>>,
}

/// Identity -> sessions map shared between the accept loop and the manager.
#[derive(Clone, Default)]
pub(crate) struct ClientRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl ClientRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a freshly handshaken client and wake every waiter
    /// subscribed to its identity.
    pub(crate) fn register(&self, client: ConnectedClient) {
        let mut inner = self.inner.lock().expect("client registry poisoned");

        debug!(
            "Registering client '{}' (session {})",
            client.identity, client.session_id
        );

        if let Some(waiters) = inner.waiters.remove(&client.identity) {
            for waiter in waiters {
                // A dropped receiver just means the awaiting side timed out.
                let _ = waiter.send(());
            }
        }

        inner
            .clients
            .entry(client.identity.clone())
            .or_default()
            .push(client);
    }

    /// Remove a session after disconnect. Unknown sessions are ignored.
    pub(crate) fn unregister(&self, identity: &str, session_id: Uuid) {
        let mut inner = self.inner.lock().expect("client registry poisoned");

        if let Some(sessions) = inner.clients.get_mut(identity) {
            if let Some(client) = sessions.iter().find(|c| c.session_id == session_id) {
                debug!(
                    "Unregistering client '{identity}' (session {session_id}, connected {:?})",
                    client.connected_at.elapsed()
                );
            }
            sessions.retain(|c| c.session_id != session_id);
            if sessions.is_empty() {
                inner.clients.remove(identity);
            }
        }
    }

    pub(crate) fn is_any_connected(&self, identity: &str) -> bool {
        let inner = self.inner.lock().expect("client registry poisoned");
        inner
            .clients
            .get(identity)
            .is_some_and(|sessions| !sessions.is_empty())
    }

    /// Subscribe to "a client with `identity` is connected".
    ///
    /// The returned receiver resolves immediately when such a client is
    /// already registered, otherwise on the next registration. Interest is
    /// recorded under the registry lock before this call returns.
    pub(crate) fn subscribe_connected(&self, identity: &str) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.lock().expect("client registry poisoned");

        let already_connected = inner
            .clients
            .get(identity)
            .is_some_and(|sessions| !sessions.is_empty());

        if already_connected {
            let _ = tx.send(());
        } else {
            let waiters = inner.waiters.entry(identity.to_string()).or_default();
            // Waiters whose receiver timed out would otherwise pile up
            // until the identity's next registration.
            waiters.retain(|waiter| !waiter.is_closed());
            waiters.push(tx);
        }

        rx
    }

    #[cfg(test)]
    pub(crate) fn waiter_count(&self, identity: &str) -> usize {
        let inner = self.inner.lock().expect("client registry poisoned");
        inner.waiters.get(identity).map_or(0, Vec::len)
    }

    /// Queue `message` to every session under `identity`.
    ///
    /// Best effort: a failed send means the client disconnected while the
    /// message was in flight, which the reader task cleans up.
    pub(crate) fn broadcast(&self, identity: &str, message: &ServerMessage) -> usize {
        let inner = self.inner.lock().expect("client registry poisoned");

        let Some(sessions) = inner.clients.get(identity) else {
            debug!("No connected clients with identity '{identity}'");
            return 0;
        };

        let mut sent = 0;
        for session in sessions {
            match session.sender.send(message.clone()) {
                Ok(()) => sent += 1,
                Err(e) => warn!(
                    "Failed to queue message for '{}' (session {}): {e}",
                    session.identity, session.session_id
                ),
            }
        }
        sent
    }

    /// Drop every session and waiter. Used on server disposal.
    pub(crate) fn clear(&self) {
        let mut inner = self.inner.lock().expect("client registry poisoned");
        inner.clients.clear();
        inner.waiters.clear();
    }
}
