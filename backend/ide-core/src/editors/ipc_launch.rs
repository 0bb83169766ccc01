//! Shared machinery for editors that connect back over the messaging
//! server (MonoDevelop, Visual Studio for Mac).
//!
//! These strategies own the process they spawn: the handle lives in
//! [`LaunchState`] until the strategy is replaced or the process is judged
//! dead, and nobody else ever holds it.

use crate::error::launch::LaunchError;
use crate::ipc::MessagingServer;
use crate::ipc::messages::OpenFileRequest;
use crate::os;

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error};
use tokio::process::Child;
use tokio::spawn as TokioSpawn;
use tokio::time::timeout as TokioTimeout;

/// After launch we wait up to 30 seconds for the IDE to connect to the
/// messaging server before assuming the process is stuck.
pub(crate) const CONNECT_GRACE_WINDOW: Duration = Duration::from_secs(30);

/// Bound on waiting for a spawned editor to register before an open-file
/// request is abandoned.
pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-strategy launch bookkeeping: the last spawned process, when it was
/// spawned, and the resolved executable path.
#[derive(Debug)]
pub(crate) struct LaunchState {
    process: Option<Child>,
    launched_at: Option<Instant>,
    executable_path: Option<PathBuf>,
}

impl LaunchState {
    pub(crate) fn new() -> Self {
        Self {
            process: None,
            launched_at: None,
            executable_path: None,
        }
    }

    /// Whether the last spawned process is still alive.
    pub(crate) fn is_running(&mut self) -> bool {
        match self.process.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// True while a recent launch may still be starting up.
    pub(crate) fn within_grace_window(&self) -> bool {
        self.launched_at
            .is_some_and(|at| at.elapsed() <= CONNECT_GRACE_WINDOW)
    }

    /// Forget the process handle. The child is not killed; a hung editor
    /// is the user's to close.
    pub(crate) fn drop_process(&mut self) {
        self.process = None;
        self.launched_at = None;
    }

    pub(crate) fn record_launch(&mut self, child: Child) {
        self.launched_at = Some(Instant::now());
        self.process = Some(child);
    }

    /// Resolve the editor executable, reusing the cached path while it
    /// still exists on disk and re-searching PATH otherwise.
    pub(crate) fn resolve_executable(&mut self, names: &[&str]) -> Option<PathBuf> {
        if let Some(path) = &self.executable_path
            && path.exists()
        {
            return Some(path.clone());
        }

        self.executable_path = names.iter().find_map(|name| os::path_which(name));
        self.executable_path.clone()
    }

    #[cfg(test)]
    pub(crate) fn set_launched_at(&mut self, at: Instant) {
        self.launched_at = Some(at);
    }
}

/// Decide whether the running process can be reused instead of spawning a
/// new one.
///
/// Reuse when a client of `identity` is connected, or when the launch is
/// still within the grace window (optimistic: the IDE may connect before
/// the request is due). A process past the window with no connection is
/// treated as dead and its handle dropped.
///
/// This is a best-effort guard against duplicate launches, not a lock; the
/// single caller thread makes it sufficient.
pub(crate) fn should_reuse_running_process(
    state: &mut LaunchState,
    server: &MessagingServer,
    identity: &str,
) -> bool {
    if !state.is_running() {
        return false;
    }

    if server.is_any_connected(identity) {
        debug!("Reusing running '{identity}' process with a connected client");
        return true;
    }

    if state.within_grace_window() {
        debug!("'{identity}' launched recently; assuming it is still starting");
        return true;
    }

    debug!("'{identity}' never connected within the grace window; relaunching");
    state.drop_process();
    false
}

/// Fire-and-forget: once a client of `identity` connects - bounded by
/// [`CONNECT_TIMEOUT`] - push the open-file request to it.
///
/// A timeout is logged as a connection-timeout failure; the next
/// user-initiated request starts over from scratch.
pub(crate) fn request_open_file_when_connected(
    server: Arc<MessagingServer>,
    identity: &'static str,
    request: OpenFileRequest,
) {
    TokioSpawn(async move {
        let connected = TokioTimeout(CONNECT_TIMEOUT, server.await_client_connected(identity));

        if connected.await.is_err() {
            let err = LaunchError::ConnectionTimeout {
                message: format!(
                    "Could not connect to code editor after {} seconds: {identity}",
                    CONNECT_TIMEOUT.as_secs()
                ),
                location: ErrorLocation::from(Location::caller()),
            };
            error!("{err}");
            return;
        }

        server.broadcast_request(identity, request);
    });
}
