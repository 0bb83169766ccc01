//! Single entry point for "open this script in the external editor".
//!
//! The manager owns the messaging-server singleton (lazily recreated
//! whenever the cached instance is disposed) and at most one launch
//! strategy, replaced when the configured editor changes. Every failure
//! funnels through one reporting path: a single logged error line naming
//! the editor, and a [`LaunchStatus`] for the caller.

use crate::config::IdeConfig;
use crate::editors::{EditorStrategy, LaunchContext};
use crate::error::launch::LaunchError;
use crate::ipc::MessagingServer;

use common::ExternalEditorId;

use std::path::PathBuf;
use std::sync::Arc;

use log::{error, warn};

/// Outcome of an open-in-external-editor request.
///
/// `Unavailable` is not a failure: it means no external editor is
/// configured and the caller should fall back to the built-in editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStatus {
    Ok,
    Unavailable,
    NotFound,
    UnsupportedPlatform,
    Failed,
}

pub struct IdeManager {
    config: IdeConfig,
    host_executable: PathBuf,
    server: Option<Arc<MessagingServer>>,
    strategy: Option<EditorStrategy>,
}

impl IdeManager {
    pub fn new(config: IdeConfig) -> Self {
        let host_executable = std::env::current_exe().unwrap_or_else(|e| {
            warn!("Could not determine host executable path: {e}");
            PathBuf::new()
        });

        Self {
            config,
            host_executable,
            server: None,
            strategy: None,
        }
    }

    /// The messaging server, creating and binding a fresh one when none
    /// exists yet or the cached one has been disposed.
    pub async fn get_running_or_new_server(&mut self) -> Arc<MessagingServer> {
        if let Some(server) = &self.server
            && !server.is_disposed()
        {
            return Arc::clone(server);
        }

        if let Some(old) = self.server.take() {
            old.dispose();
        }

        let server = Arc::new(MessagingServer::new(
            self.host_executable.clone(),
            self.config.metadata_dir_abs(),
        ));
        server.listen().await;

        self.server = Some(Arc::clone(&server));
        server
    }

    /// Open `script_path` (a `res://` or absolute path) at the 0-based
    /// `line`/`column` in the editor named by `editor_id`.
    pub async fn open_in_external_editor(
        &mut self,
        editor_id: ExternalEditorId,
        script_path: &str,
        line: Option<u32>,
        column: Option<u32>,
    ) -> LaunchStatus {
        if editor_id == ExternalEditorId::None {
            // Not an error. Tells the caller to fall back to the global
            // external editor settings or the built-in editor.
            return LaunchStatus::Unavailable;
        }

        let current_matches = self
            .strategy
            .as_ref()
            .is_some_and(|s| s.editor_id() == editor_id);

        if !current_matches {
            // Drop the previous strategy first: it owns the last spawned
            // process handle.
            self.strategy = None;
            match EditorStrategy::create(editor_id) {
                Ok(strategy) => self.strategy = Some(strategy),
                Err(e) => return self.report_failure(editor_id, e),
            }
        }

        let server = self.get_running_or_new_server().await;
        let ctx = LaunchContext {
            server: &server,
            config: &self.config,
        };

        let Some(strategy) = self.strategy.as_mut() else {
            // Set just above; kept as a guard rather than an unwrap.
            return LaunchStatus::Failed;
        };

        match strategy.launch(&ctx, script_path, line, column) {
            Ok(()) => LaunchStatus::Ok,
            Err(e) => {
                error!("Error when trying to run code editor: {editor_id}. {e}");
                Self::status_for(&e)
            }
        }
    }

    /// Drop the active strategy (and with it any owned process handle).
    ///
    /// The messaging server is deliberately left alone: it has its own
    /// lifecycle and is recreated lazily on next access.
    pub fn dispose(&mut self) {
        self.strategy = None;
    }

    fn report_failure(&self, editor_id: ExternalEditorId, e: LaunchError) -> LaunchStatus {
        error!("Error when trying to run code editor: {editor_id}. {e}");
        Self::status_for(&e)
    }

    fn status_for(e: &LaunchError) -> LaunchStatus {
        match e {
            LaunchError::NotFound { .. } => LaunchStatus::NotFound,
            LaunchError::UnsupportedPlatform { .. } => LaunchStatus::UnsupportedPlatform,
            LaunchError::ConnectionTimeout { .. } | LaunchError::Launch { .. } => {
                LaunchStatus::Failed
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn active_strategy_id(&self) -> Option<ExternalEditorId> {
        self.strategy.as_ref().map(|s| s.editor_id())
    }
}
