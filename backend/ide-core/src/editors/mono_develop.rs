//! MonoDevelop launch strategy.
//!
//! Process-based: spawns MonoDevelop with the IPC flag and hands the file
//! position over the messaging server once the IDE connects.

use crate::editors::LaunchContext;
use crate::editors::ipc_launch::{
    LaunchState, request_open_file_when_connected, should_reuse_running_process,
};
use crate::error::launch::LaunchError;
use crate::ipc::messages::OpenFileRequest;
use crate::os;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

pub(crate) const MONODEVELOP_IDENTITY: &str = "MonoDevelop";

#[cfg(windows)]
const EXECUTABLE_NAMES: &[&str] = &["MonoDevelop.exe"];
#[cfg(not(windows))]
const EXECUTABLE_NAMES: &[&str] = &["monodevelop"];

/// Tells MonoDevelop to connect back to the messaging server.
const IPC_FLAG: &str = "--ipc-tcp";

#[derive(Debug)]
pub struct MonoDevelopEditor {
    state: LaunchState,
}

impl MonoDevelopEditor {
    pub(crate) fn new() -> Self {
        Self {
            state: LaunchState::new(),
        }
    }

    pub(crate) fn launch(
        &mut self,
        ctx: &LaunchContext<'_>,
        script_path: &str,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Result<(), LaunchError> {
        let script_abs = ctx.config.globalize_path(script_path);

        if !should_reuse_running_process(&mut self.state, ctx.server, MONODEVELOP_IDENTITY) {
            let executable = self.state.resolve_executable(EXECUTABLE_NAMES).ok_or_else(|| {
                LaunchError::NotFound {
                    message: "Cannot find code editor: MonoDevelop".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            let args = build_args(&ctx.config.solution_path_abs(), &script_abs, line, column);

            let child = os::spawn_detached(&executable, &args).map_err(|e| {
                LaunchError::Launch {
                    message: format!("Failed to start MonoDevelop: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                    source: Box::new(e),
                }
            })?;

            self.state.record_launch(child);
        }

        let request =
            OpenFileRequest::at(script_abs.display().to_string(), line, column);
        request_open_file_when_connected(Arc::clone(ctx.server), MONODEVELOP_IDENTITY, request);
        Ok(())
    }
}

/// `--ipc-tcp <sln> <file>[;<line+1>;<column>]` - the line becomes 1-based,
/// the column is passed through as-is.
pub(crate) fn build_args(
    solution: &Path,
    script: &Path,
    line: Option<u32>,
    column: Option<u32>,
) -> Vec<String> {
    let position = match line {
        Some(line) => format!("{};{};{}", script.display(), line + 1, column.unwrap_or(0)),
        None => script.display().to_string(),
    };

    vec![
        IPC_FLAG.to_string(),
        solution.display().to_string(),
        position,
    ]
}
