//! Visual Studio for Mac launch strategy.
//!
//! macOS only. Prefers launching through the installed application bundle
//! (`open -b`); falls back to a PATH search. Process-based like
//! MonoDevelop: the file position travels over the messaging server.

use crate::editors::LaunchContext;
use crate::editors::ipc_launch::{
    LaunchState, request_open_file_when_connected, should_reuse_running_process,
};
use crate::error::launch::LaunchError;
use crate::ipc::messages::OpenFileRequest;
use crate::os;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub(crate) const VS_MAC_IDENTITY: &str = "VisualStudioForMac";

const EXECUTABLE_NAMES: &[&str] = &["VisualStudio"];
const BUNDLE_ID: &str = "com.microsoft.visual-studio";
const OPEN_COMMAND: &str = "/usr/bin/open";
const IPC_FLAG: &str = "--ipc-tcp";

#[derive(Debug)]
pub struct VisualStudioMacEditor {
    state: LaunchState,
}

impl VisualStudioMacEditor {
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
        if !cfg!(target_os = "macos") {
            return Err(LaunchError::UnsupportedPlatform {
                message: "Visual Studio for Mac not supported on this platform".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let script_abs = ctx.config.globalize_path(script_path);

        if !should_reuse_running_process(&mut self.state, ctx.server, VS_MAC_IDENTITY) {
            let (command, mut args) = if os::is_app_bundle_installed(BUNDLE_ID) {
                (PathBuf::from(OPEN_COMMAND), bundle_launch_args())
            } else {
                let executable =
                    self.state.resolve_executable(EXECUTABLE_NAMES).ok_or_else(|| {
                        LaunchError::NotFound {
                            message: "Cannot find code editor: Visual Studio for Mac"
                                .to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        }
                    })?;
                (executable, Vec::new())
            };

            args.extend(build_ipc_args(
                &ctx.config.solution_path_abs(),
                &script_abs,
                line,
                column,
            ));

            let child = os::spawn_detached(&command, &args).map_err(|e| {
                LaunchError::Launch {
                    message: format!("Failed to start Visual Studio for Mac: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                    source: Box::new(e),
                }
            })?;

            self.state.record_launch(child);
        }

        let request = OpenFileRequest::at(script_abs.display().to_string(), line, column);
        request_open_file_when_connected(Arc::clone(ctx.server), VS_MAC_IDENTITY, request);
        Ok(())
    }
}

/// Launch through the app bundle. The `open` process must wait until the
/// application finishes so the child handle tracks the IDE, not `open`.
fn bundle_launch_args() -> Vec<String> {
    vec![
        "-b".to_string(),
        BUNDLE_ID.to_string(),
        "--wait-apps".to_string(),
        "--args".to_string(),
    ]
}

/// Same shape as MonoDevelop: `--ipc-tcp <sln> <file>[;<line+1>;<column>]`.
pub(crate) fn build_ipc_args(
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
