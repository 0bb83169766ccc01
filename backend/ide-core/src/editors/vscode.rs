//! Visual Studio Code launch strategy.
//!
//! One-shot: VS Code manages its own windows and single-instance reuse, so
//! there is no messaging-server coordination. We resolve the executable,
//! hand it the solution directory and a `-g file:line:col` goto argument,
//! and are done.

use crate::editors::LaunchContext;
use crate::error::launch::LaunchError;
use crate::os;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

/// Distribution-specific binary names, most common first.
const EXECUTABLE_NAMES: &[&str] = &[
    "code",
    "code-oss",
    "vscode",
    "vscode-oss",
    "visual-studio-code",
    "visual-studio-code-oss",
];

/// The package path is '/Applications/Visual Studio Code.app'.
const BUNDLE_ID: &str = "com.microsoft.VSCode";
const OPEN_COMMAND: &str = "/usr/bin/open";

#[derive(Debug)]
pub struct VsCodeEditor {
    executable_path: Option<PathBuf>,
}

impl VsCodeEditor {
    pub(crate) fn new() -> Self {
        Self {
            executable_path: None,
        }
    }

    pub(crate) fn launch(
        &mut self,
        ctx: &LaunchContext<'_>,
        script_path: &str,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Result<(), LaunchError> {
        let (command, mut args) = if os::is_app_bundle_installed(BUNDLE_ID) {
            (PathBuf::from(OPEN_COMMAND), bundle_launch_args())
        } else {
            let cached_valid = self
                .executable_path
                .as_ref()
                .is_some_and(|path| path.exists());
            if !cached_valid {
                // Search again if it wasn't found last time or was removed
                // from its location.
                self.executable_path = EXECUTABLE_NAMES
                    .iter()
                    .find_map(|name| os::path_which(name));
            }

            let executable =
                self.executable_path
                    .clone()
                    .ok_or_else(|| LaunchError::NotFound {
                        message: "Cannot find code editor: VSCode".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
            (executable, Vec::new())
        };

        let script_abs = ctx.config.globalize_path(script_path);
        let solution_dir = ctx
            .config
            .solution_path_abs()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| ctx.config.project.root.clone());

        args.extend(build_open_args(&solution_dir, &script_abs, line, column));

        // Not killed on drop; the editor outlives us.
        let _child = os::spawn_detached(&command, &args).map_err(|e| LaunchError::Launch {
            message: format!("Failed to start VSCode: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?;

        Ok(())
    }
}

/// Ask `open` for a new window; the bundle's own window reuse might pick
/// one that is not editing our folder.
fn bundle_launch_args() -> Vec<String> {
    vec![
        "-b".to_string(),
        BUNDLE_ID.to_string(),
        "-n".to_string(),
        "--wait-apps".to_string(),
        "--args".to_string(),
    ]
}

/// `<solution dir> [-g <file>:<line+1>:<column+1>]` - VS Code's goto
/// syntax is 1-based for both line and column.
pub(crate) fn build_open_args(
    solution_dir: &Path,
    script: &Path,
    line: Option<u32>,
    column: Option<u32>,
) -> Vec<String> {
    let mut args = vec![solution_dir.display().to_string()];

    match line {
        Some(line) => {
            args.push("-g".to_string());
            args.push(format!(
                "{}:{}:{}",
                script.display(),
                line + 1,
                column.unwrap_or(0) + 1
            ));
        }
        None => args.push(script.display().to_string()),
    }

    args
}
