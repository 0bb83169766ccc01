//! Visual Studio (Windows) launch strategy.
//!
//! Windows only. Delegates to the bundled opener executable, which drives
//! a running Visual Studio instance over COM or starts a new one; no
//! messaging-server coordination on our side.

use crate::editors::LaunchContext;
use crate::error::launch::LaunchError;
use crate::os;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

/// Helper executable shipped in the editor tools directory.
const OPENER_EXECUTABLE: &str = "OpenVisualStudio.exe";

#[derive(Debug)]
pub struct VisualStudioEditor {}

impl VisualStudioEditor {
    pub(crate) fn new() -> Self {
        Self {}
    }

    pub(crate) fn launch(
        &mut self,
        ctx: &LaunchContext<'_>,
        script_path: &str,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Result<(), LaunchError> {
        if !cfg!(windows) {
            return Err(LaunchError::UnsupportedPlatform {
                message: "Visual Studio not supported on this platform".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let opener = ctx.config.project.editor_tools_dir.join(OPENER_EXECUTABLE);
        if !opener.exists() {
            return Err(LaunchError::NotFound {
                message: format!("Cannot find Visual Studio opener: {}", opener.display()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let script_abs = ctx.config.globalize_path(script_path);
        let args = build_args(&ctx.config.solution_path_abs(), &script_abs, line, column);

        let _child = os::spawn_detached(&opener, &args).map_err(|e| LaunchError::Launch {
            message: format!("Failed to start Visual Studio opener: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?;

        Ok(())
    }
}

/// `<sln> <file>[;<line+1>;<column+1>]` - the opener expects 1-based line
/// and column.
pub(crate) fn build_args(
    solution: &Path,
    script: &Path,
    line: Option<u32>,
    column: Option<u32>,
) -> Vec<String> {
    let position = match line {
        Some(line) => format!(
            "{};{};{}",
            script.display(),
            line + 1,
            column.unwrap_or(0) + 1
        ),
        None => script.display().to_string(),
    };

    vec![solution.display().to_string(), position]
}
