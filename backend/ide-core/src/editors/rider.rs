//! JetBrains Rider launch strategy.
//!
//! One-shot: Rider reuses its own running instance when given the same
//! solution, so no messaging-server coordination is needed. Discovery
//! scans PATH plus the standard JetBrains install locations and prefers
//! the newest rider-named entry, mirroring how the JetBrains locator
//! orders its results.

use crate::editors::LaunchContext;
use crate::error::launch::LaunchError;
use crate::os;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::trace;

const EXECUTABLE_NAMES: &[&str] = &["rider", "rider64", "rider.sh"];

#[derive(Debug)]
pub struct RiderEditor {
    executable_path: Option<PathBuf>,
}

impl RiderEditor {
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
        let cached_valid = self
            .executable_path
            .as_ref()
            .is_some_and(|path| path.exists());
        if !cached_valid {
            // Search again if it wasn't found last time or was removed
            // from its location.
            self.executable_path = find_rider_executable();
        }

        let executable = self
            .executable_path
            .clone()
            .ok_or_else(|| LaunchError::NotFound {
                message: "Cannot find code editor: JetBrains Rider".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let script_abs = ctx.config.globalize_path(script_path);
        let args = build_open_args(&ctx.config.solution_path_abs(), &script_abs, line, column);

        let _child = os::spawn_detached(&executable, &args).map_err(|e| LaunchError::Launch {
            message: format!("Failed to start JetBrains Rider: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?;

        Ok(())
    }
}

/// Collect rider candidates from PATH and the known install directories,
/// preferring entries actually named `rider*` and picking the last one
/// (install dirs list newer builds later).
fn find_rider_executable() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = EXECUTABLE_NAMES
        .iter()
        .filter_map(|name| os::path_which(name))
        .collect();

    for dir in known_install_dirs() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_rider_name(path))
            .collect();
        found.sort();
        candidates.extend(found);
    }

    trace!("Rider candidates: {candidates:?}");

    let rider_named: Vec<&PathBuf> = candidates
        .iter()
        .filter(|path| is_rider_name(path))
        .collect();

    rider_named
        .last()
        .map(|path| (*path).clone())
        .or_else(|| candidates.last().cloned())
}

fn is_rider_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().starts_with("rider"))
        .unwrap_or(false)
}

#[cfg(target_os = "macos")]
fn known_install_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/Applications/Rider.app/Contents/MacOS"),
        home_dir_join("Applications/Rider.app/Contents/MacOS"),
    ]
}

#[cfg(target_os = "windows")]
fn known_install_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("C:\\Program Files\\JetBrains"),
        home_dir_join("AppData\\Local\\JetBrains\\Toolbox\\apps"),
    ]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn known_install_dirs() -> Vec<PathBuf> {
    vec![
        home_dir_join(".local/share/JetBrains/Toolbox/apps"),
        PathBuf::from("/opt/rider/bin"),
    ]
}

fn home_dir_join(rest: &str) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(rest)
}

/// `[--line <line+1> --column <column>] <sln> <file>` - Rider's own goto
/// flags, 1-based line.
pub(crate) fn build_open_args(
    solution: &Path,
    script: &Path,
    line: Option<u32>,
    column: Option<u32>,
) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(line) = line {
        args.push("--line".to_string());
        args.push((line + 1).to_string());
        args.push("--column".to_string());
        args.push(column.unwrap_or(0).to_string());
    }

    args.push(solution.display().to_string());
    args.push(script.display().to_string());
    args
}
