//! Host OS helpers: executable lookup and detached process spawning.

use std::env;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use log::{debug, trace};
use tokio::process::{Child, Command as TokioCommand};

/// Search `PATH` for an executable called `name`.
///
/// On Windows the `PATHEXT` extensions are probed as well, so
/// `path_which("code")` finds `code.cmd`.
pub fn path_which(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;

    for dir in env::split_paths(&path_var) {
        for candidate in candidate_names(name) {
            let full = dir.join(&candidate);
            if is_executable_file(&full) {
                trace!("Resolved '{name}' to {}", full.display());
                return Some(full);
            }
        }
    }

    debug!("'{name}' not found on PATH");
    None
}

#[cfg(windows)]
fn candidate_names(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    if let Some(pathext) = env::var_os("PATHEXT") {
        for ext in pathext.to_string_lossy().split(';') {
            if !ext.is_empty() {
                names.push(format!("{name}{}", ext.to_lowercase()));
            }
        }
    }
    names
}

#[cfg(not(windows))]
fn candidate_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

/// Spawn an editor process without tying its lifetime to ours.
///
/// The child is not killed when its handle is dropped; the user keeps
/// working in the editor after the engine exits. Output is discarded -
/// editors log to their own facilities.
pub(crate) fn spawn_detached(program: &Path, args: &[String]) -> IoResult<Child> {
    debug!("Spawning {} {:?}", program.display(), args);

    TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

/// Whether a macOS application bundle with `bundle_id` is installed.
///
/// Queries Spotlight via `mdfind`; a failed query counts as not installed
/// and the caller falls back to a PATH search.
#[cfg(target_os = "macos")]
pub fn is_app_bundle_installed(bundle_id: &str) -> bool {
    use std::process::Command;

    let query = format!("kMDItemCFBundleIdentifier == '{bundle_id}'");
    match Command::new("mdfind").arg(&query).output() {
        Ok(output) => {
            let found = output.status.success() && !output.stdout.is_empty();
            debug!("App bundle '{bundle_id}' installed: {found}");
            found
        }
        Err(e) => {
            debug!("mdfind query for '{bundle_id}' failed: {e}");
            false
        }
    }
}

#[cfg(not(target_os = "macos"))]
pub fn is_app_bundle_installed(_bundle_id: &str) -> bool {
    false
}
