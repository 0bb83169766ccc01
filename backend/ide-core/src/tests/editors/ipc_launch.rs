// Tests for the launch-state bookkeeping shared by the process-based
// strategies (MonoDevelop, Visual Studio for Mac).

use crate::editors::ipc_launch::{
    CONNECT_GRACE_WINDOW, LaunchState, should_reuse_running_process,
};
use crate::ipc::MessagingServer;

use std::path::PathBuf;
use std::time::{Duration, Instant};

fn unbound_server() -> MessagingServer {
    MessagingServer::new(PathBuf::from("/bin/editor-host"), PathBuf::from("/tmp"))
}

/// A real child process that stays alive for the duration of a test.
#[cfg(unix)]
fn spawn_sleeping_child() -> tokio::process::Child {
    crate::os::spawn_detached(std::path::Path::new("/bin/sleep"), &["5".to_string()])
        .expect("spawn sleep")
}

/// **VALUE**: Verifies that a state without a spawned process never reports a
/// running editor.
///
/// **WHY THIS MATTERS**: The very first open-file request goes through this
/// check; a false positive would skip the launch entirely and the request
/// would time out against an IDE that was never started.
///
/// **BUG THIS CATCHES**: Would catch `is_running` defaulting to true when no
/// child handle exists.
#[test]
fn given_no_process_then_not_running_and_not_reused() {
    let mut state = LaunchState::new();
    let server = unbound_server();

    assert!(!state.is_running());
    assert!(!should_reuse_running_process(
        &mut state,
        &server,
        "MonoDevelop"
    ));
}

/// **VALUE**: Verifies the grace-window boundary around a recorded launch
/// time.
///
/// **WHY THIS MATTERS**: Within the window a still-starting IDE is reused
/// (avoiding duplicate instances); past it the process is presumed stuck and
/// relaunched. Both wrong directions are user-visible: duplicate windows or a
/// request that silently goes nowhere.
///
/// **BUG THIS CATCHES**: Would catch an inverted elapsed comparison or a
/// window measured from the wrong instant.
#[test]
fn given_launch_time_then_grace_window_honored_until_elapsed() {
    let mut state = LaunchState::new();

    state.set_launched_at(Instant::now());
    assert!(state.within_grace_window());

    let expired = Instant::now()
        .checked_sub(CONNECT_GRACE_WINDOW + Duration::from_secs(1))
        .expect("clock long enough past boot");
    state.set_launched_at(expired);
    assert!(!state.within_grace_window());
}

/// **VALUE**: Verifies that dropping the process handle also forgets the
/// launch time.
///
/// **WHY THIS MATTERS**: After a relaunch decision, a stale launch time would
/// let the *next* decision reuse a process that no longer exists.
///
/// **BUG THIS CATCHES**: Would catch `drop_process` clearing only the child
/// handle.
#[test]
fn given_dropped_process_then_grace_window_reset() {
    let mut state = LaunchState::new();
    state.set_launched_at(Instant::now());

    state.drop_process();

    assert!(!state.within_grace_window());
}

/// **VALUE**: Verifies that a live process with a connected client is reused
/// even after the grace window has elapsed.
///
/// **WHY THIS MATTERS**: This is the steady state: the IDE is open and
/// attached. Spawning a second instance here would litter the user's desktop
/// with duplicate editor windows on every open-file request.
///
/// **BUG THIS CATCHES**: Would catch the connected-client check being gated
/// behind the grace window instead of checked first.
#[cfg(unix)]
#[tokio::test]
async fn given_live_process_with_connected_client_then_reused() {
    let mut state = LaunchState::new();
    state.record_launch(spawn_sleeping_child());
    let expired = Instant::now()
        .checked_sub(CONNECT_GRACE_WINDOW + Duration::from_secs(1))
        .expect("clock long enough past boot");
    state.set_launched_at(expired);

    let server = unbound_server();
    let _receiver = server.register_test_client("MonoDevelop");

    assert!(should_reuse_running_process(
        &mut state,
        &server,
        "MonoDevelop"
    ));
    assert!(state.is_running(), "handle must survive the reuse decision");
}

/// **VALUE**: Verifies that a freshly launched process is reused before its
/// client has connected.
///
/// **WHY THIS MATTERS**: IDEs take many seconds to start; a second open-file
/// request arriving during startup must wait for the first launch instead of
/// spawning another instance.
///
/// **BUG THIS CATCHES**: Would catch relaunch-on-not-yet-connected, the
/// duplicate-instance bug the grace window exists to prevent.
#[cfg(unix)]
#[tokio::test]
async fn given_live_process_within_grace_window_then_reused_without_client() {
    let mut state = LaunchState::new();
    state.record_launch(spawn_sleeping_child());
    state.set_launched_at(Instant::now());

    let server = unbound_server();

    assert!(should_reuse_running_process(
        &mut state,
        &server,
        "MonoDevelop"
    ));
}

/// **VALUE**: Verifies that a live process past the grace window with no
/// connected client is given up on: reuse is refused and the handle dropped.
///
/// **WHY THIS MATTERS**: A stuck editor that never connected would otherwise
/// swallow every future open-file request; dropping the handle lets the next
/// request start a fresh instance.
///
/// **BUG THIS CATCHES**: Would catch the expiry branch returning false but
/// keeping the handle, which re-enters the same dead end on the next call.
#[cfg(unix)]
#[tokio::test]
async fn given_live_process_past_grace_window_without_client_then_relaunched() {
    let mut state = LaunchState::new();
    state.record_launch(spawn_sleeping_child());
    let expired = Instant::now()
        .checked_sub(CONNECT_GRACE_WINDOW + Duration::from_secs(1))
        .expect("clock long enough past boot");
    state.set_launched_at(expired);

    let server = unbound_server();

    assert!(!should_reuse_running_process(
        &mut state,
        &server,
        "MonoDevelop"
    ));
    assert!(!state.is_running(), "handle must be dropped on expiry");
}

/// **VALUE**: Verifies that executable resolution returns None when nothing
/// matches and caches nothing bogus for the next call.
///
/// **WHY THIS MATTERS**: The NotFound launch status depends on a clean miss
/// here; a cached empty path would turn later "editor installed meanwhile"
/// launches into spawn failures.
///
/// **BUG THIS CATCHES**: Would catch the cache being consulted without the
/// exists() revalidation.
#[test]
fn given_unresolvable_names_then_no_executable() {
    let mut state = LaunchState::new();

    assert_eq!(
        state.resolve_executable(&["definitely-not-a-real-editor-binary"]),
        None
    );
    assert_eq!(
        state.resolve_executable(&["definitely-not-a-real-editor-binary"]),
        None
    );
}
