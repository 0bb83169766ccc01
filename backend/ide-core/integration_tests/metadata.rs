//! Tests for the metadata file IDE plugins use to discover the server.

use crate::helpers::bound_server;

use ide_core::ipc::META_FILE_NAME;

/// **VALUE**: Verifies the discovery contract: after binding, the metadata
/// file holds the assigned port followed by the host executable path.
///
/// **WHY THIS MATTERS**: IDE plugins have no other way to learn the
/// OS-assigned port; a wrong first line sends every plugin to a dead socket.
///
/// **BUG THIS CATCHES**: Would catch reordered lines or the file being
/// written before the port is known (port 0).
#[tokio::test]
async fn given_bound_server_then_meta_file_advertises_port_and_host() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = bound_server(dir.path()).await;
    let port = server.port().expect("bound port");

    let contents =
        std::fs::read_to_string(dir.path().join(META_FILE_NAME)).expect("meta file readable");
    let mut lines = contents.lines();

    assert_eq!(lines.next(), Some(port.to_string().as_str()));
    assert_eq!(lines.next(), Some("/bin/editor-host"));
}

/// **VALUE**: Verifies that disposal removes the metadata file.
///
/// **WHY THIS MATTERS**: A stale file would point plugins at a port that may
/// now belong to an unrelated process.
///
/// **BUG THIS CATCHES**: Would catch dispose skipping filesystem cleanup.
#[tokio::test]
async fn given_disposed_server_then_meta_file_removed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = bound_server(dir.path()).await;
    assert!(dir.path().join(META_FILE_NAME).exists());

    server.dispose();

    assert!(!dir.path().join(META_FILE_NAME).exists());
}
