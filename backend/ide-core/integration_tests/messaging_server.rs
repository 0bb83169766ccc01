//! End-to-end tests against a live messaging server: real loopback
//! sockets, real handshake lines, real broadcasts.

use crate::helpers::{TestIdeClient, bound_server, wait_until};

use ide_core::ipc::messages::{OpenFileRequest, ServerMessage};

use std::sync::Arc;
use std::time::Duration;

/// **VALUE**: Verifies the full connect-handshake-register path.
///
/// **WHY THIS MATTERS**: This is the prerequisite for every open-file
/// request; if registration breaks, launches degrade to connect timeouts.
///
/// **BUG THIS CATCHES**: Would catch handshake parsing or registry wiring
/// regressions anywhere between the socket and `is_any_connected`.
#[tokio::test]
async fn given_handshaken_client_then_server_reports_it_connected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = bound_server(dir.path()).await;
    let port = server.port().expect("bound port");

    assert!(!server.is_any_connected("MonoDevelop"));

    let _client = TestIdeClient::connect_and_handshake(port, "MonoDevelop").await;

    let registered = {
        let server = Arc::clone(&server);
        wait_until(move || server.is_any_connected("MonoDevelop")).await
    };
    assert!(registered, "client never appeared in the registry");
    assert!(!server.is_any_connected("VisualStudioForMac"));
}

/// **VALUE**: Verifies that a broadcast reaches a connected client with the
/// wire-format position and that the acknowledgement is accepted.
///
/// **WHY THIS MATTERS**: This is the actual feature: the IDE receives
/// file, 1-based line and column exactly as its plugin expects.
///
/// **BUG THIS CATCHES**: Would catch framing bugs (missing newline), encode
/// regressions, or the ack path closing the connection.
#[tokio::test]
async fn given_connected_client_when_broadcasting_then_request_delivered() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = bound_server(dir.path()).await;
    let port = server.port().expect("bound port");

    let mut client = TestIdeClient::connect_and_handshake(port, "MonoDevelop").await;
    {
        let server = Arc::clone(&server);
        assert!(wait_until(move || server.is_any_connected("MonoDevelop")).await);
    }

    let sent = server.broadcast_request(
        "MonoDevelop",
        OpenFileRequest::at("/game/Player.cs".to_string(), Some(4), Some(2)),
    );
    assert_eq!(sent, 1);

    match client.recv().await {
        ServerMessage::OpenFileRequest(request) => {
            assert_eq!(request.file, "/game/Player.cs");
            assert_eq!(request.line, Some(5));
            assert_eq!(request.column, Some(2));
        }
        other => panic!("expected open-file request, got {other:?}"),
    }

    // The ack carries no payload; the server must keep the session open.
    client.acknowledge().await;
    assert!(server.is_any_connected("MonoDevelop"));
}

/// **VALUE**: Verifies that `await_client_connected` wakes for a connection
/// made after the subscription, and resolves immediately for one made
/// before.
///
/// **WHY THIS MATTERS**: Launch strategies subscribe right after spawning the
/// IDE; both orderings happen in practice depending on editor startup time.
///
/// **BUG THIS CATCHES**: Would catch the missed-wakeup race between
/// subscription and the accept loop's registration.
#[tokio::test]
async fn given_awaiting_launcher_when_client_connects_then_wait_resolves() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = bound_server(dir.path()).await;
    let port = server.port().expect("bound port");

    let waiter = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.await_client_connected("MonoDevelop").await })
    };

    let _client = TestIdeClient::connect_and_handshake(port, "MonoDevelop").await;

    tokio::time::timeout(Duration::from_secs(5), waiter)
        .await
        .expect("await_client_connected never resolved")
        .expect("waiter task panicked");

    // Already connected: must resolve without waiting for another client.
    tokio::time::timeout(
        Duration::from_secs(5),
        server.await_client_connected("MonoDevelop"),
    )
    .await
    .expect("await for already-connected client did not resolve");
}

/// **VALUE**: Verifies the fail-closed handshake: a connection whose first
/// line is not a handshake is dropped without registration.
///
/// **WHY THIS MATTERS**: Any local process can reach the loopback port; the
/// handshake requirement keeps stray connections (port scanners, confused
/// clients) out of the registry.
///
/// **BUG THIS CATCHES**: Would catch the server tolerating out-of-order
/// messages before identification.
#[tokio::test]
async fn given_first_message_not_handshake_then_connection_dropped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = bound_server(dir.path()).await;
    let port = server.port().expect("bound port");

    let mut client = TestIdeClient::connect(port).await;
    client.send_raw(r#"{"type":"open_file_response"}"#).await;

    client.expect_closed().await;
    assert!(!server.is_any_connected("MonoDevelop"));
}

/// **VALUE**: Verifies that a disconnecting client is removed from the
/// registry.
///
/// **WHY THIS MATTERS**: The reuse decision trusts `is_any_connected`; a
/// stale session would suppress relaunches of an IDE the user closed.
///
/// **BUG THIS CATCHES**: Would catch the reader loop exiting without
/// unregistering.
#[tokio::test]
async fn given_client_disconnect_then_registry_emptied() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = bound_server(dir.path()).await;
    let port = server.port().expect("bound port");

    let client = TestIdeClient::connect_and_handshake(port, "MonoDevelop").await;
    {
        let server = Arc::clone(&server);
        assert!(wait_until(move || server.is_any_connected("MonoDevelop")).await);
    }

    drop(client);

    let emptied = {
        let server = Arc::clone(&server);
        wait_until(move || !server.is_any_connected("MonoDevelop")).await
    };
    assert!(emptied, "session survived the disconnect");
}

/// **VALUE**: Verifies disposal semantics: idempotent, disconnects clients,
/// and flips `is_disposed` for the lazy-recreation check.
///
/// **WHY THIS MATTERS**: The manager's entire server lifecycle hinges on
/// `is_disposed`; clients left connected to a disposed server would wait on
/// requests that can never arrive.
///
/// **BUG THIS CATCHES**: Would catch dispose leaving sessions (and their
/// writer tasks) alive.
#[tokio::test]
async fn given_disposed_server_then_clients_disconnected_and_flag_set() {
    let dir = tempfile::tempdir().expect("temp dir");
    let server = bound_server(dir.path()).await;
    let port = server.port().expect("bound port");

    let mut client = TestIdeClient::connect_and_handshake(port, "MonoDevelop").await;
    {
        let server = Arc::clone(&server);
        assert!(wait_until(move || server.is_any_connected("MonoDevelop")).await);
    }

    server.dispose();
    server.dispose();

    assert!(server.is_disposed());
    assert!(!server.is_any_connected("MonoDevelop"));
    client.expect_closed().await;
}
