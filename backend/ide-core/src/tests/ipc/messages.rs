// Wire-shape tests for the newline-delimited JSON protocol.

use crate::ipc::messages::{
    ClientMessage, HandshakeRequest, OpenFileRequest, ServerMessage,
};

/// **VALUE**: Verifies the handshake wire shape (tag + identity field).
///
/// **WHY THIS MATTERS**: IDE plugins are written against this exact JSON;
/// a renamed tag or field breaks every client without a compile error on
/// either side.
///
/// **BUG THIS CATCHES**: Would catch serde attribute changes (tag name,
/// rename_all) on the client message enum.
#[test]
fn given_handshake_when_serialized_then_tagged_snake_case() {
    let message = ClientMessage::Handshake(HandshakeRequest {
        identity: "MonoDevelop".to_string(),
    });

    let json = serde_json::to_string(&message).expect("serialize");

    assert_eq!(json, r#"{"type":"handshake","identity":"MonoDevelop"}"#);
}

/// **VALUE**: Verifies that an open-file request without a position omits the
/// line and column fields entirely.
///
/// **WHY THIS MATTERS**: Clients distinguish "no position" from "line 0" by
/// field absence; serializing `null` would push that ambiguity onto every
/// plugin.
///
/// **BUG THIS CATCHES**: Would catch removal of the `skip_serializing_if`
/// attributes.
#[test]
fn given_request_without_position_when_serialized_then_no_line_fields() {
    let message = ServerMessage::OpenFileRequest(OpenFileRequest::at(
        "/game/project/scripts/player.cs".to_string(),
        None,
        Some(7),
    ));

    let json = serde_json::to_string(&message).expect("serialize");

    assert!(!json.contains("line"));
    assert!(!json.contains("column"));
}

/// **VALUE**: Verifies the 0-based to 1-based line conversion in
/// [`OpenFileRequest::at`].
///
/// **WHY THIS MATTERS**: The host's script editor counts lines from 0 while
/// IDEs count from 1. This is the single conversion point; an off-by-one here
/// opens every file one line away from the error the user clicked.
///
/// **BUG THIS CATCHES**: Would catch a dropped `+ 1` or a double conversion.
#[test]
fn given_zero_based_position_when_built_then_wire_line_is_one_based() {
    let request = OpenFileRequest::at("Player.cs".to_string(), Some(4), Some(2));

    assert_eq!(request.line, Some(5));
    assert_eq!(request.column, Some(2));
}

/// **VALUE**: Verifies that a line without a column yields column 0.
///
/// **WHY THIS MATTERS**: Plugins expect a column whenever a line is present;
/// sending a line alone would make them fall back to their own default, which
/// differs per IDE.
///
/// **BUG THIS CATCHES**: Would catch `at` passing the missing column through
/// as absent.
#[test]
fn given_line_without_column_when_built_then_column_defaults_to_zero() {
    let request = OpenFileRequest::at("Player.cs".to_string(), Some(0), None);

    assert_eq!(request.line, Some(1));
    assert_eq!(request.column, Some(0));
}

/// **VALUE**: Verifies that a client message parses back from its wire form.
///
/// **WHY THIS MATTERS**: The server reads these lines off the socket; a parse
/// asymmetry (serialize-only attribute, field default mismatch) would make the
/// server drop valid handshakes.
///
/// **BUG THIS CATCHES**: Would catch deserialization regressions on the tagged
/// enum, e.g. an unknown-tag rename.
#[test]
fn given_wire_json_when_parsed_then_client_message_recovered() {
    let parsed: ClientMessage =
        serde_json::from_str(r#"{"type":"open_file_response"}"#).expect("parse");

    assert!(matches!(parsed, ClientMessage::OpenFileResponse(_)));
}
