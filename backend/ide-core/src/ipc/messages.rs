//! Wire protocol for the messaging server.
//!
//! Messages are newline-delimited JSON, internally tagged with a `type`
//! field. Key message types:
//! - [`ClientMessage`] - IDE -> Server
//! - [`ServerMessage`] - Server -> IDE
//! - [`HandshakeRequest`] - self-identification (first message, mandatory)
//!
//! Line numbers on the wire are 1-based; the editor host works with
//! 0-based lines and converts exactly once, in [`OpenFileRequest::at`].

use serde::{Deserialize, Serialize};

/// Messages an external IDE may send to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Handshake(HandshakeRequest),
    OpenFileResponse(OpenFileResponse),
}

/// Messages the server may send to a connected IDE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    HandshakeResponse(HandshakeResponse),
    OpenFileRequest(OpenFileRequest),
}

/// First message on every connection: the IDE names itself.
///
/// The identity is the routing key for [`broadcast_request`] and
/// [`await_client_connected`], e.g. `"MonoDevelop"`.
///
/// [`broadcast_request`]: crate::ipc::MessagingServer::broadcast_request
/// [`await_client_connected`]: crate::ipc::MessagingServer::await_client_connected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeRequest {
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeResponse {
    pub accepted: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ask the IDE to focus a file, optionally at a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenFileRequest {
    pub file: String,

    /// 1-based line on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

/// Acknowledgement for [`OpenFileRequest`]; carries no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenFileResponse {}

impl OpenFileRequest {
    /// Build a request from a 0-based editor position.
    ///
    /// The column is only meaningful together with a line; without one it
    /// is dropped, and with one it defaults to 0.
    pub fn at(file: String, line: Option<u32>, column: Option<u32>) -> Self {
        let column = line.map(|_| column.unwrap_or(0));
        Self {
            file,
            line: line.map(|l| l + 1),
            column,
        }
    }
}
