//! IPC layer between the editor host and external IDEs.
//!
//! This module implements the messaging side of "open this script in the
//! external editor": a loopback TCP server the IDE plugins connect to,
//! identity-keyed session tracking, and best-effort request broadcast.
//!
//! # Protocol
//!
//! Newline-delimited JSON; see [`messages`]. Key types:
//! - [`messages::ClientMessage`] - IDE -> Server
//! - [`messages::ServerMessage`] - Server -> IDE
//!
//! # Security
//!
//! - Localhost-only binding (`127.0.0.1`)
//! - Non-loopback connections rejected
//! - First message must be a handshake (fail-closed)

pub mod messages;

pub(crate) mod clients;
mod server;

pub use server::{META_FILE_NAME, MessagingServer};
