pub mod config;
pub mod editors;
pub mod error;
pub mod ipc;
pub mod logger;
pub mod manager;
pub mod os;

#[cfg(test)]
mod tests;

/// The messaging server only ever binds the loopback interface; external
/// IDE plugins run on the same machine as the editor.
pub const MESSAGING_SERVER_HOSTNAME: &str = "127.0.0.1";

/// Port 0 lets the OS pick a free port; the assigned port is published
/// through the metadata file for IDE plugins to read.
const AUTO_SELECT_PORT: &str = "0";

pub(crate) const MESSAGING_SERVER_BIND_ADDRESS: &str =
    const_format::concatcp!(MESSAGING_SERVER_HOSTNAME, ":", AUTO_SELECT_PORT);
