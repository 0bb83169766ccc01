use common::ErrorLocation;

use serde::de::StdError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LaunchError {
    /// The editor executable or application bundle could not be located.
    #[error("Not Found Error: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// The requested editor does not run on the current operating system.
    #[error("Unsupported Platform Error: {message} {location}")]
    UnsupportedPlatform {
        message: String,
        location: ErrorLocation,
    },

    /// A spawned editor never registered with the messaging server within
    /// the connection timeout.
    #[error("Connection Timeout Error: {message} {location}")]
    ConnectionTimeout {
        message: String,
        location: ErrorLocation,
    },

    /// Any other failure while spawning or messaging the editor.
    #[error("Launch Error: {message} {location}")]
    Launch {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}
