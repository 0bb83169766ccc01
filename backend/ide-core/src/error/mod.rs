pub mod config;
pub mod ipc;
pub mod launch;
pub mod logger;

pub use config::ConfigError;
pub use ipc::IpcError;
pub use launch::LaunchError;
pub use logger::LoggerError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Ipc(#[from] ipc::IpcError),

    #[error(transparent)]
    Launch(#[from] launch::LaunchError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Logger(#[from] logger::LoggerError),
}
