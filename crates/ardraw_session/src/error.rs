//! Error types for the drawing session

use ardraw_scene::SceneError;
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading a config or script file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or schema error
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config values out of range
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// Replay script problem
    #[error("Invalid event script: {0}")]
    Script(String),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
