//! Error types for lftp-client.

use thiserror::Error;

/// Errors raised while turning options into a [`SessionConfig`].
///
/// These are reported synchronously, before any process is spawned.
///
/// [`SessionConfig`]: crate::session::SessionConfig
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No host was given.
    #[error("you need to set a host")]
    MissingHost,

    /// No username was given.
    #[error("you need to set a username")]
    MissingUsername,

    /// No password was given and the session requires one.
    #[error("you need to set a password")]
    MissingPassword,

    /// The protocol option was present but not a string.
    #[error("protocol needs to be of type string, got {0}")]
    InvalidProtocol(String),

    /// The port option could not be read as a port number.
    #[error("invalid port: {0}")]
    InvalidPort(String),

    /// I/O error reading a config file.
    #[error("failed to read config file: {0}")]
    Io(#[source] std::io::Error),

    /// JSON error parsing a config file.
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main error type for lftp-client operations.
#[derive(Error, Debug)]
pub enum LftpError {
    /// The session could not be configured.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The transfer engine process could not be launched.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while talking to a running engine process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stream reader task panicked or was cancelled.
    #[error("output reader task failed: {0}")]
    TaskJoin(String),
}

/// Convenience Result type for lftp-client operations.
pub type Result<T> = std::result::Result<T, LftpError>;
